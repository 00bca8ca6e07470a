use http::StatusCode;

use crate::{token::Token, token_buffer::TokenBufferOverflow};

/// A fatal protocol error for the current message.
///
/// `Display` is the reason surfaced to [`HttpHandler::bad_message`](crate::handler::HttpHandler::bad_message).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BadMessage {
    #[error("Bad EOL")]
    BadEol,
    #[error("Illegal character {0}")]
    IllegalCharacter(Token),
    #[error("Bad Method")]
    BadMethod,
    #[error("No URI")]
    NoUri,
    #[error("No Status")]
    NoStatus,
    #[error("Bad Status")]
    BadStatus,
    #[error("Unknown Version")]
    UnknownVersion,
    #[error("Bad Version")]
    BadVersion,
    #[error("HTTP/0.9 not supported")]
    Http09NotSupported,
    #[error("No Host")]
    NoHost,
    #[error("Bad Host")]
    BadHost,
    #[error("Invalid Content-Length Value")]
    InvalidContentLength,
    #[error("Multiple Content-Lengths")]
    MultipleContentLengths,
    #[error("Bad Message")]
    TransferEncodingWithContentLength,
    #[error("Bad Transfer-Encoding")]
    BadTransferEncoding,
    #[error("Bad chunk")]
    BadChunk,
    #[error("Header Folding")]
    HeaderFolding,
    #[error("Header too large")]
    HeaderTooLarge,
    #[error("URI Too Long")]
    UriTooLong,
    #[error("Bad Preface")]
    BadPreface,
}

impl BadMessage {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::HeaderTooLarge => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            Self::UriTooLong => StatusCode::URI_TOO_LONG,
            Self::Http09NotSupported => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<TokenBufferOverflow> for BadMessage {
    fn from(_: TokenBufferOverflow) -> Self {
        Self::HeaderTooLarge
    }
}
