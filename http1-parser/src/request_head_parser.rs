use bytes::Buf;
use http::{Method, Version};

use crate::{
    compliance::ComplianceSection,
    error::BadMessage,
    field::latin1,
    handler::HttpHandler,
    head_parser::lookup_version,
    parser::{FieldState, HttpParser, State},
    token::{Token, TokenKind},
};

//
//
//
const METHODS: [&str; 11] = [
    "GET", "POST", "HEAD", "PUT", "OPTIONS", "DELETE", "TRACE", "CONNECT", "MOVE", "PROXY", "PRI",
];

const PREFACE_METHOD: &str = "PRI";
const PREFACE_URI: &[u8] = b"*";

//
//
//
impl<H: HttpHandler> HttpParser<H> {
    /// `METHOD SP URI SP VERSION CRLF`, or `METHOD SP URI CRLF` for HTTP/0.9.
    pub(crate) fn parse_request_line<B: Buf>(
        &mut self,
        t: Token,
        buf: &mut B,
    ) -> Result<bool, BadMessage> {
        match self.state {
            State::Method => match t.kind() {
                TokenKind::Space => {
                    self.method = Some(self.lookup_method()?);
                    self.token.clear();
                    self.state = State::Space1;
                }
                TokenKind::Lf => return Err(BadMessage::NoUri),
                _ if t.is_tchar() => self.token.push_marked(t.byte())?,
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            State::Space1 => match t.kind() {
                TokenKind::Space => {}
                _ if t.is_visible() => {
                    self.uri.clear();
                    self.uri
                        .push_marked(t.byte())
                        .map_err(|_| BadMessage::UriTooLong)?;
                    self.state = State::Uri;
                }
                _ => return Err(BadMessage::NoUri),
            },
            State::Uri => match t.kind() {
                TokenKind::Space => self.state = State::Space2,
                TokenKind::Lf => return self.http_09(buf),
                _ if t.is_visible() => self
                    .uri
                    .push_marked(t.byte())
                    .map_err(|_| BadMessage::UriTooLong)?,
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            State::Space2 => match t.kind() {
                TokenKind::Space => {}
                TokenKind::Lf => return self.http_09(buf),
                _ if t.is_visible() => {
                    self.token.clear();
                    self.token.push_marked(t.byte())?;
                    self.state = State::RequestVersion;
                }
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            State::RequestVersion => match t.kind() {
                TokenKind::Lf => {
                    let version = self.request_version()?;
                    self.version = Some(version);
                    self.state = State::Header;
                    self.set_field_state(FieldState::Field);

                    let method = self.method.as_ref().ok_or(BadMessage::BadMethod)?;
                    log::trace!("request line {} {:?}", method, version);
                    return Ok(self
                        .handler
                        .start_request(method, self.uri.as_bytes(), version));
                }
                _ if t.is_visible() => self.token.push_marked(t.byte())?,
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            _ => {}
        }
        Ok(false)
    }

    fn lookup_method(&mut self) -> Result<Method, BadMessage> {
        let literal = latin1(self.token.as_bytes());

        let name = match METHODS
            .iter()
            .find(|m| m.eq_ignore_ascii_case(&literal))
        {
            Some(canonical) if *canonical != literal => {
                if self.compliance_violation(ComplianceSection::MethodCaseSensitive, &literal) {
                    literal
                } else {
                    (*canonical).to_owned()
                }
            }
            _ => literal,
        };

        Method::from_bytes(name.as_bytes()).map_err(|_| BadMessage::BadMethod)
    }

    fn request_version(&self) -> Result<Version, BadMessage> {
        match lookup_version(self.token.as_bytes()) {
            Some(Version::HTTP_09) => Err(BadMessage::BadVersion),
            Some(Version::HTTP_2) => {
                let preface = self.uri.as_bytes() == PREFACE_URI
                    && self.method.as_ref().map(Method::as_str) == Some(PREFACE_METHOD);
                if preface {
                    Ok(Version::HTTP_2)
                } else {
                    Err(BadMessage::UnknownVersion)
                }
            }
            Some(version) => Ok(version),
            None => Err(BadMessage::UnknownVersion),
        }
    }

    /// A request line without a version. Completes the message and drops the
    /// rest of the window.
    fn http_09<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        let uri = latin1(self.uri.as_bytes());
        if self.compliance_violation(ComplianceSection::NoHttp09, &uri) {
            return Err(BadMessage::Http09NotSupported);
        }

        self.version = Some(Version::HTTP_09);
        let method = self.method.as_ref().ok_or(BadMessage::BadMethod)?;
        log::trace!("http/0.9 request {} {}", method, uri);
        self.handler
            .start_request(method, self.uri.as_bytes(), Version::HTTP_09);

        self.state = State::End;
        buf.advance(buf.remaining());
        self.header_content_message();
        Ok(true)
    }
}
