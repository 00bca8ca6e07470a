use http::{StatusCode, Version};

use crate::{
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
const STATUS_MAX: u16 = 1000;

//
//
//
impl<H: HttpHandler> HttpParser<H> {
    /// `VERSION SP STATUS [SP REASON] CRLF`
    pub(crate) fn parse_response_line(&mut self, t: Token) -> Result<bool, BadMessage> {
        match self.state {
            State::ResponseVersion => match t.kind() {
                TokenKind::Space => {
                    self.version = Some(match lookup_version(self.token.as_bytes()) {
                        Some(version @ (Version::HTTP_10 | Version::HTTP_11)) => version,
                        Some(Version::HTTP_09) => return Err(BadMessage::BadVersion),
                        _ => return Err(BadMessage::UnknownVersion),
                    });
                    self.token.clear();
                    self.state = State::Space1;
                }
                TokenKind::Lf => return Err(BadMessage::NoStatus),
                _ if t.is_visible() => self.token.push_marked(t.byte())?,
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            State::Space1 => match t.kind() {
                TokenKind::Space => {}
                TokenKind::Digit => {
                    self.response_status = u16::from(t.byte() - b'0');
                    self.state = State::Status;
                }
                _ => return Err(BadMessage::NoStatus),
            },
            State::Status => match t.kind() {
                TokenKind::Digit => {
                    self.response_status = self.response_status * 10 + u16::from(t.byte() - b'0');
                    if self.response_status >= STATUS_MAX {
                        return Err(BadMessage::BadStatus);
                    }
                }
                TokenKind::Space => {
                    self.status = Some(status_code(self.response_status)?);
                    self.state = State::Space2;
                }
                TokenKind::Lf => {
                    self.status = Some(status_code(self.response_status)?);
                    return self.start_response(None);
                }
                _ => return Err(BadMessage::BadStatus),
            },
            State::Space2 => match t.kind() {
                _ if t.is_whitespace() => {}
                TokenKind::Lf => return self.start_response(None),
                _ if t.is_visible() => {
                    self.token.clear();
                    self.token.push_marked(t.byte())?;
                    self.state = State::Reason;
                }
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            State::Reason => match t.kind() {
                _ if t.is_whitespace() => self.token.push(t.byte())?,
                TokenKind::Lf => {
                    let reason = latin1(self.token.trimmed());
                    return self.start_response((!reason.is_empty()).then_some(reason));
                }
                _ if t.is_visible() => self.token.push_marked(t.byte())?,
                _ => return Err(BadMessage::IllegalCharacter(t)),
            },
            _ => {}
        }
        Ok(false)
    }

    fn start_response(&mut self, reason: Option<String>) -> Result<bool, BadMessage> {
        let version = self.version.ok_or(BadMessage::UnknownVersion)?;
        let status = self.status.ok_or(BadMessage::BadStatus)?;

        self.state = State::Header;
        self.set_field_state(FieldState::Field);
        log::trace!("status line {:?} {}", version, status.as_u16());
        Ok(self
            .handler
            .start_response(version, status, reason.as_deref()))
    }
}

fn status_code(n: u16) -> Result<StatusCode, BadMessage> {
    StatusCode::from_u16(n).map_err(|_| BadMessage::BadStatus)
}
