use std::sync::Arc;

use bytes::Buf;
use http::{
    header::{self, HeaderName},
    StatusCode, Version,
};

use crate::{
    body_framing::{BodyFraming, BodyFramingDetector, MessageKind},
    compliance::ComplianceSection,
    error::BadMessage,
    field::{latin1, lookup_header, HttpField},
    field_cache,
    handler::HttpHandler,
    host_port::HostPort,
    parser::{FieldState, HttpParser, State},
    token::{Token, TokenKind},
    SP,
};

//
//
//
pub(crate) fn lookup_version(token: &[u8]) -> Option<Version> {
    const VERSIONS: [(&[u8], Version); 4] = [
        (b"HTTP/1.1", Version::HTTP_11),
        (b"HTTP/1.0", Version::HTTP_10),
        (b"HTTP/2.0", Version::HTTP_2),
        (b"HTTP/0.9", Version::HTTP_09),
    ];
    VERSIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, version)| *version)
}

//
//
//
impl<H: HttpHandler> HttpParser<H> {
    /// Header or trailer lines, up to the empty line.
    pub(crate) fn parse_fields<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        while (self.state.is_header() || self.state == State::Trailer) && buf.has_remaining() {
            let b = buf.get_u8();
            self.count_header_byte()?;
            let t = match self.next_token(b)? {
                Some(t) => t,
                None => continue,
            };

            let handle = match self.field_state {
                FieldState::Field => self.parse_field_start(t)?,
                FieldState::InName => {
                    self.parse_field_name(t)?;
                    false
                }
                FieldState::WsAfterName => {
                    self.parse_ws_after_field_name(t)?;
                    false
                }
                FieldState::Value => {
                    self.parse_field_value_start(t)?;
                    false
                }
                FieldState::InValue => {
                    self.parse_field_value(t)?;
                    false
                }
            };
            if handle {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_field_start(&mut self, t: Token) -> Result<bool, BadMessage> {
        match t.kind() {
            _ if t.is_whitespace() => {
                // nothing to fold into
                if !self.pending_field {
                    return Err(BadMessage::IllegalCharacter(t));
                }
                let name = latin1(self.field_name.as_bytes());
                if self.compliance_violation(ComplianceSection::NoFieldFolding, &name) {
                    return Err(BadMessage::HeaderFolding);
                }
                self.token.trim_end();
                if !self.token.is_empty() {
                    self.token.push(SP)?;
                }
                self.set_field_state(FieldState::Value);
            }
            TokenKind::Lf => {
                self.commit_pending_field()?;
                if self.state == State::Trailer {
                    self.state = State::End;
                    log::trace!("message complete after trailers");
                    self.handler.message_complete();
                    return Ok(true);
                }
                return self.headers_complete();
            }
            _ if t.is_tchar() => {
                self.commit_pending_field()?;
                self.field_name.clear();
                self.token.clear();
                self.field_name.push_marked(t.byte())?;
                self.set_field_state(FieldState::InName);
            }
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(false)
    }

    fn parse_field_name(&mut self, t: Token) -> Result<(), BadMessage> {
        match t.kind() {
            TokenKind::Colon => {
                self.token.clear();
                self.set_field_state(FieldState::Value);
            }
            _ if t.is_whitespace() => {
                let name = latin1(self.field_name.as_bytes());
                if self.compliance_violation(ComplianceSection::NoWsAfterFieldName, &name) {
                    return Err(BadMessage::IllegalCharacter(t));
                }
                self.set_field_state(FieldState::WsAfterName);
            }
            TokenKind::Lf => self.field_without_colon(t)?,
            _ if t.is_tchar() => self.field_name.push_marked(t.byte())?,
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(())
    }

    fn parse_ws_after_field_name(&mut self, t: Token) -> Result<(), BadMessage> {
        match t.kind() {
            _ if t.is_whitespace() => {}
            TokenKind::Colon => {
                self.token.clear();
                self.set_field_state(FieldState::Value);
            }
            TokenKind::Lf => self.field_without_colon(t)?,
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(())
    }

    fn field_without_colon(&mut self, t: Token) -> Result<(), BadMessage> {
        let name = latin1(self.field_name.as_bytes());
        if self.compliance_violation(ComplianceSection::FieldColon, &name) {
            return Err(BadMessage::IllegalCharacter(t));
        }
        self.token.clear();
        self.pending_field = true;
        self.set_field_state(FieldState::Field);
        Ok(())
    }

    fn parse_field_value_start(&mut self, t: Token) -> Result<(), BadMessage> {
        match t.kind() {
            _ if t.is_whitespace() => {}
            TokenKind::Lf => {
                self.pending_field = true;
                self.set_field_state(FieldState::Field);
            }
            _ if t.is_visible() => {
                self.token.push_marked(t.byte())?;
                self.set_field_state(FieldState::InValue);
            }
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(())
    }

    fn parse_field_value(&mut self, t: Token) -> Result<(), BadMessage> {
        match t.kind() {
            _ if t.is_whitespace() => self.token.push(t.byte())?,
            TokenKind::Lf => {
                self.pending_field = true;
                self.set_field_state(FieldState::Field);
            }
            _ if t.is_visible() => self.token.push_marked(t.byte())?,
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(())
    }

    /// Emits the field whose line ended, once it is known not to be folded.
    pub(crate) fn commit_pending_field(&mut self) -> Result<(), BadMessage> {
        if !self.pending_field {
            return Ok(());
        }
        self.pending_field = false;

        let field = self.resolve_field()?;
        self.field_count += 1;
        if self.state == State::Trailer {
            self.handler.parsed_trailer(field);
        } else {
            self.process_header(&field)?;
            self.handler.parsed_header(field);
        }
        Ok(())
    }

    fn resolve_field(&mut self) -> Result<Arc<HttpField>, BadMessage> {
        let trailer = self.state == State::Trailer;
        let name = latin1(self.field_name.as_bytes());
        let value = latin1(self.token.trimmed());

        if !trailer {
            if let Some(cached) = self
                .field_cache
                .lookup(self.field_name.as_bytes(), self.token.trimmed())
            {
                if cached.name() == name && cached.value() == value {
                    return Ok(cached);
                }

                let name_canonical =
                    self.use_canonical(ComplianceSection::FieldNameCaseInsensitive, cached.name(), &name);
                let value_canonical = self.use_canonical(
                    ComplianceSection::CaseInsensitiveFieldValueCache,
                    cached.value(),
                    &value,
                );
                if name_canonical && value_canonical {
                    return Ok(cached);
                }

                let name = if name_canonical { cached.name().to_owned() } else { name };
                let value = if value_canonical { cached.value().to_owned() } else { value };
                return self
                    .new_field(cached.header().cloned(), name, value)
                    .map(Arc::new);
            }
        }

        let (header, name, canonical) = match lookup_header(self.field_name.as_bytes()) {
            Some((canonical, header)) => {
                let name = if self.use_canonical(
                    ComplianceSection::FieldNameCaseInsensitive,
                    canonical,
                    &name,
                ) {
                    canonical.to_owned()
                } else {
                    name
                };
                (Some(header.clone()), name, Some(canonical))
            }
            None => (None, name, None),
        };

        let cacheable = !trailer
            && header.as_ref().map_or(false, field_cache::cacheable)
            && canonical == Some(name.as_str())
            && value.is_ascii();

        let field = Arc::new(self.new_field(header, name, value)?);
        if cacheable && !self.field_cache.add(field.clone()) {
            log::trace!("field cache full, not caching {}", field);
        }
        Ok(field)
    }

    fn new_field(
        &self,
        header: Option<HeaderName>,
        name: String,
        value: String,
    ) -> Result<HttpField, BadMessage> {
        let host_port = match header {
            Some(ref h) if *h == header::HOST && !value.is_empty() && self.state != State::Trailer => {
                Some(HostPort::parse(&value)?)
            }
            _ => None,
        };

        let field = HttpField::new(header, name, value);
        Ok(match host_port {
            Some(host_port) => field.with_host_port(host_port),
            None => field,
        })
    }

    /// True when the canonical spelling replaces `literal`.
    fn use_canonical(&mut self, section: ComplianceSection, canonical: &str, literal: &str) -> bool {
        if canonical == literal || self.config.get_compliance().contains(section) {
            return true;
        }
        self.notify_violation(section, literal);
        false
    }

    fn process_header(&mut self, field: &HttpField) -> Result<(), BadMessage> {
        let header = match field.header() {
            Some(header) => header,
            None => return Ok(()),
        };

        if *header == header::CONTENT_LENGTH {
            let repeated = self.framing_fields.add_content_length(field.value())?;
            if repeated
                && self.compliance_violation(ComplianceSection::MultipleContentLengths, field.value())
            {
                return Err(BadMessage::MultipleContentLengths);
            }
        } else if *header == header::TRANSFER_ENCODING {
            self.framing_fields.add_transfer_encoding(field.value());
        } else if *header == header::HOST {
            self.framing_fields.set_host();
        }
        Ok(())
    }

    /// Chooses the body framing once the empty line ends the head.
    fn headers_complete(&mut self) -> Result<bool, BadMessage> {
        if self.is_request {
            match self.version {
                Some(Version::HTTP_11) if !self.framing_fields.has_host() => {
                    return Err(BadMessage::NoHost)
                }
                Some(Version::HTTP_2) => {
                    if self.field_count > 0 {
                        return Err(BadMessage::BadPreface);
                    }
                    log::trace!("http2 preface head");
                    self.preface = true;
                    self.content_position = 0;
                    self.state = State::Content;
                    return Ok(self.handler.header_complete());
                }
                _ => {}
            }
        }

        let kind = match (self.is_request, self.status) {
            (false, Some(status)) => MessageKind::Response {
                status,
                head_response: self.head_response,
            },
            (false, None) => MessageKind::Response {
                status: StatusCode::OK,
                head_response: self.head_response,
            },
            (true, _) => MessageKind::Request,
        };
        let fields = self.framing_fields;
        let framing = (&fields, &kind).detect(|section, details| {
            !self.compliance_violation(section, details)
        })?;
        log::trace!("{:?} framing {:?}", kind, framing);

        self.framing = framing;
        self.content_position = 0;
        match framing {
            BodyFraming::Unknown | BodyFraming::NoBody => {
                self.state = State::End;
                self.header_content_message();
                Ok(true)
            }
            BodyFraming::ContentLength(n) => {
                self.content_length = n;
                self.state = State::Content;
                Ok(self.handler.header_complete())
            }
            BodyFraming::EofContent => {
                self.state = State::Content;
                Ok(self.handler.header_complete())
            }
            BodyFraming::Chunked => {
                self.chunk_length = 0;
                self.chunk_position = 0;
                self.state = State::ChunkedContent;
                Ok(self.handler.header_complete())
            }
        }
    }
}
