use bytes::Buf;
use http::{Method, StatusCode, Version};

use crate::{
    body_framing::{BodyFraming, FramingFields},
    compliance::{ComplianceSection, HttpCompliance},
    config::HttpParserConfig,
    error::BadMessage,
    field_cache::FieldCache,
    handler::HttpHandler,
    token::{Token, TokenKind},
    token_buffer::TokenBuffer,
    SP,
};

//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Start,
    Preamble,
    Method,
    ResponseVersion,
    Space1,
    Status,
    Uri,
    Space2,
    RequestVersion,
    Reason,
    Header,
    HeaderInName,
    HeaderValue,
    HeaderInValue,
    Content,
    ChunkedContent,
    ChunkSize,
    ChunkParams,
    Chunk,
    ChunkEnd,
    Trailer,
    End,
    Close,
    Closed,
}
impl Default for State {
    fn default() -> Self {
        Self::Start
    }
}

impl State {
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Self::Header | Self::HeaderInName | Self::HeaderValue | Self::HeaderInValue
        )
    }

    pub fn is_chunked(&self) -> bool {
        *self >= Self::ChunkedContent && *self <= Self::ChunkEnd
    }
}

/// Position within a header or trailer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldState {
    Field,
    InName,
    WsAfterName,
    Value,
    InValue,
}

//
//
//
/// Incremental HTTP/1.x parser pushing events into an [`HttpHandler`].
pub struct HttpParser<H> {
    pub(crate) handler: H,
    pub(crate) config: HttpParserConfig,
    pub(crate) field_cache: FieldCache,
    pub(crate) is_request: bool,
    //
    pub(crate) state: State,
    pub(crate) field_state: FieldState,
    pub(crate) eof: bool,
    pub(crate) cr: bool,
    pub(crate) head_response: bool,
    pub(crate) line_number: usize,
    pub(crate) header_bytes: usize,
    // start line
    pub(crate) method: Option<Method>,
    pub(crate) uri: TokenBuffer,
    pub(crate) version: Option<Version>,
    pub(crate) status: Option<StatusCode>,
    pub(crate) response_status: u16,
    // fields
    pub(crate) token: TokenBuffer,
    pub(crate) field_name: TokenBuffer,
    pub(crate) pending_field: bool,
    pub(crate) field_count: usize,
    pub(crate) framing_fields: FramingFields,
    // body
    pub(crate) framing: BodyFraming,
    pub(crate) content_length: u64,
    pub(crate) content_position: u64,
    pub(crate) chunk_length: u64,
    pub(crate) chunk_position: u64,
    pub(crate) preface: bool,
}

impl<H: HttpHandler> HttpParser<H> {
    pub fn request(handler: H) -> Self {
        Self::request_with_config(handler, HttpParserConfig::default())
    }
    pub fn response(handler: H) -> Self {
        Self::response_with_config(handler, HttpParserConfig::default())
    }
    pub fn request_with_config(handler: H, config: HttpParserConfig) -> Self {
        Self::with_config(handler, config, true)
    }
    pub fn response_with_config(handler: H, config: HttpParserConfig) -> Self {
        Self::with_config(handler, config, false)
    }

    fn with_config(handler: H, config: HttpParserConfig, is_request: bool) -> Self {
        let field_cache = FieldCache::with_capacity(handler.header_cache_size());
        let token_max_len = config.get_token_max_len();

        Self {
            handler,
            config,
            field_cache,
            is_request,
            state: State::Start,
            field_state: FieldState::Field,
            eof: false,
            cr: false,
            head_response: false,
            line_number: 0,
            header_bytes: 0,
            method: None,
            uri: TokenBuffer::with_max_len(token_max_len),
            version: None,
            status: None,
            response_status: 0,
            token: TokenBuffer::with_max_len(token_max_len),
            field_name: TokenBuffer::with_max_len(token_max_len),
            pending_field: false,
            field_count: 0,
            framing_fields: FramingFields::default(),
            framing: BodyFraming::Unknown,
            content_length: 0,
            content_position: 0,
            chunk_length: 0,
            chunk_position: 0,
            preface: false,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn config(&self) -> &HttpParserConfig {
        &self.config
    }
    pub fn compliance(&self) -> &HttpCompliance {
        self.config.get_compliance()
    }
    pub fn field_cache(&self) -> &FieldCache {
        &self.field_cache
    }

    pub fn state(&self) -> State {
        self.state
    }
    pub fn is_state(&self, state: State) -> bool {
        self.state == state
    }
    pub fn is_request(&self) -> bool {
        self.is_request
    }
    pub fn is_at_eof(&self) -> bool {
        self.eof
    }
    /// Lines seen so far, for diagnostics.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
    pub fn framing(&self) -> BodyFraming {
        self.framing
    }
    pub fn content_length(&self) -> Option<u64> {
        match self.framing {
            BodyFraming::ContentLength(n) => Some(n),
            BodyFraming::NoBody => Some(0),
            _ => None,
        }
    }

    /// Declares that the response being parsed answers a HEAD request.
    /// Cleared by [`reset`](Self::reset).
    pub fn set_head_response(&mut self, head_response: bool) {
        self.head_response = head_response;
    }
    pub fn is_head_response(&self) -> bool {
        self.head_response
    }

    /// Marks the end of input. The next [`parse_next`](Self::parse_next)
    /// call that drains its window finishes the message or reports early EOF.
    pub fn at_eof(&mut self) {
        log::trace!("at eof in {:?}", self.state);
        self.eof = true;
    }

    pub fn close(&mut self) {
        log::trace!("close in {:?}", self.state);
        self.state = State::Close;
    }

    /// Prepares for the next message. Has no effect once closing.
    pub fn reset(&mut self) {
        if matches!(self.state, State::Close | State::Closed) {
            return;
        }

        self.state = State::Start;
        self.field_state = FieldState::Field;
        self.cr = false;
        self.head_response = false;
        self.line_number = 0;
        self.header_bytes = 0;
        self.method = None;
        self.uri.clear();
        self.version = None;
        self.status = None;
        self.response_status = 0;
        self.token.clear();
        self.field_name.clear();
        self.pending_field = false;
        self.field_count = 0;
        self.framing_fields = FramingFields::default();
        self.framing = BodyFraming::Unknown;
        self.content_length = 0;
        self.content_position = 0;
        self.chunk_length = 0;
        self.chunk_position = 0;
        self.preface = false;
    }

    /// Consumes bytes from `buf`, firing handler events.
    ///
    /// Returns true when the message completed, the handler asked to pause,
    /// or parsing stopped on an error or a terminal state. Returns false when
    /// the window was drained and more input is needed.
    pub fn parse_next<B: Buf>(&mut self, buf: &mut B) -> bool {
        match self.parse(buf) {
            Ok(handle) => handle,
            Err(failure) => {
                self.bad_message(buf, failure);
                true
            }
        }
    }

    fn parse<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        if self.state < State::Header && self.parse_line(buf)? {
            return Ok(true);
        }

        if self.state.is_header() && self.parse_fields(buf)? {
            return Ok(true);
        }

        if self.state >= State::Content && self.state < State::Trailer && self.parse_content(buf)? {
            return Ok(true);
        }

        if self.state == State::Trailer && self.parse_fields(buf)? {
            return Ok(true);
        }

        match self.state {
            State::End => {
                while buf.has_remaining() && buf.chunk()[0] <= SP {
                    buf.advance(1);
                }
            }
            State::Close | State::Closed => buf.advance(buf.remaining()),
            _ => {}
        }

        if self.eof && !buf.has_remaining() {
            return self.parse_eof();
        }

        Ok(false)
    }

    fn parse_line<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        while self.state < State::Header && buf.has_remaining() {
            let b = buf.get_u8();
            self.count_header_byte()?;
            let t = match self.next_token(b)? {
                Some(t) => t,
                None => continue,
            };

            let handle = match self.state {
                State::Start | State::Preamble => self.parse_preamble(t)?,
                _ if self.is_request => self.parse_request_line(t, buf)?,
                _ => self.parse_response_line(t)?,
            };
            if handle {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_preamble(&mut self, t: Token) -> Result<bool, BadMessage> {
        match t.kind() {
            TokenKind::Lf => {
                self.state = State::Preamble;
            }
            _ if t.is_tchar() => {
                self.token.clear();
                self.token.push_marked(t.byte())?;
                self.state = if self.is_request {
                    State::Method
                } else {
                    State::ResponseVersion
                };
            }
            _ => return Err(BadMessage::IllegalCharacter(t)),
        }
        Ok(false)
    }

    fn parse_eof(&mut self) -> Result<bool, BadMessage> {
        match self.state {
            State::Closed => return Ok(false),
            State::End | State::Close => {
                self.state = State::Closed;
            }
            State::Content if self.framing == BodyFraming::EofContent => {
                self.state = State::Closed;
                self.content_message();
            }
            State::Trailer if self.field_state == FieldState::Field => {
                self.commit_pending_field()?;
                self.state = State::Closed;
                log::trace!("message complete at eof");
                self.handler.message_complete();
            }
            state => {
                log::debug!("early eof in {:?} at line {}", state, self.line_number);
                self.state = State::Closed;
                self.handler.early_eof();
            }
        }
        Ok(true)
    }

    fn bad_message<B: Buf>(&mut self, buf: &mut B, failure: BadMessage) {
        buf.advance(buf.remaining());
        if matches!(self.state, State::Close | State::Closed) {
            return;
        }

        log::debug!(
            "bad message in {:?} at line {}: {} ({})",
            self.state,
            self.line_number,
            failure,
            failure.status()
        );
        self.state = State::Close;
        self.handler.bad_message(&failure);
    }

    /// Classifies a head or chunk-line byte. A CR is swallowed and must be
    /// followed by LF.
    pub(crate) fn next_token(&mut self, b: u8) -> Result<Option<Token>, BadMessage> {
        let t = Token::new(b);

        if self.cr {
            self.cr = false;
            return match t.kind() {
                TokenKind::Lf => {
                    self.line_number += 1;
                    Ok(Some(t))
                }
                _ => Err(BadMessage::BadEol),
            };
        }

        match t.kind() {
            TokenKind::Cntl => Err(BadMessage::IllegalCharacter(t)),
            TokenKind::Cr => {
                self.cr = true;
                Ok(None)
            }
            TokenKind::Lf => {
                self.line_number += 1;
                Ok(Some(t))
            }
            _ => Ok(Some(t)),
        }
    }

    pub(crate) fn count_header_byte(&mut self) -> Result<(), BadMessage> {
        self.header_bytes += 1;
        let max = self.config.get_headers_max_len();
        if max > 0 && self.header_bytes > max {
            log::warn!("head exceeds {} bytes in {:?}", max, self.state);
            return Err(if self.state == State::Uri {
                BadMessage::UriTooLong
            } else {
                BadMessage::HeaderTooLarge
            });
        }
        Ok(())
    }

    /// True when `section` is required and the construct must be rejected.
    /// Otherwise the violation is reported and the construct tolerated.
    pub(crate) fn compliance_violation(&mut self, section: ComplianceSection, details: &str) -> bool {
        if self.config.get_compliance().contains(section) {
            return true;
        }
        self.notify_violation(section, details);
        false
    }

    pub(crate) fn notify_violation(&mut self, section: ComplianceSection, details: &str) {
        let compliance = self.config.get_compliance();
        log::debug!("{} violation {}: {}", compliance, section, details);
        self.handler
            .on_compliance_violation(compliance, section, details);
    }

    pub(crate) fn set_field_state(&mut self, field_state: FieldState) {
        self.field_state = field_state;
        if self.state.is_header() {
            self.state = match field_state {
                FieldState::Field => State::Header,
                FieldState::InName | FieldState::WsAfterName => State::HeaderInName,
                FieldState::Value => State::HeaderValue,
                FieldState::InValue => State::HeaderInValue,
            };
        }
    }

    /// Fires header, content and message completion for a bodiless message.
    pub(crate) fn header_content_message(&mut self) {
        log::trace!("message complete without body");
        self.handler.header_complete();
        self.handler.content_complete();
        self.handler.message_complete();
    }

    pub(crate) fn content_message(&mut self) {
        log::trace!("message complete after {} content bytes", self.content_position);
        self.handler.content_complete();
        self.handler.message_complete();
    }
}
