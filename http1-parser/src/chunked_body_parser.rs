use core::cmp;

use bytes::Buf;

use crate::{
    error::BadMessage,
    handler::HttpHandler,
    parser::{FieldState, HttpParser, State},
    token::{Token, TokenKind},
};

//
//
//
const CHUNK_LENGTH_MAX: u64 = i64::MAX as u64;

//
//
//
impl<H: HttpHandler> HttpParser<H> {
    /// `1*HEXDIG [ chunk-ext ] CRLF chunk-data CRLF`, repeated until the
    /// zero-length chunk, after which the trailer section begins.
    pub(crate) fn parse_chunked_body<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        while self.state.is_chunked() && buf.has_remaining() {
            if self.state == State::Chunk {
                let remaining = self.chunk_length - self.chunk_position;
                let n = cmp::min(remaining, buf.remaining() as u64) as usize;
                let chunk = buf.copy_to_bytes(n);
                self.chunk_position += n as u64;
                self.content_position += n as u64;
                if self.chunk_position == self.chunk_length {
                    self.state = State::ChunkEnd;
                }
                if self.handler.content(chunk) {
                    return Ok(true);
                }
                continue;
            }

            let b = buf.get_u8();
            let t = match self.next_token(b)? {
                Some(t) => t,
                None => continue,
            };

            let handle = match self.state {
                State::ChunkedContent => match t.kind() {
                    // stray empty line between chunks
                    TokenKind::Lf => false,
                    _ => {
                        let digit = t.hex_value().ok_or(BadMessage::BadChunk)?;
                        self.chunk_length = u64::from(digit);
                        self.chunk_position = 0;
                        self.state = State::ChunkSize;
                        false
                    }
                },
                State::ChunkSize => self.parse_chunk_size(t)?,
                State::ChunkParams => match t.kind() {
                    TokenKind::Lf => self.chunk_size_complete(),
                    _ => false,
                },
                State::ChunkEnd => match t.kind() {
                    TokenKind::Lf => {
                        self.state = State::ChunkedContent;
                        false
                    }
                    _ => return Err(BadMessage::BadChunk),
                },
                _ => false,
            };
            if handle {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_chunk_size(&mut self, t: Token) -> Result<bool, BadMessage> {
        match t.kind() {
            TokenKind::Lf => return Ok(self.chunk_size_complete()),
            _ if t.is_whitespace() => self.state = State::ChunkParams,
            _ if t.byte() == b';' => self.state = State::ChunkParams,
            _ => {
                let digit = t.hex_value().ok_or(BadMessage::BadChunk)?;
                self.chunk_length = self
                    .chunk_length
                    .checked_mul(16)
                    .and_then(|n| n.checked_add(u64::from(digit)))
                    .filter(|n| *n <= CHUNK_LENGTH_MAX)
                    .ok_or(BadMessage::BadChunk)?;
            }
        }
        Ok(false)
    }

    /// The chunk line ended. A zero size starts the trailer section.
    fn chunk_size_complete(&mut self) -> bool {
        if self.chunk_length > 0 {
            self.chunk_position = 0;
            self.state = State::Chunk;
            return false;
        }

        log::trace!("last chunk after {} content bytes", self.content_position);
        self.state = State::Trailer;
        self.header_bytes = 0;
        self.field_name.clear();
        self.token.clear();
        self.pending_field = false;
        self.set_field_state(FieldState::Field);
        self.handler.content_complete()
    }
}
