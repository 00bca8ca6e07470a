use core::cmp;

use bytes::Buf;

use crate::{
    body_framing::BodyFraming,
    error::BadMessage,
    handler::HttpHandler,
    parser::{HttpParser, State},
};

//
//
//
/// What follows `PRI * HTTP/2.0\r\n\r\n` in the connection preface.
const PREFACE_TAIL: &[u8] = b"SM\r\n\r\n";

//
//
//
impl<H: HttpHandler> HttpParser<H> {
    pub(crate) fn parse_content<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        if self.preface {
            return self.parse_preface(buf);
        }

        match (self.state, self.framing) {
            (State::Content, BodyFraming::ContentLength(_)) => self.parse_identity_body(buf),
            (State::Content, _) => self.parse_eof_body(buf),
            _ => self.parse_chunked_body(buf),
        }
    }

    fn parse_identity_body<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        loop {
            let remaining = self.content_length - self.content_position;
            if remaining == 0 {
                self.state = State::End;
                self.content_message();
                return Ok(true);
            }
            if !buf.has_remaining() {
                return Ok(false);
            }

            let n = cmp::min(remaining, buf.remaining() as u64) as usize;
            let chunk = buf.copy_to_bytes(n);
            self.content_position += n as u64;
            if self.handler.content(chunk) {
                return Ok(true);
            }
        }
    }

    /// Body delimited by the end of input; completion happens at EOF.
    fn parse_eof_body<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        while buf.has_remaining() {
            let n = buf.remaining();
            let chunk = buf.copy_to_bytes(n);
            self.content_position += n as u64;
            if self.handler.content(chunk) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_preface<B: Buf>(&mut self, buf: &mut B) -> Result<bool, BadMessage> {
        while buf.has_remaining() {
            let b = buf.get_u8();
            match PREFACE_TAIL.get(self.content_position as usize) {
                Some(expected) if *expected == b => self.content_position += 1,
                _ => return Err(BadMessage::BadPreface),
            }

            if self.content_position as usize == PREFACE_TAIL.len() {
                log::trace!("http2 preface complete");
                self.state = State::End;
                self.content_message();
                return Ok(true);
            }
        }
        Ok(false)
    }
}
