use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode, Version};

use crate::{
    compliance::{ComplianceSection, HttpCompliance},
    error::BadMessage,
    field::HttpField,
    field_cache::DEFAULT_HEADER_CACHE_SIZE,
};

/// Receiver of parse events.
///
/// Methods returning `bool` may return `true` to pause: the parser returns
/// from [`parse_next`](crate::parser::HttpParser::parse_next) right after the
/// call and resumes from the same point on the next call.
pub trait HttpHandler {
    /// Request line parsed. `uri` is the raw request target.
    fn start_request(&mut self, _method: &Method, _uri: &[u8], _version: Version) -> bool {
        false
    }

    /// Status line parsed. An absent or empty reason is `None`.
    fn start_response(
        &mut self,
        _version: Version,
        _status: StatusCode,
        _reason: Option<&str>,
    ) -> bool {
        false
    }

    fn parsed_header(&mut self, field: Arc<HttpField>);

    fn header_complete(&mut self) -> bool;

    /// A non-empty part of the body. Chunk framing is already removed.
    fn content(&mut self, chunk: Bytes) -> bool;

    fn content_complete(&mut self) -> bool;

    fn parsed_trailer(&mut self, _field: Arc<HttpField>) {}

    fn message_complete(&mut self) -> bool;

    /// Input ended before the current message was complete.
    fn early_eof(&mut self);

    /// Called at most once per message; nothing but `early_eof` follows.
    fn bad_message(&mut self, failure: &BadMessage);

    /// Capacity of the parser's field cache, queried once at construction.
    fn header_cache_size(&self) -> usize {
        DEFAULT_HEADER_CACHE_SIZE
    }

    fn on_compliance_violation(
        &mut self,
        _compliance: &HttpCompliance,
        _section: ComplianceSection,
        _details: &str,
    ) {
    }
}

impl<H: HttpHandler + ?Sized> HttpHandler for &mut H {
    fn start_request(&mut self, method: &Method, uri: &[u8], version: Version) -> bool {
        (**self).start_request(method, uri, version)
    }
    fn start_response(&mut self, version: Version, status: StatusCode, reason: Option<&str>) -> bool {
        (**self).start_response(version, status, reason)
    }
    fn parsed_header(&mut self, field: Arc<HttpField>) {
        (**self).parsed_header(field)
    }
    fn header_complete(&mut self) -> bool {
        (**self).header_complete()
    }
    fn content(&mut self, chunk: Bytes) -> bool {
        (**self).content(chunk)
    }
    fn content_complete(&mut self) -> bool {
        (**self).content_complete()
    }
    fn parsed_trailer(&mut self, field: Arc<HttpField>) {
        (**self).parsed_trailer(field)
    }
    fn message_complete(&mut self) -> bool {
        (**self).message_complete()
    }
    fn early_eof(&mut self) {
        (**self).early_eof()
    }
    fn bad_message(&mut self, failure: &BadMessage) {
        (**self).bad_message(failure)
    }
    fn header_cache_size(&self) -> usize {
        (**self).header_cache_size()
    }
    fn on_compliance_violation(
        &mut self,
        compliance: &HttpCompliance,
        section: ComplianceSection,
        details: &str,
    ) {
        (**self).on_compliance_violation(compliance, section, details)
    }
}
