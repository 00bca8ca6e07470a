use core::fmt;

use http::header::{self, HeaderName};

use crate::host_port::HostPort;

//
//
//
/// A parsed header or trailer field.
///
/// `header` is the well-known name token when the name was recognised, and
/// `name` keeps the casing that is reported to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpField {
    header: Option<HeaderName>,
    name: String,
    value: String,
    host_port: Option<HostPort>,
}

impl HttpField {
    pub fn new(header: Option<HeaderName>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header,
            name: name.into(),
            value: value.into(),
            host_port: None,
        }
    }

    /// Field named by a well-known header, using its canonical casing.
    pub fn known(header: HeaderName, value: impl Into<String>) -> Self {
        let name = match canonical_name(&header) {
            Some(name) => name.to_owned(),
            None => header.as_str().to_owned(),
        };
        Self::new(Some(header), name, value)
    }

    pub fn with_host_port(mut self, host_port: HostPort) -> Self {
        self.host_port = Some(host_port);
        self
    }

    pub fn header(&self) -> Option<&HeaderName> {
        self.header.as_ref()
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn host_port(&self) -> Option<&HostPort> {
        self.host_port.as_ref()
    }

    pub fn is(&self, header: &HeaderName) -> bool {
        self.header.as_ref() == Some(header)
    }

    /// Comma separated elements of the value, trimmed, empty ones skipped.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.value
            .split(',')
            .map(|s| s.trim_matches(|c| c == ' ' || c == '\t'))
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for HttpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Field bytes are octets, surfaced as ISO-8859-1.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| *b as char).collect()
}

//
//
//
static WELL_KNOWN: [(&str, HeaderName); 48] = [
    ("Accept", header::ACCEPT),
    ("Accept-Charset", header::ACCEPT_CHARSET),
    ("Accept-Encoding", header::ACCEPT_ENCODING),
    ("Accept-Language", header::ACCEPT_LANGUAGE),
    ("Accept-Ranges", header::ACCEPT_RANGES),
    ("Age", header::AGE),
    ("Allow", header::ALLOW),
    ("Authorization", header::AUTHORIZATION),
    ("Cache-Control", header::CACHE_CONTROL),
    ("Connection", header::CONNECTION),
    ("Content-Disposition", header::CONTENT_DISPOSITION),
    ("Content-Encoding", header::CONTENT_ENCODING),
    ("Content-Language", header::CONTENT_LANGUAGE),
    ("Content-Length", header::CONTENT_LENGTH),
    ("Content-Location", header::CONTENT_LOCATION),
    ("Content-Range", header::CONTENT_RANGE),
    ("Content-Type", header::CONTENT_TYPE),
    ("Cookie", header::COOKIE),
    ("Date", header::DATE),
    ("ETag", header::ETAG),
    ("Expect", header::EXPECT),
    ("Expires", header::EXPIRES),
    ("Forwarded", header::FORWARDED),
    ("From", header::FROM),
    ("Host", header::HOST),
    ("If-Match", header::IF_MATCH),
    ("If-Modified-Since", header::IF_MODIFIED_SINCE),
    ("If-None-Match", header::IF_NONE_MATCH),
    ("If-Range", header::IF_RANGE),
    ("If-Unmodified-Since", header::IF_UNMODIFIED_SINCE),
    ("Last-Modified", header::LAST_MODIFIED),
    ("Location", header::LOCATION),
    ("Max-Forwards", header::MAX_FORWARDS),
    ("Origin", header::ORIGIN),
    ("Pragma", header::PRAGMA),
    ("Proxy-Authenticate", header::PROXY_AUTHENTICATE),
    ("Proxy-Authorization", header::PROXY_AUTHORIZATION),
    ("Range", header::RANGE),
    ("Referer", header::REFERER),
    ("Retry-After", header::RETRY_AFTER),
    ("Server", header::SERVER),
    ("Set-Cookie", header::SET_COOKIE),
    ("TE", header::TE),
    ("Trailer", header::TRAILER),
    ("Transfer-Encoding", header::TRANSFER_ENCODING),
    ("Upgrade", header::UPGRADE),
    ("User-Agent", header::USER_AGENT),
    ("Via", header::VIA),
];

/// Case-insensitive lookup of a well-known field name.
pub fn lookup_header(name: &[u8]) -> Option<(&'static str, &'static HeaderName)> {
    WELL_KNOWN
        .iter()
        .find(|(canonical, _)| canonical.as_bytes().eq_ignore_ascii_case(name))
        .map(|(canonical, header)| (*canonical, header))
}

pub fn canonical_name(header: &HeaderName) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(_, h)| h == header)
        .map(|(canonical, _)| *canonical)
}
