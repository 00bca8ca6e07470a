use std::{collections::HashMap, sync::Arc};

use http::header::{self, HeaderName};

use crate::field::HttpField;

//
//
//
pub const DEFAULT_HEADER_CACHE_SIZE: usize = 1024;

const KEY_DEFAULT_CAPACITY: usize = 64;

fn baseline() -> [(HeaderName, &'static str); 30] {
    [
        (header::CONNECTION, "close"),
        (header::CONNECTION, "keep-alive"),
        (header::CONNECTION, "upgrade"),
        (header::ACCEPT_ENCODING, "identity"),
        (header::CONNECTION, "TE"),
        (header::TRANSFER_ENCODING, "chunked"),
        (header::CONTENT_LENGTH, "0"),
        (header::CONTENT_ENCODING, "gzip"),
        (header::CONTENT_ENCODING, "deflate"),
        (header::ACCEPT, "*/*"),
        (header::ACCEPT_ENCODING, "gzip"),
        (header::ACCEPT_ENCODING, "gzip, deflate"),
        (header::ACCEPT_ENCODING, "gzip, deflate, br"),
        (header::ACCEPT_ENCODING, "gzip,deflate,sdch"),
        (header::ACCEPT_LANGUAGE, "en-US,en;q=0.5"),
        (header::ACCEPT_LANGUAGE, "en-GB,en-US;q=0.8,en;q=0.6"),
        (header::ACCEPT_CHARSET, "ISO-8859-1,utf-8;q=0.7,*;q=0.3"),
        (header::CACHE_CONTROL, "no-cache"),
        (header::CACHE_CONTROL, "max-age=0"),
        (header::PRAGMA, "no-cache"),
        (header::EXPECT, "100-continue"),
        (header::UPGRADE, "websocket"),
        (header::UPGRADE, "h2c"),
        (header::TE, "trailers"),
        (header::CONTENT_TYPE, "text/plain"),
        (header::CONTENT_TYPE, "text/html"),
        (header::CONTENT_TYPE, "text/plain;charset=utf-8"),
        (header::CONTENT_TYPE, "application/json"),
        (header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
        (header::ACCEPT_RANGES, "bytes"),
    ]
}

/// Fields worth sharing across messages; values of other fields vary too much.
const CACHEABLE: [HeaderName; 15] = [
    header::ACCEPT,
    header::ACCEPT_CHARSET,
    header::ACCEPT_ENCODING,
    header::ACCEPT_LANGUAGE,
    header::CACHE_CONTROL,
    header::CONNECTION,
    header::CONTENT_ENCODING,
    header::CONTENT_TYPE,
    header::EXPECT,
    header::HOST,
    header::PRAGMA,
    header::TE,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::USER_AGENT,
];

pub(crate) fn cacheable(header: &HeaderName) -> bool {
    CACHEABLE.iter().any(|h| h == header)
}

/// Shared field instances keyed by their ASCII-lowercased `name: value` line.
///
/// A fixed baseline of common fields is always present. Fields seen on the
/// wire are added while there is room, up to the configured capacity; a
/// capacity of zero disables that part.
#[derive(Debug)]
pub struct FieldCache {
    baseline: HashMap<Box<[u8]>, Arc<HttpField>>,
    dynamic: HashMap<Box<[u8]>, Arc<HttpField>>,
    capacity: usize,
    key: Vec<u8>,
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HEADER_CACHE_SIZE)
    }
}

impl FieldCache {
    pub fn with_capacity(capacity: usize) -> Self {
        let baseline = baseline()
            .into_iter()
            .map(|(header, value)| {
                let field = HttpField::known(header, value);
                (key_of(field.name().as_bytes(), value.as_bytes()), Arc::new(field))
            })
            .collect();

        Self {
            baseline,
            dynamic: HashMap::new(),
            capacity,
            key: Vec::with_capacity(KEY_DEFAULT_CAPACITY),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn len(&self) -> usize {
        self.dynamic.len()
    }
    pub fn is_empty(&self) -> bool {
        self.dynamic.is_empty()
    }
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }
    pub fn is_full(&self) -> bool {
        self.dynamic.len() >= self.capacity
    }

    /// Looks up a `Name: value` line, ignoring ASCII case.
    pub fn get(&self, line: &str) -> Option<Arc<HttpField>> {
        let (name, value) = line.split_once(':')?;
        let key = key_of(name.trim().as_bytes(), value.trim().as_bytes());
        self.find(&key)
    }

    pub(crate) fn lookup(&mut self, name: &[u8], value: &[u8]) -> Option<Arc<HttpField>> {
        write_key(&mut self.key, name, value);
        self.find(&self.key)
    }

    /// Returns false when the cache is full.
    pub(crate) fn add(&mut self, field: Arc<HttpField>) -> bool {
        if self.is_full() {
            return false;
        }
        let key = key_of(field.name().as_bytes(), field.value().as_bytes());
        self.dynamic.entry(key).or_insert(field);
        true
    }

    pub fn clear(&mut self) {
        self.dynamic.clear();
    }

    fn find(&self, key: &[u8]) -> Option<Arc<HttpField>> {
        self.dynamic
            .get(key)
            .or_else(|| self.baseline.get(key))
            .cloned()
    }
}

fn write_key(key: &mut Vec<u8>, name: &[u8], value: &[u8]) {
    key.clear();
    key.extend(name.iter().map(u8::to_ascii_lowercase));
    key.extend_from_slice(b": ");
    key.extend(value.iter().map(u8::to_ascii_lowercase));
}

fn key_of(name: &[u8], value: &[u8]) -> Box<[u8]> {
    let mut key = Vec::with_capacity(name.len() + value.len() + 2);
    write_key(&mut key, name, value);
    key.into_boxed_slice()
}
