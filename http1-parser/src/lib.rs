//! Incremental, push-style HTTP/1.x message parser.
//!
//! Bytes are fed through [`HttpParser::parse_next`] in windows of any size;
//! the parser keeps its own state between calls and reports what it finds to
//! an [`HttpHandler`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use http1_parser::{bytes::Bytes, BadMessage, HttpField, HttpHandler, HttpParser};
//!
//! #[derive(Default)]
//! struct Fields(Vec<String>);
//! impl HttpHandler for Fields {
//!     fn parsed_header(&mut self, field: Arc<HttpField>) {
//!         self.0.push(field.to_string());
//!     }
//!     fn header_complete(&mut self) -> bool {
//!         false
//!     }
//!     fn content(&mut self, _chunk: Bytes) -> bool {
//!         false
//!     }
//!     fn content_complete(&mut self) -> bool {
//!         false
//!     }
//!     fn message_complete(&mut self) -> bool {
//!         true
//!     }
//!     fn early_eof(&mut self) {}
//!     fn bad_message(&mut self, _failure: &BadMessage) {}
//! }
//!
//! let mut parser = HttpParser::request(Fields::default());
//! let mut buf = &b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"[..];
//! assert!(parser.parse_next(&mut buf));
//! assert_eq!(parser.handler().0, vec!["Host: localhost"]);
//! ```

pub mod body_framing;
mod body_parser;
mod chunked_body_parser;
pub mod compliance;
pub mod config;
pub mod error;
pub mod field;
pub mod field_cache;
pub mod handler;
mod head_parser;
pub mod host_port;
pub mod parser;
mod request_head_parser;
mod response_head_parser;
pub mod token;
pub mod token_buffer;

pub use bytes;
pub use http;

pub use body_framing::BodyFraming;
pub use compliance::{ComplianceSection, ComplianceSections, HttpCompliance};
pub use config::HttpParserConfig;
pub use error::BadMessage;
pub use field::HttpField;
pub use field_cache::FieldCache;
pub use handler::HttpHandler;
pub use host_port::HostPort;
pub use parser::{HttpParser, State};

//
//
//
pub const SP: u8 = b' ';
pub const CHUNKED: &str = "chunked";
