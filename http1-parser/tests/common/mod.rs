#![allow(dead_code)]

use std::sync::Arc;

use http1_parser::{
    bytes::Bytes,
    http::{Method, StatusCode, Version},
    BadMessage, ComplianceSection, HttpCompliance, HttpField, HttpHandler, HttpParser,
    HttpParserConfig, State,
};

//
//
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartRequest(String, String, Version),
    StartResponse(Version, u16, Option<String>),
    Header(String, String),
    HeaderComplete,
    Content(Vec<u8>),
    ContentComplete,
    Trailer(String, String),
    MessageComplete,
    EarlyEof,
    BadMessage(String),
}

/// Records every event. Consecutive content events are merged so the log
/// does not depend on how the input was split.
#[derive(Debug)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub fields: Vec<Arc<HttpField>>,
    pub trailers: Vec<Arc<HttpField>>,
    pub violations: Vec<(ComplianceSection, String)>,
    pub failure: Option<BadMessage>,
    pub cache_size: usize,
    pub pause_header_complete: bool,
    pub pause_content: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            events: vec![],
            fields: vec![],
            trailers: vec![],
            violations: vec![],
            failure: None,
            cache_size: 1024,
            pause_header_complete: false,
            pause_content: false,
        }
    }
}

impl Recorder {
    pub fn with_cache_size(cache_size: usize) -> Self {
        Self {
            cache_size,
            ..Default::default()
        }
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name().to_owned(), f.value().to_owned()))
            .collect()
    }

    pub fn content(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Content(c) => Some(c.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    pub fn bad_reason(&self) -> Option<String> {
        self.failure.as_ref().map(BadMessage::reason)
    }

    pub fn sections(&self) -> Vec<ComplianceSection> {
        self.violations.iter().map(|(s, _)| *s).collect()
    }
}

impl HttpHandler for Recorder {
    fn start_request(&mut self, method: &Method, uri: &[u8], version: Version) -> bool {
        self.events.push(Event::StartRequest(
            method.as_str().to_owned(),
            String::from_utf8_lossy(uri).into_owned(),
            version,
        ));
        false
    }
    fn start_response(&mut self, version: Version, status: StatusCode, reason: Option<&str>) -> bool {
        self.events.push(Event::StartResponse(
            version,
            status.as_u16(),
            reason.map(ToOwned::to_owned),
        ));
        false
    }
    fn parsed_header(&mut self, field: Arc<HttpField>) {
        self.events
            .push(Event::Header(field.name().to_owned(), field.value().to_owned()));
        self.fields.push(field);
    }
    fn header_complete(&mut self) -> bool {
        self.events.push(Event::HeaderComplete);
        self.pause_header_complete
    }
    fn content(&mut self, chunk: Bytes) -> bool {
        assert!(!chunk.is_empty());
        match self.events.last_mut() {
            Some(Event::Content(prev)) => prev.extend_from_slice(&chunk),
            _ => self.events.push(Event::Content(chunk.to_vec())),
        }
        self.pause_content
    }
    fn content_complete(&mut self) -> bool {
        self.events.push(Event::ContentComplete);
        false
    }
    fn parsed_trailer(&mut self, field: Arc<HttpField>) {
        self.events
            .push(Event::Trailer(field.name().to_owned(), field.value().to_owned()));
        self.trailers.push(field);
    }
    fn message_complete(&mut self) -> bool {
        self.events.push(Event::MessageComplete);
        true
    }
    fn early_eof(&mut self) {
        self.events.push(Event::EarlyEof);
    }
    fn bad_message(&mut self, failure: &BadMessage) {
        assert!(self.failure.is_none(), "bad_message fired twice");
        self.events.push(Event::BadMessage(failure.reason()));
        self.failure = Some(failure.clone());
    }
    fn header_cache_size(&self) -> usize {
        self.cache_size
    }
    fn on_compliance_violation(
        &mut self,
        _compliance: &HttpCompliance,
        section: ComplianceSection,
        details: &str,
    ) {
        self.violations.push((section, details.to_owned()));
    }
}

//
//
//
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn request_parser(compliance: HttpCompliance) -> HttpParser<Recorder> {
    init_logger();
    let mut config = HttpParserConfig::default();
    config.set_compliance(compliance);
    HttpParser::request_with_config(Recorder::default(), config)
}

pub fn response_parser(compliance: HttpCompliance) -> HttpParser<Recorder> {
    init_logger();
    let mut config = HttpParserConfig::default();
    config.set_compliance(compliance);
    HttpParser::response_with_config(Recorder::default(), config)
}

/// Feeds `input`, resetting after each complete message that is followed by
/// more bytes.
pub fn parse_all<H: HttpHandler>(parser: &mut HttpParser<H>, mut input: &[u8]) {
    loop {
        let before = input.len();
        let handle = parser.parse_next(&mut input);

        if parser.is_state(State::End) && !input.is_empty() {
            parser.reset();
            continue;
        }
        if input.is_empty() || matches!(parser.state(), State::Close | State::Closed) {
            break;
        }
        if !handle && input.len() == before {
            break;
        }
    }
}

pub fn eof<H: HttpHandler>(parser: &mut HttpParser<H>) {
    parser.at_eof();
    parser.parse_next(&mut &b""[..]);
}

pub fn parse_request(compliance: HttpCompliance, input: &[u8]) -> Recorder {
    let mut parser = request_parser(compliance);
    parse_all(&mut parser, input);
    parser.into_handler()
}

pub fn parse_response(compliance: HttpCompliance, input: &[u8]) -> Recorder {
    let mut parser = response_parser(compliance);
    parse_all(&mut parser, input);
    parser.into_handler()
}

pub fn header(name: &str, value: &str) -> Event {
    Event::Header(name.to_owned(), value.to_owned())
}
