use std::env;

use crate::compliance::HttpCompliance;

//
//
//
const TOKEN_MAX_LEN: usize = 4096;
const HEADERS_MAX_LEN: usize = 8192;

pub const COMPLIANCE_ENV: &str = "HTTP1_PARSER_COMPLIANCE";
pub const HEADERS_MAX_LEN_ENV: &str = "HTTP1_PARSER_HEADERS_MAX_LEN";

//
//
//
#[derive(Debug, Clone)]
pub struct HttpParserConfig {
    token_max_len: usize,
    headers_max_len: usize,
    compliance: HttpCompliance,
}
impl Default for HttpParserConfig {
    fn default() -> Self {
        HttpParserConfig {
            token_max_len: TOKEN_MAX_LEN,
            headers_max_len: HEADERS_MAX_LEN,
            compliance: HttpCompliance::default(),
        }
    }
}
impl HttpParserConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Defaults overlaid with `HTTP1_PARSER_COMPLIANCE` and
    /// `HTTP1_PARSER_HEADERS_MAX_LEN`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(value) = env::var(COMPLIANCE_ENV) {
            match value.parse::<HttpCompliance>() {
                Ok(compliance) => {
                    config.set_compliance(compliance);
                }
                Err(err) => log::warn!("ignoring {}={:?}: {}", COMPLIANCE_ENV, value, err),
            }
        }
        if let Ok(value) = env::var(HEADERS_MAX_LEN_ENV) {
            match value.trim().parse::<usize>() {
                Ok(n) => {
                    config.set_headers_max_len(n);
                }
                Err(err) => log::warn!("ignoring {}={:?}: {}", HEADERS_MAX_LEN_ENV, value, err),
            }
        }

        config
    }

    pub fn set_token_max_len(&mut self, value: usize) -> &mut Self {
        self.token_max_len = value;
        self
    }
    pub fn get_token_max_len(&self) -> usize {
        self.token_max_len
    }
    /// Cap on start line plus fields; 0 disables the check.
    pub fn set_headers_max_len(&mut self, value: usize) -> &mut Self {
        self.headers_max_len = value;
        self
    }
    pub fn get_headers_max_len(&self) -> usize {
        self.headers_max_len
    }
    pub fn set_compliance(&mut self, value: HttpCompliance) -> &mut Self {
        self.compliance = value;
        self
    }
    pub fn get_compliance(&self) -> &HttpCompliance {
        &self.compliance
    }
}
