use core::fmt;

use crate::error::BadMessage;

//
//
//
const PORT_MAX: u32 = u16::MAX as u32;

/// Host and optional port taken from a `Host` field value.
///
/// The host is kept verbatim; IPv6 literals keep their brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPort {
    host: String,
    port: Option<u16>,
}

impl HostPort {
    pub fn parse(authority: &str) -> Result<Self, BadMessage> {
        if authority.is_empty() {
            return Ok(Self {
                host: String::new(),
                port: None,
            });
        }

        if authority.starts_with('[') {
            let close = authority.rfind(']').ok_or(BadMessage::BadHost)?;
            let (host, rest) = authority.split_at(close + 1);
            let port = match rest.strip_prefix(':') {
                Some(port) => Some(parse_port(port)?),
                None if rest.is_empty() => None,
                None => return Err(BadMessage::BadHost),
            };
            return Ok(Self {
                host: host.to_owned(),
                port,
            });
        }

        match (authority.find(':'), authority.rfind(':')) {
            (Some(first), Some(last)) if first != last => Ok(Self {
                host: format!("[{authority}]"),
                port: None,
            }),
            (Some(_), Some(colon)) => {
                let host = &authority[..colon];
                if host.trim().is_empty() {
                    return Err(BadMessage::BadHost);
                }
                Ok(Self {
                    host: host.to_owned(),
                    port: Some(parse_port(&authority[colon + 1..])?),
                })
            }
            _ => Ok(Self {
                host: authority.to_owned(),
                port: None,
            }),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
    pub fn port(&self) -> Option<u16> {
        self.port
    }
    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }
}

fn parse_port(s: &str) -> Result<u16, BadMessage> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BadMessage::BadHost);
    }
    s.bytes()
        .try_fold(0_u32, |acc, b| {
            let acc = acc * 10 + u32::from(b - b'0');
            (acc <= PORT_MAX).then_some(acc)
        })
        .map(|port| port as u16)
        .ok_or(BadMessage::BadHost)
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => f.write_str(&self.host),
        }
    }
}
