use http::StatusCode;

use crate::{compliance::ComplianceSection, error::BadMessage, CHUNKED};

//
//
//
const CONTENT_LENGTH_MAX: u64 = i64::MAX as u64;

// ref https://tools.ietf.org/html/rfc7230#section-3.3.3
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum BodyFraming {
    #[default]
    Unknown,
    NoBody,
    ContentLength(u64),
    Chunked,
    EofContent,
}

/// The codings named by all `Transfer-Encoding` fields of a message, folded.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TransferCoding {
    #[default]
    Absent,
    /// `chunked` is the final coding.
    Chunked,
    /// Codings present, none of them `chunked`.
    Unchunked,
    /// `chunked` repeated or followed by another coding.
    Invalid,
}

impl TransferCoding {
    pub fn push(&mut self, coding: &str) {
        let chunked = coding.eq_ignore_ascii_case(CHUNKED);
        *self = match (*self, chunked) {
            (Self::Invalid, _) | (Self::Chunked, _) => Self::Invalid,
            (_, true) => Self::Chunked,
            (_, false) => Self::Unchunked,
        };
    }
}

/// Framing related facts collected while the fields of a head are parsed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct FramingFields {
    content_length: Option<u64>,
    transfer_coding: TransferCoding,
    host: bool,
}

impl FramingFields {
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }
    pub fn transfer_coding(&self) -> TransferCoding {
        self.transfer_coding
    }
    pub fn has_host(&self) -> bool {
        self.host
    }

    /// Records a `Content-Length` value.
    ///
    /// Returns true when the value repeats one already seen; distinct values
    /// are an error.
    pub fn add_content_length(&mut self, value: &str) -> Result<bool, BadMessage> {
        let mut repeated = false;
        for element in value.split(',').map(|s| s.trim_matches(|c| c == ' ' || c == '\t')) {
            let n = parse_content_length(element)?;
            match self.content_length {
                Some(prev) if prev != n => return Err(BadMessage::MultipleContentLengths),
                Some(_) => repeated = true,
                None => self.content_length = Some(n),
            }
        }
        Ok(repeated)
    }

    pub fn add_transfer_encoding(&mut self, value: &str) {
        value
            .split(',')
            .map(|s| s.trim_matches(|c| c == ' ' || c == '\t'))
            .filter(|s| !s.is_empty())
            .for_each(|coding| self.transfer_coding.push(coding));
    }

    pub fn set_host(&mut self) {
        self.host = true;
    }
}

fn parse_content_length(s: &str) -> Result<u64, BadMessage> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BadMessage::InvalidContentLength);
    }
    s.bytes()
        .try_fold(0_u64, |acc, b| {
            acc.checked_mul(10)?
                .checked_add(u64::from(b - b'0'))
                .filter(|n| *n <= CONTENT_LENGTH_MAX)
        })
        .ok_or(BadMessage::InvalidContentLength)
}

//
//
//
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MessageKind {
    Request,
    Response {
        status: StatusCode,
        head_response: bool,
    },
}

pub trait BodyFramingDetector {
    /// `tolerate` is asked whether a construct governed by a compliance
    /// section may pass.
    fn detect<F>(&self, tolerate: F) -> Result<BodyFraming, BadMessage>
    where
        F: FnMut(ComplianceSection, &str) -> bool;
}
impl BodyFramingDetector for (&FramingFields, &MessageKind) {
    fn detect<F>(&self, mut tolerate: F) -> Result<BodyFraming, BadMessage>
    where
        F: FnMut(ComplianceSection, &str) -> bool,
    {
        let (fields, kind) = *self;

        if let MessageKind::Response {
            status,
            head_response,
        } = kind
        {
            if *head_response
                || status.is_informational()
                || *status == StatusCode::NO_CONTENT
                || *status == StatusCode::NOT_MODIFIED
            {
                return Ok(BodyFraming::NoBody);
            }
        }

        if fields.transfer_coding != TransferCoding::Absent {
            if fields.content_length.is_some()
                && !tolerate(
                    ComplianceSection::TransferEncodingWithContentLength,
                    "Transfer-Encoding and Content-Length",
                )
            {
                return Err(BadMessage::TransferEncodingWithContentLength);
            }

            return match (fields.transfer_coding, kind) {
                (TransferCoding::Chunked, _) => Ok(BodyFraming::Chunked),
                (TransferCoding::Unchunked, MessageKind::Response { .. }) => {
                    Ok(BodyFraming::EofContent)
                }
                _ => Err(BadMessage::BadTransferEncoding),
            };
        }

        match (fields.content_length, kind) {
            (Some(0), _) => Ok(BodyFraming::NoBody),
            (Some(n), _) => Ok(BodyFraming::ContentLength(n)),
            (None, MessageKind::Request) => Ok(BodyFraming::NoBody),
            (None, MessageKind::Response { .. }) => Ok(BodyFraming::EofContent),
        }
    }
}
