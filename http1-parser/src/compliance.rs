//! Compliance sections and the profiles built from them.
//!
//! A profile holds the set of sections it *requires*. When the parser meets a
//! construct governed by a section the profile does not require, the
//! construct is tolerated and reported through
//! [`HttpHandler::on_compliance_violation`](crate::handler::HttpHandler::on_compliance_violation).

use core::{fmt, str::FromStr};
use std::{borrow::Cow, env};

//
//
//
pub const CUSTOM_ENV_PREFIX: &str = "HTTP1_COMPLIANCE_CUSTOM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceSection {
    CaseInsensitiveFieldValueCache,
    MethodCaseSensitive,
    FieldColon,
    FieldNameCaseInsensitive,
    NoWsAfterFieldName,
    NoFieldFolding,
    NoHttp09,
    TransferEncodingWithContentLength,
    MultipleContentLengths,
}

impl ComplianceSection {
    pub const ALL: [ComplianceSection; 9] = [
        Self::CaseInsensitiveFieldValueCache,
        Self::MethodCaseSensitive,
        Self::FieldColon,
        Self::FieldNameCaseInsensitive,
        Self::NoWsAfterFieldName,
        Self::NoFieldFolding,
        Self::NoHttp09,
        Self::TransferEncodingWithContentLength,
        Self::MultipleContentLengths,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CaseInsensitiveFieldValueCache => "CASE_INSENSITIVE_FIELD_VALUE_CACHE",
            Self::MethodCaseSensitive => "METHOD_CASE_SENSITIVE",
            Self::FieldColon => "FIELD_COLON",
            Self::FieldNameCaseInsensitive => "FIELD_NAME_CASE_INSENSITIVE",
            Self::NoWsAfterFieldName => "NO_WS_AFTER_FIELD_NAME",
            Self::NoFieldFolding => "NO_FIELD_FOLDING",
            Self::NoHttp09 => "NO_HTTP_0_9",
            Self::TransferEncodingWithContentLength => "TRANSFER_ENCODING_WITH_CONTENT_LENGTH",
            Self::MultipleContentLengths => "MULTIPLE_CONTENT_LENGTHS",
        }
    }
}

impl fmt::Display for ComplianceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComplianceSection {
    type Err = ComplianceSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|section| section.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ComplianceSpecError::UnknownSection(s.to_owned()))
    }
}

//
//
//
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceSpecError {
    #[error("empty compliance spec")]
    Empty,
    #[error("unknown compliance base {0:?}")]
    UnknownBase(String),
    #[error("unknown compliance section {0:?}")]
    UnknownSection(String),
}

/// Bitmask of [`ComplianceSection`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComplianceSections(u16);

impl ComplianceSections {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < ComplianceSection::ALL.len() {
            bits |= ComplianceSection::ALL[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn with(self, section: ComplianceSection) -> Self {
        Self(self.0 | section.bit())
    }
    pub const fn without(self, section: ComplianceSection) -> Self {
        Self(self.0 & !section.bit())
    }

    pub const fn contains(&self, section: ComplianceSection) -> bool {
        self.0 & section.bit() != 0
    }

    pub fn insert(&mut self, section: ComplianceSection) {
        *self = self.with(section);
    }
    pub fn remove(&mut self, section: ComplianceSection) {
        *self = self.without(section);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ComplianceSection> + '_ {
        ComplianceSection::ALL
            .iter()
            .copied()
            .filter(move |section| self.contains(*section))
    }

    /// Parses `BASE[,[-]SECTION]*` where BASE is `0`, `*`, `RFC2616` or `RFC7230`.
    pub fn from_spec(spec: &str) -> Result<Self, ComplianceSpecError> {
        let mut elements = spec.split(',').map(str::trim);

        let mut sections = match elements.next().filter(|s| !s.is_empty()) {
            Some("0") => Self::empty(),
            Some("*") | Some("RFC7230") => Self::all(),
            Some("RFC2616") => RFC2616_SECTIONS,
            Some(other) => return Err(ComplianceSpecError::UnknownBase(other.to_owned())),
            None => return Err(ComplianceSpecError::Empty),
        };

        for element in elements.filter(|s| !s.is_empty()) {
            match element.strip_prefix('-') {
                Some(name) => sections.remove(name.parse()?),
                None => sections.insert(element.strip_prefix('+').unwrap_or(element).parse()?),
            }
        }

        Ok(sections)
    }
}

impl fmt::Debug for ComplianceSections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const RFC2616_SECTIONS: ComplianceSections = ComplianceSections::all()
    .without(ComplianceSection::NoFieldFolding)
    .without(ComplianceSection::NoHttp09);

//
//
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCompliance {
    name: Cow<'static, str>,
    sections: ComplianceSections,
}

impl HttpCompliance {
    /// Behaviour from before RFC2616 and RFC7230.
    pub const LEGACY: Self = Self::from_static(
        "LEGACY",
        ComplianceSections::empty().with(ComplianceSection::MethodCaseSensitive),
    );
    pub const RFC2616_LEGACY: Self = Self::from_static(
        "RFC2616_LEGACY",
        RFC2616_SECTIONS
            .without(ComplianceSection::FieldColon)
            .without(ComplianceSection::MethodCaseSensitive)
            .without(ComplianceSection::TransferEncodingWithContentLength)
            .without(ComplianceSection::MultipleContentLengths),
    );
    pub const RFC2616: Self = Self::from_static("RFC2616", RFC2616_SECTIONS);
    pub const RFC7230_LEGACY: Self = Self::from_static(
        "RFC7230_LEGACY",
        ComplianceSections::all().without(ComplianceSection::MethodCaseSensitive),
    );
    pub const RFC7230: Self = Self::from_static("RFC7230", ComplianceSections::all());

    const fn from_static(name: &'static str, sections: ComplianceSections) -> Self {
        Self {
            name: Cow::Borrowed(name),
            sections,
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, sections: ComplianceSections) -> Self {
        Self {
            name: name.into(),
            sections,
        }
    }

    /// `CUSTOM0`..`CUSTOM3`, read from `HTTP1_COMPLIANCE_CUSTOM<n>` (default `*`).
    pub fn custom(index: u8) -> Self {
        let var = format!("{CUSTOM_ENV_PREFIX}{index}");
        let sections = match env::var(&var) {
            Ok(spec) => ComplianceSections::from_spec(&spec).unwrap_or_else(|err| {
                log::warn!("ignoring {}={:?}: {}", var, spec, err);
                ComplianceSections::all()
            }),
            Err(_) => ComplianceSections::all(),
        };
        Self::new(format!("CUSTOM{index}"), sections)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn sections(&self) -> ComplianceSections {
        self.sections
    }
    pub fn contains(&self, section: ComplianceSection) -> bool {
        self.sections.contains(section)
    }

    pub fn with_section(mut self, section: ComplianceSection) -> Self {
        self.sections.insert(section);
        self
    }
    pub fn without_section(mut self, section: ComplianceSection) -> Self {
        self.sections.remove(section);
        self
    }
}

impl Default for HttpCompliance {
    fn default() -> Self {
        Self::RFC7230_LEGACY
    }
}

impl fmt::Display for HttpCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for HttpCompliance {
    type Err = ComplianceSpecError;

    /// A profile name, or a section spec accepted by [`ComplianceSections::from_spec`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "LEGACY" => Ok(Self::LEGACY),
            "RFC2616_LEGACY" => Ok(Self::RFC2616_LEGACY),
            "RFC2616" => Ok(Self::RFC2616),
            "RFC7230_LEGACY" => Ok(Self::RFC7230_LEGACY),
            "RFC7230" => Ok(Self::RFC7230),
            "CUSTOM0" => Ok(Self::custom(0)),
            "CUSTOM1" => Ok(Self::custom(1)),
            "CUSTOM2" => Ok(Self::custom(2)),
            "CUSTOM3" => Ok(Self::custom(3)),
            spec => Ok(Self::new(spec.to_owned(), ComplianceSections::from_spec(spec)?)),
        }
    }
}
