use core::fmt;

//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Cntl,
    Htab,
    Lf,
    Cr,
    Space,
    Colon,
    Digit,
    Alpha,
    Tchar,
    Vchar,
    Otext,
}

impl TokenKind {
    pub const fn of(b: u8) -> Self {
        match b {
            b'\t' => Self::Htab,
            b'\n' => Self::Lf,
            b'\r' => Self::Cr,
            b' ' => Self::Space,
            b':' => Self::Colon,
            b'0'..=b'9' => Self::Digit,
            b'a'..=b'z' | b'A'..=b'Z' => Self::Alpha,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
            | b'`' | b'|' | b'~' => Self::Tchar,
            0x21..=0x7e => Self::Vchar,
            0x80..=0xff => Self::Otext,
            _ => Self::Cntl,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cntl => "CNTL",
            Self::Htab => "HTAB",
            Self::Lf => "LF",
            Self::Cr => "CR",
            Self::Space => "SPACE",
            Self::Colon => "COLON",
            Self::Digit => "DIGIT",
            Self::Alpha => "ALPHA",
            Self::Tchar => "TCHAR",
            Self::Vchar => "VCHAR",
            Self::Otext => "OTEXT",
        }
    }
}

/// A classified input octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    byte: u8,
    kind: TokenKind,
}

impl Token {
    pub const fn new(byte: u8) -> Self {
        Self {
            byte,
            kind: TokenKind::of(byte),
        }
    }

    pub fn byte(&self) -> u8 {
        self.byte
    }
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// `tchar` of RFC 7230, the alphabet of methods and field names.
    pub fn is_tchar(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Alpha | TokenKind::Digit | TokenKind::Tchar
        )
    }

    /// Visible octets allowed inside a request target, version or field value.
    pub fn is_visible(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Alpha
                | TokenKind::Digit
                | TokenKind::Tchar
                | TokenKind::Vchar
                | TokenKind::Colon
                | TokenKind::Otext
        )
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Space | TokenKind::Htab)
    }

    pub fn hex_value(&self) -> Option<u8> {
        match self.byte {
            b'0'..=b'9' => Some(self.byte - b'0'),
            b'a'..=b'f' => Some(self.byte - b'a' + 10),
            b'A'..=b'F' => Some(self.byte - b'A' + 10),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Space
            | TokenKind::Colon
            | TokenKind::Alpha
            | TokenKind::Digit
            | TokenKind::Tchar
            | TokenKind::Vchar => write!(f, "{}='{}'", self.kind.as_str(), self.byte as char),
            TokenKind::Cr => f.write_str("CR=\\r"),
            TokenKind::Lf => f.write_str("LF=\\n"),
            _ => write!(f, "{}=0x{:x}", self.kind.as_str(), self.byte),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(TokenKind::of(b'G'), TokenKind::Alpha);
        assert_eq!(TokenKind::of(b'7'), TokenKind::Digit);
        assert_eq!(TokenKind::of(b'~'), TokenKind::Tchar);
        assert_eq!(TokenKind::of(b'"'), TokenKind::Vchar);
        assert_eq!(TokenKind::of(b'@'), TokenKind::Vchar);
        assert_eq!(TokenKind::of(b':'), TokenKind::Colon);
        assert_eq!(TokenKind::of(0x7f), TokenKind::Cntl);
        assert_eq!(TokenKind::of(0x00), TokenKind::Cntl);
        assert_eq!(TokenKind::of(0xe6), TokenKind::Otext);
        assert_eq!(TokenKind::of(b'\t'), TokenKind::Htab);
    }

    #[test]
    fn display() {
        assert_eq!(Token::new(b' ').to_string(), "SPACE=' '");
        assert_eq!(Token::new(b'\t').to_string(), "HTAB=0x9");
        assert_eq!(Token::new(0x01).to_string(), "CNTL=0x1");
        assert_eq!(Token::new(b'\n').to_string(), "LF=\\n");
        assert_eq!(Token::new(b'{').to_string(), "VCHAR='{'");
    }

    #[test]
    fn hex_value() {
        assert_eq!(Token::new(b'a').hex_value(), Some(10));
        assert_eq!(Token::new(b'F').hex_value(), Some(15));
        assert_eq!(Token::new(b'9').hex_value(), Some(9));
        assert_eq!(Token::new(b'g').hex_value(), None);
    }
}
