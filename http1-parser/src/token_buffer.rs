use core::cmp;

//
//
//
const INITIAL_CAPACITY: usize = 128;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("token exceeds {0} bytes")]
pub struct TokenBufferOverflow(pub usize);

/// Bounded, reusable accumulator for the token currently being built.
///
/// The mark remembers the end of the last significant byte so trailing
/// whitespace can be dropped without a second scan.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    buf: Vec<u8>,
    max_len: usize,
    mark: usize,
}

impl TokenBuffer {
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cmp::min(max_len, INITIAL_CAPACITY)),
            max_len,
            mark: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.mark = 0;
    }

    pub fn push(&mut self, b: u8) -> Result<(), TokenBufferOverflow> {
        if self.buf.len() >= self.max_len {
            return Err(TokenBufferOverflow(self.max_len));
        }
        self.buf.push(b);
        Ok(())
    }

    pub fn push_marked(&mut self, b: u8) -> Result<(), TokenBufferOverflow> {
        self.push(b)?;
        self.mark = self.buf.len();
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..]
    }

    /// Bytes up to the last marked push.
    pub fn trimmed(&self) -> &[u8] {
        &self.buf[..self.mark]
    }

    /// Drops everything after the mark.
    pub fn trim_end(&mut self) {
        self.buf.truncate(self.mark);
    }
}
