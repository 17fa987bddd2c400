//! Bounds-checked byte-window reader.
//!
//! All access to the input buffer goes through these primitives; absolute
//! offset arithmetic elsewhere is only performed on values this module or
//! the layout decoder has already validated.  Every out-of-window read is
//! a `truncated` error.  All multi-byte values are little-endian.

use crate::errors::{ParseError, ERR_TRUNCATED};

/// Immutable view over the serialized value.  Stateless apart from the
/// borrowed buffer; offsets are always absolute.
#[derive(Clone, Copy)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fail with `truncated` unless the buffer holds at least `end` bytes.
    pub fn require(&self, end: usize) -> Result<(), ParseError> {
        if end > self.buf.len() {
            return Err(ParseError::new(
                ERR_TRUNCATED,
                format!("need {} bytes, have {}", end, self.buf.len()),
            ));
        }
        Ok(())
    }

    pub fn read_u8(&self, off: usize) -> Result<u8, ParseError> {
        self.require(off.checked_add(1).ok_or_else(overflow)?)?;
        Ok(self.buf[off])
    }

    pub fn read_u32_le(&self, off: usize) -> Result<u32, ParseError> {
        let end = off.checked_add(4).ok_or_else(overflow)?;
        self.require(end)?;
        Ok(u32::from_le_bytes([
            self.buf[off],
            self.buf[off + 1],
            self.buf[off + 2],
            self.buf[off + 3],
        ]))
    }

    pub fn read_f64_le(&self, off: usize) -> Result<f64, ParseError> {
        let end = off.checked_add(8).ok_or_else(overflow)?;
        self.require(end)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.buf[off..end]);
        Ok(f64::from_le_bytes(bytes))
    }
}

fn overflow() -> ParseError {
    ParseError::new(ERR_TRUNCATED, "offset arithmetic overflow")
}
