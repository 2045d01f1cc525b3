//! Binary marshal contracts and a bounds-checked read cursor.
//!
//! Every wire value reports its own encoded size, so a decoder can walk a
//! flat buffer field by field without any outer framing. Multi-byte integers
//! are big-endian with no padding.

use crate::error::CoreError;

/// A value with a canonical binary encoding.
pub trait Marshal {
    /// Exact number of bytes [`Marshal::marshal_into`] appends.
    fn marshalled_size(&self) -> u64;

    /// Append the encoding to `buf`.
    ///
    /// Implementations must leave `buf` unchanged when they return an error.
    fn marshal_into(&self, buf: &mut Vec<u8>) -> Result<(), CoreError>;

    /// Encode into a fresh buffer.
    fn marshal_binary(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::with_capacity(usize::try_from(self.marshalled_size()).unwrap_or(0));
        self.marshal_into(&mut buf)?;
        Ok(buf)
    }
}

/// A value that can be decoded from the front of a byte buffer.
///
/// Trailing bytes after the value are ignored; callers advance by the
/// decoded value's [`Marshal::marshalled_size`].
pub trait Unmarshal: Sized {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, CoreError>;
}

/// Append a big-endian `u64`.
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// A forward-only cursor over an input buffer.
///
/// Every read is bounds-checked and reports [`CoreError::TruncatedInput`]
/// naming the field that ran short.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread tail of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Consume exactly `len` bytes.
    pub fn read_bytes(&mut self, field: &'static str, len: u64) -> Result<&'a [u8], CoreError> {
        let available = self.remaining().len() as u64;
        if len > available {
            return Err(CoreError::TruncatedInput {
                field,
                needed: len,
                available,
            });
        }
        let start = self.pos;
        self.pos += len as usize;
        Ok(&self.data[start..self.pos])
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, CoreError> {
        Ok(self.read_bytes(field, 1)?[0])
    }

    /// Read a big-endian `u64` (always 8 bytes).
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, CoreError> {
        let bytes = self.read_bytes(field, 8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(arr))
    }

    /// Decode one self-describing value and advance past it.
    pub fn decode<T: Marshal + Unmarshal>(&mut self, field: &'static str) -> Result<T, CoreError> {
        let value = T::unmarshal_binary(self.remaining())?;
        self.read_bytes(field, value.marshalled_size())?;
        Ok(value)
    }
}
