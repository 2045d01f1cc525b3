//! Entry: one notarized record inside a block.
//!
//! Entries are a closed set of kinds, each prefixed on the wire by a one-byte
//! tag so a decoder never has to guess the concrete type from raw bytes.
//!
//! Wire format: `kind (1) || body_len (8, big-endian) || body`

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::codec::{put_u64, Marshal, Reader, Unmarshal};
use crate::error::CoreError;
use crate::hash::{Hash, HASH_LEN};

/// Size of the tag and length prefix preceding every entry body.
pub const ENTRY_HEADER_LEN: u64 = 1 + 8;

/// The kind of entry, determining how the body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntryKind {
    /// Opaque application bytes.
    Data = 0x01,
    /// UTF-8 text.
    Text = 0x02,
    /// Digest of an externally held document.
    Digest = 0x03,
}

impl EntryKind {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Data),
            0x02 => Some(Self::Text),
            0x03 => Some(Self::Digest),
            _ => None,
        }
    }
}

/// A single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Entry {
    Data(Bytes),
    Text(String),
    Digest(Hash),
}

impl Entry {
    pub fn data(payload: impl Into<Bytes>) -> Self {
        Self::Data(payload.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn digest(hash: Hash) -> Self {
        Self::Digest(hash)
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Data(_) => EntryKind::Data,
            Self::Text(_) => EntryKind::Text,
            Self::Digest(_) => EntryKind::Digest,
        }
    }

    /// The body bytes as they appear on the wire.
    pub fn body(&self) -> &[u8] {
        match self {
            Self::Data(payload) => payload.as_ref(),
            Self::Text(text) => text.as_bytes(),
            Self::Digest(hash) => hash.as_ref(),
        }
    }

    /// Hash of this entry's encoding, the value folded into a block's salt.
    pub fn compute_hash(&self) -> Result<Hash, CoreError> {
        Hash::create(&[self])
    }
}

impl Marshal for Entry {
    fn marshalled_size(&self) -> u64 {
        ENTRY_HEADER_LEN + self.body().len() as u64
    }

    fn marshal_into(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        let body = self.body();
        buf.push(self.kind().to_u8());
        put_u64(buf, body.len() as u64);
        buf.extend_from_slice(body);
        Ok(())
    }
}

impl Unmarshal for Entry {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, CoreError> {
        let mut reader = Reader::new(data);

        let tag = reader.read_u8("entry kind")?;
        let kind = EntryKind::from_u8(tag)
            .ok_or_else(|| CoreError::DecodingFailed(format!("unknown entry kind: {:#04x}", tag)))?;

        let len = reader.read_u64("entry length")?;
        let body = reader.read_bytes("entry body", len)?;

        match kind {
            EntryKind::Data => Ok(Self::Data(Bytes::copy_from_slice(body))),
            EntryKind::Text => std::str::from_utf8(body)
                .map(|s| Self::Text(s.to_owned()))
                .map_err(|e| CoreError::DecodingFailed(format!("text entry: {}", e))),
            EntryKind::Digest => {
                if body.len() != HASH_LEN {
                    return Err(CoreError::DecodingFailed(format!(
                        "digest entry body is {} bytes, expected {}",
                        body.len(),
                        HASH_LEN
                    )));
                }
                Hash::unmarshal_binary(body).map(Self::Digest)
            }
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<Hash> for Entry {
    fn from(hash: Hash) -> Self {
        Self::Digest(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_roundtrip() {
        for kind in [EntryKind::Data, EntryKind::Text, EntryKind::Digest] {
            assert_eq!(EntryKind::from_u8(kind.to_u8()), Some(kind));
        }
        assert_eq!(EntryKind::from_u8(0x00), None);
        assert_eq!(EntryKind::from_u8(0x04), None);
    }

    #[test]
    fn test_text_wire_layout() {
        let bytes = Entry::text("A").marshal_binary().unwrap();
        assert_eq!(bytes, vec![0x02, 0, 0, 0, 0, 0, 0, 0, 1, b'A']);
        assert_eq!(Entry::text("A").marshalled_size(), 10);
    }

    #[test]
    fn test_each_kind_decodes() {
        let entries = [
            Entry::data(vec![0u8, 1, 2, 3]),
            Entry::text("hello"),
            Entry::digest(Hash::digest(b"document")),
            Entry::data(Vec::new()),
        ];
        for entry in entries {
            let bytes = entry.marshal_binary().unwrap();
            assert_eq!(bytes.len() as u64, entry.marshalled_size());
            assert_eq!(Entry::unmarshal_binary(&bytes).unwrap(), entry);
        }
    }

    #[test]
    fn test_decode_stops_at_own_size() {
        let first = Entry::text("first");
        let mut bytes = first.marshal_binary().unwrap();
        bytes.extend(Entry::text("second").marshal_binary().unwrap());

        let decoded = Entry::unmarshal_binary(&bytes).unwrap();
        assert_eq!(decoded, first);
        let rest = &bytes[decoded.marshalled_size() as usize..];
        assert_eq!(Entry::unmarshal_binary(rest).unwrap(), Entry::text("second"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = Entry::unmarshal_binary(&[0x7f, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, CoreError::DecodingFailed(_)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = Entry::unmarshal_binary(&[0x02, 0, 0, 0, 0, 0, 0, 0, 2, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CoreError::DecodingFailed(_)));
    }

    #[test]
    fn test_short_digest_rejected() {
        let err = Entry::unmarshal_binary(&[0x03, 0, 0, 0, 0, 0, 0, 0, 1, 0xaa]).unwrap_err();
        assert!(matches!(err, CoreError::DecodingFailed(_)));
    }

    #[test]
    fn test_truncated_body() {
        let bytes = Entry::text("truncated").marshal_binary().unwrap();
        let err = Entry::unmarshal_binary(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TruncatedInput {
                field: "entry body",
                ..
            }
        ));
    }

    #[test]
    fn test_hash_covers_kind_tag() {
        // Same body bytes, different kinds
        let as_data = Entry::data(b"abc".to_vec());
        let as_text = Entry::text("abc");
        assert_ne!(
            as_data.compute_hash().unwrap(),
            as_text.compute_hash().unwrap()
        );
    }
}
