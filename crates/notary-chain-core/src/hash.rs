//! Blake3 digests used for block chaining and entry salting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::codec::{Marshal, Unmarshal};
use crate::error::CoreError;

/// Length of a digest in bytes, both in memory and on the wire.
pub const HASH_LEN: usize = 32;

/// A 32-byte Blake3 digest.
///
/// Encoded on the wire as the raw digest bytes with no prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// The all-zero digest: seed of every salt and parent of the origin block.
    pub const EMPTY: Self = Self([0u8; HASH_LEN]);

    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Blake3 of raw bytes.
    pub fn digest(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Hash the concatenated encodings of one or more values, in order.
    ///
    /// Fails with [`CoreError::HashingFailed`] if any input cannot be
    /// marshaled or if no inputs are given.
    pub fn create(inputs: &[&dyn Marshal]) -> Result<Self, CoreError> {
        if inputs.is_empty() {
            return Err(CoreError::HashingFailed("no inputs".into()));
        }

        let mut hasher = blake3::Hasher::new();
        let mut scratch = Vec::new();
        for (i, input) in inputs.iter().enumerate() {
            scratch.clear();
            input
                .marshal_into(&mut scratch)
                .map_err(|e| CoreError::HashingFailed(format!("input {}: {}", i, e)))?;
            hasher.update(&scratch);
        }
        Ok(Self(*hasher.finalize().as_bytes()))
    }

    pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for Hash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl Marshal for Hash {
    fn marshalled_size(&self) -> u64 {
        HASH_LEN as u64
    }

    fn marshal_into(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        buf.extend_from_slice(&self.0);
        Ok(())
    }
}

impl Unmarshal for Hash {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, CoreError> {
        if data.len() < HASH_LEN {
            return Err(CoreError::TruncatedInput {
                field: "hash",
                needed: HASH_LEN as u64,
                available: data.len() as u64,
            });
        }
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(&data[..HASH_LEN]);
        Ok(Self(arr))
    }
}

// Serialized as lowercase hex so structured emitters stay readable.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
