//! Error types for Notary Chain Core.

use thiserror::Error;

use crate::hash::Hash;

/// Core errors that can occur while building, encoding or decoding blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid chain: {0}")]
    InvalidChain(String),

    #[error("hashing failed: {0}")]
    HashingFailed(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("decoding failed: {0}")]
    DecodingFailed(String),

    #[error("truncated input reading {field}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        field: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("block id space exhausted")]
    SequenceExhausted,
}

/// Validation errors for block contents and chain linkage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("salt mismatch: stored {expected:?}, recomputed {actual:?}")]
    SaltMismatch { expected: Hash, actual: Hash },

    #[error("origin block must not have a parent hash")]
    GenesisHasParent,

    #[error("block {id} has no parent hash")]
    MissingParent { id: u64 },

    #[error("non-sequential block id: expected {expected}, got {got}")]
    NonSequentialId { expected: u64, got: u64 },

    #[error("previous hash mismatch in block {id}: expected {expected:?}, got {actual:?}")]
    PreviousHashMismatch {
        id: u64,
        expected: Hash,
        actual: Hash,
    },

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}
