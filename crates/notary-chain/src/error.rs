//! Error types for the chain API.

use notary_chain_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Building, encoding or decoding a block failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A block or link failed verification.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
