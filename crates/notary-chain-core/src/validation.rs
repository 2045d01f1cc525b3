//! Block validation: salt recomputation and chain linkage checks.
//!
//! Decoding never validates; these checks are run explicitly by callers that
//! accept blocks from outside.

use crate::block::Block;
use crate::codec::Marshal;
use crate::error::ValidationError;

/// Validate a single block in isolation.
///
/// This performs:
/// - Origin shape (id 0 has an empty previous hash, others do not)
/// - Salt recomputation
pub fn validate_block_structure<E: Marshal>(block: &Block<E>) -> Result<(), ValidationError> {
    // 1. Origin shape
    if block.is_genesis() && !block.previous_hash().is_empty() {
        return Err(ValidationError::GenesisHasParent);
    }
    if !block.is_genesis() && block.previous_hash().is_empty() {
        return Err(ValidationError::MissingParent { id: block.id() });
    }

    // 2. Salt
    block.verify_salt()
}

/// Validate that `next` directly follows `previous`.
pub fn validate_link<E: Marshal>(
    previous: &Block<E>,
    next: &Block<E>,
) -> Result<(), ValidationError> {
    let expected_id = previous.id().checked_add(1).ok_or(ValidationError::NonSequentialId {
        expected: u64::MAX,
        got: next.id(),
    })?;
    if next.id() != expected_id {
        return Err(ValidationError::NonSequentialId {
            expected: expected_id,
            got: next.id(),
        });
    }

    let expected_hash = previous.compute_hash()?;
    if *next.previous_hash() != expected_hash {
        return Err(ValidationError::PreviousHashMismatch {
            id: next.id(),
            expected: expected_hash,
            actual: *next.previous_hash(),
        });
    }

    Ok(())
}

/// Validate a contiguous run of blocks.
///
/// The run may start mid-chain; only a run starting at id 0 is checked
/// against the origin rules for its first block.
pub fn validate_chain<E: Marshal>(blocks: &[Block<E>]) -> Result<(), ValidationError> {
    for block in blocks {
        validate_block_structure(block)?;
    }
    for pair in blocks.windows(2) {
        validate_link(&pair[0], &pair[1])?;
    }
    Ok(())
}
