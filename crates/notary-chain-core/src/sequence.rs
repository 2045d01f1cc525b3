//! Block id allocation.
//!
//! Ids come from an explicit allocator rather than ambient global state, so
//! independent chains can live in one process and tests stay isolated.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CoreError;

/// Id of the origin block of every chain.
pub const GENESIS_ID: u64 = 0;

/// Hands out strictly increasing block ids.
///
/// Allocation is lock-free and safe to share across threads. Resetting
/// requires exclusive access, so it can never race an allocation.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    next: AtomicU64,
}

impl SequenceAllocator {
    /// A fresh allocator whose first id is [`GENESIS_ID`].
    pub fn new() -> Self {
        Self::starting_at(GENESIS_ID)
    }

    /// An allocator resuming from persisted state.
    pub fn starting_at(next: u64) -> Self {
        Self {
            next: AtomicU64::new(next),
        }
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Acquire)
    }

    /// Allocate an id with no chain-shape checks.
    pub fn next(&self) -> Result<u64, CoreError> {
        self.claim(|_| Ok(()))
    }

    /// Allocate the id of a block chained to the block with id `parent`, or
    /// of the origin block when `parent` is `None`.
    ///
    /// The origin block is only accepted while the allocator still sits at
    /// [`GENESIS_ID`]. A chained block is only accepted when the next id is
    /// exactly `parent + 1`, so a parent never gets two children. The check
    /// and the increment happen as one atomic step.
    pub fn allocate(&self, parent: Option<u64>) -> Result<u64, CoreError> {
        self.claim(|current| check_shape(parent, current))
    }

    /// Run the [`allocate`](Self::allocate) checks against the current
    /// counter without claiming an id.
    pub fn check(&self, parent: Option<u64>) -> Result<(), CoreError> {
        check_shape(parent, self.peek())
    }

    /// Move the counter, e.g. after loading blocks `0..next` from storage.
    pub fn reset(&mut self, next: u64) {
        *self.next.get_mut() = next;
    }

    fn claim(&self, check: impl Fn(u64) -> Result<(), CoreError>) -> Result<u64, CoreError> {
        let mut current = self.next.load(Ordering::Acquire);
        loop {
            check(current)?;
            let successor = current.checked_add(1).ok_or(CoreError::SequenceExhausted)?;
            match self.next.compare_exchange_weak(
                current,
                successor,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = actual,
            }
        }
    }
}

fn check_shape(parent: Option<u64>, current: u64) -> Result<(), CoreError> {
    match parent {
        None if current != GENESIS_ID => Err(CoreError::InvalidChain(
            "a non-origin block requires a previous block".into(),
        )),
        Some(_) if current == GENESIS_ID => Err(CoreError::InvalidChain(
            "an origin block must not have a parent".into(),
        )),
        Some(id) if id.checked_add(1) != Some(current) => Err(CoreError::InvalidChain(format!(
            "block {} is not the latest block, next id is {}",
            id, current
        ))),
        _ => Ok(()),
    }
}
