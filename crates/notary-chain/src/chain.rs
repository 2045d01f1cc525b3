//! The Chain: an in-memory ledger of sealed blocks plus one open block.
//!
//! Entries are appended to the open block. Sealing freezes it and opens a
//! successor whose previous hash covers the sealed block's final state, so a
//! block is never modified after anything links to it.

use notary_chain_core::{
    decode_blocks, encode_blocks, validate_block_structure, validate_chain, validate_link, Block,
    CoreError, Entry, Marshal, SequenceAllocator, Unmarshal,
};
use tracing::{debug, info, warn};

use crate::config::ChainConfig;
use crate::error::Result;

/// Where an appended entry landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPosition {
    pub block_id: u64,
    pub index: usize,
}

/// A single-writer chain of blocks.
///
/// Mutation takes `&mut self`; share a chain across threads behind a lock.
#[derive(Debug)]
pub struct Chain<E = Entry> {
    /// Block id source, owned so independent chains never share ids.
    allocator: SequenceAllocator,
    config: ChainConfig,
    /// Sealed blocks in id order.
    sealed: Vec<Block<E>>,
    /// The block currently accepting entries.
    open: Block<E>,
}

impl<E> Chain<E> {
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The most recently sealed block.
    pub fn head(&self) -> Option<&Block<E>> {
        self.sealed.last()
    }

    pub fn open_block(&self) -> &Block<E> {
        &self.open
    }

    /// All sealed blocks, oldest first.
    pub fn blocks(&self) -> &[Block<E>] {
        &self.sealed
    }

    pub fn sealed_len(&self) -> usize {
        self.sealed.len()
    }

    /// The id the next block will be given.
    pub fn next_block_id(&self) -> u64 {
        self.allocator.peek()
    }

    /// Look up a block (sealed or open) by id.
    pub fn block(&self, id: u64) -> Option<&Block<E>> {
        if id == self.open.id() {
            return Some(&self.open);
        }
        let first = self.sealed.first()?.id();
        let offset = usize::try_from(id.checked_sub(first)?).ok()?;
        self.sealed.get(offset)
    }

    pub fn entry(&self, position: EntryPosition) -> Option<&E> {
        self.block(position.block_id)?.entries().get(position.index)
    }
}

impl<E: Marshal> Chain<E> {
    /// Start a new chain with an empty origin block.
    pub fn new(config: ChainConfig) -> Result<Self> {
        let allocator = SequenceAllocator::new();
        let open = Block::create(&allocator, None, config.block_capacity)?;
        debug!(block_id = open.id(), "opened origin block");

        Ok(Self {
            allocator,
            config,
            sealed: Vec::new(),
            open,
        })
    }

    /// Append an entry to the open block.
    ///
    /// A block that reached `max_entries_per_block` is sealed before the
    /// entry is added, so an error here always means the entry was not
    /// stored. After a successful append the full block is sealed eagerly;
    /// if that fails the entry stays appended and the seal is retried on the
    /// next call.
    pub fn append(&mut self, entry: E) -> Result<EntryPosition> {
        if self.open_is_full() {
            self.seal()?;
        }
        self.open.add_entry(entry)?;

        let position = EntryPosition {
            block_id: self.open.id(),
            index: self.open.len() - 1,
        };
        debug!(
            block_id = position.block_id,
            index = position.index,
            salt = %self.open.salt(),
            "appended entry"
        );

        if self.open_is_full() {
            if let Err(e) = self.seal() {
                warn!(
                    error = %e,
                    block_id = position.block_id,
                    "deferred sealing full block"
                );
            }
        }

        Ok(position)
    }

    fn open_is_full(&self) -> bool {
        let max = self.config.max_entries_per_block;
        max > 0 && self.open.len() >= max
    }

    /// Seal the open block and open its successor.
    pub fn seal(&mut self) -> Result<&Block<E>> {
        let next = Block::create(&self.allocator, Some(&self.open), self.config.block_capacity)?;
        let sealed = std::mem::replace(&mut self.open, next);

        debug!(
            block_id = sealed.id(),
            entries = sealed.len(),
            salt = %sealed.salt(),
            next_block_id = self.open.id(),
            "sealed block"
        );

        self.sealed.push(sealed);
        Ok(&self.sealed[self.sealed.len() - 1])
    }

    /// Verify every sealed block and the open block's link to the head.
    pub fn verify(&self) -> Result<()> {
        validate_chain(&self.sealed)?;
        validate_block_structure(&self.open)?;
        if let Some(head) = self.head() {
            validate_link(head, &self.open)?;
        }
        Ok(())
    }

    /// Encode the sealed blocks back to back.
    ///
    /// The open block is not included; seal it first to persist it.
    pub fn export(&self) -> Result<Vec<u8>> {
        let bytes = encode_blocks(&self.sealed)?;
        info!(
            blocks = self.sealed.len(),
            bytes = bytes.len(),
            "exported chain"
        );
        Ok(bytes)
    }
}

impl<E: Marshal + Unmarshal> Chain<E> {
    /// Resume a chain from blocks produced by [`Chain::export`].
    ///
    /// The id allocator is reset to follow the last imported block and a
    /// fresh open block is chained to it. An empty buffer starts a new chain.
    pub fn import(data: &[u8], config: ChainConfig) -> Result<Self> {
        let sealed: Vec<Block<E>> = decode_blocks(data)?;

        if config.verify_on_import {
            if let Err(e) = validate_chain(&sealed) {
                warn!(error = %e, blocks = sealed.len(), "rejected imported chain");
                return Err(e.into());
            }
        }

        let Some(head) = sealed.last() else {
            return Self::new(config);
        };

        let mut allocator = SequenceAllocator::new();
        allocator.reset(head.id().checked_add(1).ok_or(CoreError::SequenceExhausted)?);
        let open = Block::create(&allocator, Some(head), config.block_capacity)?;

        info!(
            blocks = sealed.len(),
            bytes = data.len(),
            next_block_id = open.id(),
            "imported chain"
        );

        Ok(Self {
            allocator,
            config,
            sealed,
            open,
        })
    }
}
