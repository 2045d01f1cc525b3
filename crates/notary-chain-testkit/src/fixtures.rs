//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use notary_chain::{Chain, ChainConfig, EntryPosition};
use notary_chain_core::{
    Block, CoreError, Entry, Hash, Marshal, SequenceAllocator, Unmarshal, HASH_LEN,
};

/// A test fixture wrapping a chain with small blocks.
pub struct ChainFixture {
    pub chain: Chain,
}

impl ChainFixture {
    /// A chain that seals every four entries.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default().max_entries_per_block(4))
    }

    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            chain: Chain::new(config).expect("origin block"),
        }
    }

    /// Append one text entry per string.
    pub fn append_texts(&mut self, texts: &[&str]) -> Vec<EntryPosition> {
        texts
            .iter()
            .map(|t| self.chain.append(Entry::text(*t)).expect("append text"))
            .collect()
    }
}

impl Default for ChainFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An entry type that can be neither encoded nor decoded.
///
/// Drives the hashing and encoding failure paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenEntry;

impl Marshal for BrokenEntry {
    fn marshalled_size(&self) -> u64 {
        1
    }

    fn marshal_into(&self, _buf: &mut Vec<u8>) -> Result<(), CoreError> {
        Err(CoreError::EncodingFailed("broken entry".into()))
    }
}

impl Unmarshal for BrokenEntry {
    fn unmarshal_binary(_data: &[u8]) -> Result<Self, CoreError> {
        Err(CoreError::DecodingFailed("broken entry".into()))
    }
}

pub fn text_entries(texts: &[&str]) -> Vec<Entry> {
    texts.iter().map(|t| Entry::text(*t)).collect()
}

/// A fresh origin block holding `entries`.
pub fn genesis_with(entries: Vec<Entry>) -> Block {
    let allocator = SequenceAllocator::new();
    let mut block = Block::create(&allocator, None, entries.len()).expect("origin block");
    for entry in entries {
        block.add_entry(entry).expect("add entry");
    }
    block
}

/// An empty block with an arbitrary id and parent hash.
///
/// Built through the decoder, since ordinary construction only produces
/// blocks that follow a real parent.
pub fn stub_block(id: u64, previous_hash: Hash) -> Block {
    let mut bytes = Vec::with_capacity(8 + HASH_LEN + 8 + HASH_LEN);
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.extend_from_slice(previous_hash.as_bytes());
    bytes.extend_from_slice(&0u64.to_be_bytes());
    bytes.extend_from_slice(Hash::EMPTY.as_bytes());
    Block::unmarshal_binary(&bytes).expect("stub block")
}

/// A linked run of `count` blocks starting at the origin, each with
/// `entries_per_block` text entries.
pub fn build_chain(count: usize, entries_per_block: usize) -> Vec<Block> {
    let allocator = SequenceAllocator::new();
    let mut blocks: Vec<Block> = Vec::with_capacity(count);
    for b in 0..count {
        let mut block =
            Block::create(&allocator, blocks.last(), entries_per_block).expect("create block");
        for e in 0..entries_per_block {
            block
                .add_entry(Entry::text(format!("block {} entry {}", b, e)))
                .expect("add entry");
        }
        blocks.push(block);
    }
    blocks
}

/// The salt a block holding `entries` should carry, folded by hand.
pub fn expected_salt(entries: &[Entry]) -> Hash {
    entries.iter().fold(Hash::EMPTY, |salt, entry| {
        let entry_hash = Hash::digest(&entry.marshal_binary().expect("encode entry"));
        let mut joined = salt.as_bytes().to_vec();
        joined.extend_from_slice(entry_hash.as_bytes());
        Hash::digest(&joined)
    })
}
