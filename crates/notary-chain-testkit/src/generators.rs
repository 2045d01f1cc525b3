//! Proptest generators for property-based testing.

use proptest::prelude::*;

use notary_chain_core::{Block, Entry, Hash, SequenceAllocator};

use crate::fixtures::stub_block;

/// Generate a random Hash.
pub fn hash() -> impl Strategy<Value = Hash> {
    any::<[u8; 32]>().prop_map(Hash::from_bytes)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate an entry of any kind.
pub fn entry() -> impl Strategy<Value = Entry> {
    prop_oneof![
        payload(256).prop_map(Entry::data),
        "\\PC{0,64}".prop_map(Entry::text),
        hash().prop_map(Entry::digest),
    ]
}

/// Generate up to `max` entries.
pub fn entries(max: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(entry(), 0..=max)
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    /// `None` for an origin block, otherwise the parent's id and parent hash.
    pub parent: Option<(u64, Hash)>,
    pub entries: Vec<Entry>,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            proptest::option::of((0u64..=1_000_000u64, hash())),
            entries(16),
        )
            .prop_map(|(parent, entries)| BlockParams { parent, entries })
            .boxed()
    }
}

/// Build a block from parameters.
pub fn block_from_params(params: &BlockParams) -> Block {
    let (allocator, parent) = match params.parent {
        Some((id, grandparent)) => (
            SequenceAllocator::starting_at(id + 1),
            Some(stub_block(id, grandparent)),
        ),
        None => (SequenceAllocator::new(), None),
    };

    let mut block = Block::create(&allocator, parent.as_ref(), params.entries.len())
        .expect("create block");
    for entry in &params.entries {
        block.add_entry(entry.clone()).expect("add entry");
    }
    block
}
