//! End-to-end chain behaviour: id assignment, error paths and resumption.

use notary_chain::core::{encode_blocks, validate_chain, Block, CoreError, SequenceAllocator};
use notary_chain::{Chain, ChainConfig, ChainError, Entry, Hash, ValidationError};
use notary_chain_testkit::{build_chain, stub_block, BrokenEntry, ChainFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn origin_requires_fresh_allocator() {
    let allocator = SequenceAllocator::new();
    let genesis: Block = Block::create(&allocator, None, 0).unwrap();
    assert_eq!(genesis.id(), 0);

    let orphan: Result<Block, _> = Block::create(&allocator, None, 0);
    assert!(matches!(orphan, Err(CoreError::InvalidChain(_))));

    let next = Block::create(&allocator, Some(&genesis), 0).unwrap();
    assert_eq!(next.id(), 1);
}

#[test]
fn reset_to_zero_allows_new_origin() {
    let mut allocator = SequenceAllocator::new();
    let first: Block = Block::create(&allocator, None, 0).unwrap();
    let _second = Block::create(&allocator, Some(&first), 0).unwrap();

    allocator.reset(0);
    let again: Block = Block::create(&allocator, None, 0).unwrap();
    assert_eq!(again.id(), 0);
    assert!(matches!(
        Block::create(&allocator, Some(&first), 0).map(|b| b.id()),
        Ok(1)
    ));
}

#[test]
fn unhashable_entry_is_rejected() {
    let allocator = SequenceAllocator::new();
    let mut block: Block<BrokenEntry> = Block::create(&allocator, None, 1).unwrap();

    let err = block.add_entry(BrokenEntry).unwrap_err();
    assert!(matches!(err, CoreError::HashingFailed(_)));
    assert!(block.is_empty());
    assert_eq!(block.salt(), &Hash::EMPTY);
}

#[test]
fn unhashable_entry_through_chain() {
    init_tracing();
    let mut chain: Chain<BrokenEntry> = Chain::new(ChainConfig::default()).unwrap();

    let err = chain.append(BrokenEntry).unwrap_err();
    assert!(matches!(err, ChainError::Core(CoreError::HashingFailed(_))));
    assert!(chain.open_block().is_empty());
}

#[test]
fn undecodable_entries_fail_decode() {
    let blocks = build_chain(1, 2);
    let bytes = notary_chain::core::encode_blocks(&blocks).unwrap();

    let result = Chain::<BrokenEntry>::import(&bytes, ChainConfig::default());
    assert!(matches!(result, Err(ChainError::Core(CoreError::DecodingFailed(_)))));
}

#[test]
fn resume_and_continue() {
    init_tracing();
    let mut fixture = ChainFixture::new();
    fixture.append_texts(&["a", "b", "c", "d", "e", "f", "g", "h"]);
    assert_eq!(fixture.chain.sealed_len(), 2);

    let bytes = fixture.chain.export().unwrap();
    let mut resumed: Chain = Chain::import(&bytes, fixture.chain.config().clone()).unwrap();

    let position = resumed.append(Entry::text("i")).unwrap();
    assert_eq!(position.block_id, 2);
    resumed.seal().unwrap();

    assert_eq!(resumed.sealed_len(), 3);
    assert!(resumed.verify().is_ok());
    assert!(validate_chain(resumed.blocks()).is_ok());
}

#[test]
fn exhausted_ids_do_not_store_rejected_entries() {
    init_tracing();
    let head = stub_block(u64::MAX - 2, Hash::from_bytes([0x07; 32]));
    let bytes = encode_blocks(&[head]).unwrap();
    let config = ChainConfig::default().max_entries_per_block(1);
    let mut chain: Chain = Chain::import(&bytes, config).unwrap();
    assert_eq!(chain.open_block().id(), u64::MAX - 1);

    // Stored, even though sealing the now full block ran out of ids
    let position = chain.append(Entry::text("last")).unwrap();
    assert_eq!(position.block_id, u64::MAX - 1);
    assert_eq!(chain.open_block().len(), 1);
    assert_eq!(chain.sealed_len(), 1);

    // Each rejected append leaves the open block as it was
    for _ in 0..2 {
        let err = chain.append(Entry::text("overflow")).unwrap_err();
        assert!(matches!(err, ChainError::Core(CoreError::SequenceExhausted)));
        assert_eq!(chain.open_block().entries(), &[Entry::text("last")]);
    }
    assert!(chain.verify().is_ok());
}

#[test]
fn import_rejects_reordered_blocks() {
    init_tracing();
    let mut blocks = build_chain(3, 1);
    blocks.swap(1, 2);
    let bytes = notary_chain::core::encode_blocks(&blocks).unwrap();

    let result = Chain::<Entry>::import(&bytes, ChainConfig::default());
    assert!(matches!(
        result,
        Err(ChainError::Validation(ValidationError::NonSequentialId { .. }))
    ));
}

#[test]
fn concurrent_children_of_one_parent() {
    use std::sync::{Arc, Barrier};
    use std::thread;

    let allocator = Arc::new(SequenceAllocator::new());
    let genesis: Block = Block::create(&allocator, None, 0).unwrap();
    let genesis = Arc::new(genesis);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let allocator = Arc::clone(&allocator);
            let genesis = Arc::clone(&genesis);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                Block::create(&allocator, Some(&*genesis), 0).map(|b| b.id())
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        match handle.join().unwrap() {
            Ok(id) => created.push(id),
            Err(e) => assert!(matches!(e, CoreError::InvalidChain(_))),
        }
    }
    assert_eq!(created, vec![1]);
    assert_eq!(allocator.peek(), 2);
}
