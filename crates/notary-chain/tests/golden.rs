//! Golden wire vectors.
//!
//! Independently built instances must produce identical bytes for the same
//! block, so the layout is pinned here byte for byte.

use notary_chain::core::{decode_blocks, encode_blocks, Block, Entry, Hash, Marshal, Unmarshal};
use notary_chain_testkit::{all_vectors, expected_salt, genesis_with, text_entries};

#[test]
fn golden_vectors_match() {
    for vector in all_vectors() {
        assert!(vector.matches(), "vector '{}' drifted", vector.name);
    }
}

/// Origin block, append "A", append "B", encode, decode into a fresh block.
#[test]
fn two_entry_origin_scenario() {
    let entries = text_entries(&["A", "B"]);
    let block = genesis_with(entries.clone());
    assert_eq!(block.id(), 0);

    let bytes = block.marshal_binary().unwrap();
    assert_eq!(
        hex::encode(&bytes[..bytes.len() - 32]),
        "0000000000000000\
         0000000000000000000000000000000000000000000000000000000000000000\
         0000000000000002\
         02000000000000000141\
         02000000000000000142"
    );

    let decoded = Block::<Entry>::unmarshal_binary(&bytes).unwrap();
    assert_eq!(decoded.id(), 0);
    assert_eq!(decoded.previous_hash(), &Hash::EMPTY);
    assert_eq!(decoded.entries(), entries.as_slice());
    assert_eq!(decoded.salt(), &expected_salt(&entries));
}

#[test]
fn chained_block_embeds_parent_hash() {
    let blocks = notary_chain_testkit::build_chain(2, 1);
    let bytes = blocks[1].marshal_binary().unwrap();

    assert_eq!(&bytes[..8], &1u64.to_be_bytes());
    assert_eq!(&bytes[8..40], blocks[0].compute_hash().unwrap().as_bytes());
    assert_eq!(
        blocks[0].compute_hash().unwrap(),
        Hash::digest(&blocks[0].marshal_binary().unwrap())
    );
}

#[test]
fn flat_buffer_of_blocks() {
    let blocks = notary_chain_testkit::build_chain(4, 3);
    let bytes = encode_blocks(&blocks).unwrap();

    // Block boundaries follow from each block's reported size
    let mut offset = 0usize;
    for block in &blocks {
        let size = block.marshalled_size() as usize;
        let decoded = Block::<Entry>::unmarshal_binary(&bytes[offset..]).unwrap();
        assert_eq!(&decoded, block);
        offset += size;
    }
    assert_eq!(offset, bytes.len());

    let decoded: Vec<Block> = decode_blocks(&bytes).unwrap();
    assert_eq!(decoded, blocks);
}
