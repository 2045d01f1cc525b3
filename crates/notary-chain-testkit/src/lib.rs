//! # Notary Chain Testkit
//!
//! Testing utilities for Notary Chain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed blocks with their expected wire bytes, for byte-stability checks
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helpers for setting up blocks and chains in tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use notary_chain_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "vector {} does not match", name);
//! }
//! assert!(!all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use notary_chain_core::{Block, Marshal};
//! use notary_chain_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn size_is_exact(params: BlockParams) {
//!         let block = block_from_params(&params);
//!         prop_assert_eq!(block.marshal_binary().unwrap().len() as u64, block.marshalled_size());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use notary_chain_testkit::fixtures::ChainFixture;
//!
//! let mut fixture = ChainFixture::new();
//! fixture.append_texts(&["A", "B"]);
//! assert_eq!(fixture.chain.open_block().len(), 2);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    build_chain, expected_salt, genesis_with, stub_block, text_entries, BrokenEntry, ChainFixture,
};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{all_vectors, verify_all_vectors, WireVector};
