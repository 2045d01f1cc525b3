//! # Notary Chain
//!
//! The unified API for Notary Chain: an append-only ledger of hash-linked
//! blocks, each carrying a running salt over its entries.
//!
//! ## Overview
//!
//! - **Entries**: Tagged records (opaque data, text, document digests)
//! - **Blocks**: Ordered batches of entries, chained by the hash of their predecessor
//! - **Salt**: A running digest over a block's entries; any reordering or edit changes it
//! - **Chain**: Owns block id allocation, sealing, export/import and verification
//!
//! ## Usage
//!
//! ```rust
//! use notary_chain::{Chain, ChainConfig, Entry};
//!
//! let mut chain = Chain::new(ChainConfig::default()).unwrap();
//! chain.append(Entry::text("A")).unwrap();
//! chain.append(Entry::text("B")).unwrap();
//! chain.seal().unwrap();
//!
//! let bytes = chain.export().unwrap();
//! let resumed: Chain = Chain::import(&bytes, ChainConfig::default()).unwrap();
//! assert_eq!(resumed.blocks(), chain.blocks());
//! ```
//!
//! ## Re-exports
//!
//! - `notary_chain::core` - Core primitives (Block, Entry, Hash, encoding)

pub mod chain;
pub mod config;
pub mod error;

// Re-export component crates
pub use notary_chain_core as core;

// Re-export main types for convenience
pub use chain::{Chain, EntryPosition};
pub use config::ChainConfig;
pub use error::{ChainError, Result};

// Re-export commonly used core types
pub use notary_chain_core::{
    Block, CoreError, Entry, EntryKind, Hash, Marshal, SequenceAllocator, Unmarshal,
    ValidationError,
};
