//! # Notary Chain Core
//!
//! Pure primitives for Notary Chain: hash-linked blocks of entries and their
//! canonical binary encoding.
//!
//! This crate contains no I/O, no storage, no logging. It is pure computation
//! over in-memory data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - An ordered batch of entries, linked to its predecessor by hash
//! - [`Entry`] - A tagged record (data, text or document digest)
//! - [`Hash`] - A 32-byte Blake3 digest
//! - [`SequenceAllocator`] - Hands out block ids
//!
//! ## Encoding
//!
//! Every wire value implements [`Marshal`] and reports its exact encoded
//! size, which is how decoders find value boundaries in a flat buffer. See
//! the [`block`] module for the layout.

pub mod block;
pub mod codec;
pub mod entry;
pub mod error;
pub mod hash;
pub mod sequence;
pub mod validation;

pub use block::{decode_blocks, encode_blocks, fold_salt, Block, Field, FieldValue, FIELD_NAMES};
pub use codec::{Marshal, Reader, Unmarshal};
pub use entry::{Entry, EntryKind};
pub use error::{CoreError, ValidationError};
pub use hash::{Hash, HASH_LEN};
pub use sequence::{SequenceAllocator, GENESIS_ID};
pub use validation::{validate_block_structure, validate_chain, validate_link};
