//! Block: an ordered batch of entries, hash-linked to its predecessor.
//!
//! Every appended entry is folded into a running salt,
//! `salt' = Hash(salt, Hash(entry))`, so reordering or editing entries after
//! the fact changes the salt.
//!
//! Wire format (big-endian, no padding):
//!
//! ```text
//! block_id (8) || previous_hash || entry_count (8) || entry_0 .. entry_n-1 || salt
//! ```
//!
//! Hashes and entries are self-describing; a decoder advances past each one
//! by its own `marshalled_size`.

use serde::{Deserialize, Serialize};

use crate::codec::{put_u64, Marshal, Reader, Unmarshal};
use crate::entry::Entry;
use crate::error::{CoreError, ValidationError};
use crate::hash::Hash;
use crate::sequence::{SequenceAllocator, GENESIS_ID};

/// Size of the fixed-width `block_id` and `entry_count` fields.
const U64_LEN: u64 = 8;

/// Names of a block's fields, in encoding order.
pub const FIELD_NAMES: [&str; 4] = ["blockID", "previousHash", "entries", "salt"];

/// A block of entries.
///
/// Blocks are built by a single writer: created once, then extended with
/// [`Block::add_entry`] (or [`Block::with_entry`] for a new version). Once a
/// block is encoded or chained from, treat it as sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block<E = Entry> {
    #[serde(rename = "blockID")]
    id: u64,
    previous_hash: Hash,
    entries: Vec<E>,
    salt: Hash,
}

/// A named field of a block, for generic structured emitters.
#[derive(Debug)]
pub struct Field<'a, E> {
    pub name: &'static str,
    pub value: FieldValue<'a, E>,
}

#[derive(Debug)]
pub enum FieldValue<'a, E> {
    Id(u64),
    Hash(&'a Hash),
    Entries(&'a [E]),
}

impl<E> Block<E> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Hash of the parent block; [`Hash::EMPTY`] for the origin block.
    pub fn previous_hash(&self) -> &Hash {
        &self.previous_hash
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn salt(&self) -> &Hash {
        &self.salt
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_genesis(&self) -> bool {
        self.id == GENESIS_ID
    }

    pub fn into_entries(self) -> Vec<E> {
        self.entries
    }

    /// The block's fields as an ordered list of `(name, value)` pairs.
    pub fn fields(&self) -> [Field<'_, E>; 4] {
        [
            Field {
                name: FIELD_NAMES[0],
                value: FieldValue::Id(self.id),
            },
            Field {
                name: FIELD_NAMES[1],
                value: FieldValue::Hash(&self.previous_hash),
            },
            Field {
                name: FIELD_NAMES[2],
                value: FieldValue::Entries(&self.entries),
            },
            Field {
                name: FIELD_NAMES[3],
                value: FieldValue::Hash(&self.salt),
            },
        ]
    }
}

impl<E: Marshal> Block<E> {
    /// Create a block, chained to `previous` when given.
    ///
    /// The origin block must be the first id the allocator hands out and has
    /// no parent. Every later block must have one, and `previous` must be the
    /// block holding the allocator's latest id: the new block always gets
    /// `previous.id() + 1`. `previous` is hashed in its current state,
    /// entries and salt included. `capacity_hint` only pre-sizes the entry
    /// list.
    pub fn create(
        allocator: &SequenceAllocator,
        previous: Option<&Block<E>>,
        capacity_hint: usize,
    ) -> Result<Self, CoreError> {
        let parent = previous.map(Block::id);
        allocator.check(parent)?;

        // Hash before allocating so a hashing failure does not burn an id.
        let previous_hash = match previous {
            Some(prev) => prev.compute_hash()?,
            None => Hash::EMPTY,
        };
        let id = allocator.allocate(parent)?;

        Ok(Self {
            id,
            previous_hash,
            entries: Vec::with_capacity(capacity_hint),
            salt: Hash::EMPTY,
        })
    }

    /// Append an entry and advance the salt.
    ///
    /// Both hashes are computed before anything is mutated: on error the
    /// block is left exactly as it was.
    pub fn add_entry(&mut self, entry: E) -> Result<(), CoreError> {
        let salt = fold_salt(&self.salt, &entry)?;
        self.entries.push(entry);
        self.salt = salt;
        Ok(())
    }

    /// Return a new version of this block with `entry` appended.
    pub fn with_entry(&self, entry: E) -> Result<Self, CoreError>
    where
        E: Clone,
    {
        let salt = fold_salt(&self.salt, &entry)?;

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(entry);

        Ok(Self {
            id: self.id,
            previous_hash: self.previous_hash,
            entries,
            salt,
        })
    }

    /// Fold the salt from scratch over the current entries.
    pub fn recompute_salt(&self) -> Result<Hash, CoreError> {
        self.entries
            .iter()
            .try_fold(Hash::EMPTY, |salt, entry| fold_salt(&salt, entry))
    }

    /// Check the stored salt against a fresh fold over the entries.
    pub fn verify_salt(&self) -> Result<(), ValidationError> {
        let actual = self.recompute_salt()?;
        if actual != self.salt {
            return Err(ValidationError::SaltMismatch {
                expected: self.salt,
                actual,
            });
        }
        Ok(())
    }

    /// Hash of the full encoded block, as stored by its successor.
    pub fn compute_hash(&self) -> Result<Hash, CoreError> {
        Hash::create(&[self])
    }

    fn write_fields(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        put_u64(buf, self.id);
        self.previous_hash.marshal_into(buf)?;

        put_u64(buf, self.entries.len() as u64);
        for (i, entry) in self.entries.iter().enumerate() {
            entry.marshal_into(buf).map_err(|e| match e {
                CoreError::EncodingFailed(msg) => {
                    CoreError::EncodingFailed(format!("entry {}: {}", i, msg))
                }
                other => other,
            })?;
        }

        self.salt.marshal_into(buf)
    }
}

impl<E: Marshal + Unmarshal> Block<E> {
    /// Decode one block from the reader, leaving it positioned just past
    /// the block.
    ///
    /// The salt is taken as stored; use [`Block::verify_salt`] to check it.
    pub fn read_from(reader: &mut Reader<'_>) -> Result<Self, CoreError> {
        let id = reader.read_u64("blockID")?;
        let previous_hash = reader.decode::<Hash>("previousHash")?;

        let count = reader.read_u64("entryCount")?;
        // The count is untrusted: never reserve more slots than bytes left.
        let reserve = count.min(reader.remaining().len() as u64) as usize;
        let mut entries = Vec::with_capacity(reserve);
        for i in 0..count {
            let entry = reader.decode::<E>("entry").map_err(|e| match e {
                CoreError::DecodingFailed(msg) => {
                    CoreError::DecodingFailed(format!("entry {}: {}", i, msg))
                }
                other => other,
            })?;
            entries.push(entry);
        }

        let salt = reader.decode::<Hash>("salt")?;

        Ok(Self {
            id,
            previous_hash,
            entries,
            salt,
        })
    }
}

impl<E: Marshal> Marshal for Block<E> {
    fn marshalled_size(&self) -> u64 {
        U64_LEN
            + self.previous_hash.marshalled_size()
            + U64_LEN
            + self
                .entries
                .iter()
                .map(Marshal::marshalled_size)
                .sum::<u64>()
            + self.salt.marshalled_size()
    }

    fn marshal_into(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        let start = buf.len();
        let result = self.write_fields(buf);
        if result.is_err() {
            buf.truncate(start);
        }
        result
    }
}

impl<E: Marshal + Unmarshal> Unmarshal for Block<E> {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, CoreError> {
        Self::read_from(&mut Reader::new(data))
    }
}

/// One step of the salt fold: `Hash(salt, Hash(entry))`.
pub fn fold_salt<E: Marshal>(salt: &Hash, entry: &E) -> Result<Hash, CoreError> {
    let entry_hash = Hash::create(&[entry])?;
    Hash::create(&[salt, &entry_hash])
}

/// Encode blocks back to back into one buffer.
pub fn encode_blocks<E: Marshal>(blocks: &[Block<E>]) -> Result<Vec<u8>, CoreError> {
    let total: u64 = blocks.iter().map(Marshal::marshalled_size).sum();
    let mut buf = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    for block in blocks {
        block.marshal_into(&mut buf)?;
    }
    Ok(buf)
}

/// Decode every block from a buffer of back-to-back encoded blocks.
pub fn decode_blocks<E: Marshal + Unmarshal>(data: &[u8]) -> Result<Vec<Block<E>>, CoreError> {
    let mut reader = Reader::new(data);
    let mut blocks = Vec::new();
    while !reader.is_empty() {
        blocks.push(Block::read_from(&mut reader)?);
    }
    Ok(blocks)
}
