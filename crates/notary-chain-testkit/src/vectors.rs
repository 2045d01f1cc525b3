//! Golden wire vectors for byte-stability checks.
//!
//! Each vector is an origin block built from fixed entries. The expected
//! bytes cover everything up to the salt; the salt itself is checked against
//! an independent fold over the entries.

use notary_chain_core::{Block, Entry, Hash, Marshal, HASH_LEN};

use crate::fixtures::{expected_salt, genesis_with};

/// A golden wire vector.
#[derive(Debug, Clone)]
pub struct WireVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Entries appended, in order, to a fresh origin block.
    pub entries: Vec<Entry>,
    /// Expected encoding up to (not including) the salt, hex.
    pub expected_head_hex: &'static str,
    /// Expected total encoded size.
    pub expected_size: u64,
}

impl WireVector {
    pub fn block(&self) -> Block {
        genesis_with(self.entries.clone())
    }

    /// Whether the current encoder reproduces this vector.
    pub fn matches(&self) -> bool {
        let block = self.block();
        let Ok(bytes) = block.marshal_binary() else {
            return false;
        };
        if bytes.len() as u64 != self.expected_size || bytes.len() < HASH_LEN {
            return false;
        }

        let (head, salt) = bytes.split_at(bytes.len() - HASH_LEN);
        hex::encode(head) == self.expected_head_hex
            && salt == expected_salt(&self.entries).as_bytes()
    }
}

/// Get all golden wire vectors.
pub fn all_vectors() -> Vec<WireVector> {
    vec![
        WireVector {
            name: "empty origin block",
            entries: vec![],
            expected_head_hex: "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            expected_size: 80,
        },
        WireVector {
            name: "origin block with texts A and B",
            entries: vec![Entry::text("A"), Entry::text("B")],
            expected_head_hex: "0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000020200000000000000014102000000000000000142",
            expected_size: 100,
        },
        WireVector {
            name: "single data entry",
            entries: vec![Entry::data(vec![0xde, 0xad, 0xbe, 0xef])],
            expected_head_hex: "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001010000000000000004deadbeef",
            expected_size: 93,
        },
        WireVector {
            name: "single digest entry",
            entries: vec![Entry::digest(Hash::from_bytes([0x11; 32]))],
            expected_head_hex: "0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000010300000000000000201111111111111111111111111111111111111111111111111111111111111111",
            expected_size: 121,
        },
        WireVector {
            name: "mixed kinds with empty data",
            entries: vec![
                Entry::data(Vec::new()),
                Entry::text("notary"),
                Entry::digest(Hash::from_bytes([0xab; 32])),
            ],
            expected_head_hex: "0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000030100000000000000000200000000000000066e6f74617279030000000000000020abababababababababababababababababababababababababababababababab",
            expected_size: 145,
        },
    ]
}

/// Check every vector against the current encoder.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| (v.name.to_string(), v.matches()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notary_chain_core::Unmarshal;

    #[test]
    fn test_all_vectors_match() {
        for (name, ok) in verify_all_vectors() {
            assert!(ok, "vector '{}' does not match the encoder", name);
        }
    }

    #[test]
    fn test_vectors_decode() {
        for vector in all_vectors() {
            let bytes = vector.block().marshal_binary().unwrap();
            let decoded = Block::<Entry>::unmarshal_binary(&bytes).unwrap();
            assert_eq!(decoded.entries(), vector.entries.as_slice(), "{}", vector.name);
        }
    }

    #[test]
    fn test_vector_sizes_are_exact() {
        for vector in all_vectors() {
            assert_eq!(vector.block().marshalled_size(), vector.expected_size, "{}", vector.name);
        }
    }
}
