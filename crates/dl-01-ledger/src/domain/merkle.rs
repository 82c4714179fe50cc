//! # Merkle Root
//!
//! Binary hash tree over per-transaction hashes. Each parent is
//! `SHA256(left_hex || right_hex)`. A level with an odd number of nodes
//! duplicates its last node. The root of an empty batch is the `"0"`
//! sentinel.

use shared_crypto::{sha256_hex, sha256_hex_concat};
use shared_types::{Payload, EMPTY_MERKLE_ROOT};

/// A Merkle tree kept level by level, leaves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<String>>,
}

impl MerkleTree {
    /// Build from leaf hashes (hex strings).
    pub fn build(leaves: Vec<String>) -> Self {
        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }

        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    Self::hash_pair(left, right)
                })
                .collect();
            levels.push(next);
        }

        Self { levels }
    }

    /// Build from transaction payloads, hashing each payload as a leaf.
    pub fn from_payloads(payloads: &[Payload]) -> Self {
        Self::build(payloads.iter().map(|p| sha256_hex(p.as_bytes())).collect())
    }

    pub fn root(&self) -> String {
        self.levels
            .last()
            .and_then(|level| level.first())
            .cloned()
            .unwrap_or_else(|| EMPTY_MERKLE_ROOT.to_string())
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels including leaves and root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    fn hash_pair(left: &str, right: &str) -> String {
        sha256_hex_concat(&[left.as_bytes(), right.as_bytes()])
    }
}

/// Merkle root of a batch of payloads.
pub fn merkle_root(payloads: &[Payload]) -> String {
    MerkleTree::from_payloads(payloads).root()
}
