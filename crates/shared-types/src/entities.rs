//! # Core Domain Entities
//!
//! Blocks and the opaque transaction payloads they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// UTC timestamp used on blocks and documents.
pub type Timestamp = DateTime<Utc>;

/// `previousHash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Merkle root of a block without transactions.
pub const EMPTY_MERKLE_ROOT: &str = "0";

// =============================================================================
// PAYLOAD
// =============================================================================

/// An opaque, already-encoded ledger document.
///
/// Persisted as base64 so the exact bytes survive a save/load cycle; block
/// hashes and Merkle roots are computed over these bytes.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(#[serde_as(as = "Base64")] Vec<u8>);

impl Payload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payload({} bytes)", self.0.len())
    }
}

// =============================================================================
// BLOCK
// =============================================================================

/// A sealed block. Immutable once appended to the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain; genesis is 0.
    pub index: u64,
    /// Sealing time.
    pub timestamp: Timestamp,
    /// Hex SHA-256 over index, timestamp, previous hash and Merkle root.
    pub hash: String,
    /// Hash of the predecessor, or `"0"` for genesis.
    pub previous_hash: String,
    /// Merkle root over the transaction payloads.
    pub merkle_root: String,
    /// Ordered transaction payloads.
    #[serde(default)]
    pub transactions: Vec<Payload>,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    pub fn header(&self) -> BlockHeader {
        BlockHeader::from(self)
    }
}

/// Block without its transactions, as exposed by the query surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    #[serde(rename = "id")]
    pub index: u64,
    pub timestamp: Timestamp,
    pub hash: String,
    pub previous_block_hash: String,
    pub merkle_root: String,
    pub transaction_count: usize,
}

impl From<&Block> for BlockHeader {
    fn from(block: &Block) -> Self {
        Self {
            index: block.index,
            timestamp: block.timestamp,
            hash: block.hash.clone(),
            previous_block_hash: block.previous_hash.clone(),
            merkle_root: block.merkle_root.clone(),
            transaction_count: block.transactions.len(),
        }
    }
}
