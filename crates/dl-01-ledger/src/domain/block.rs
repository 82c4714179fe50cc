//! # Block Construction
//!
//! Sealing turns a batch of pending payloads into the next block.

use chrono::SecondsFormat;
use shared_crypto::sha256_hex_concat;
use shared_types::{codec, Block, Payload, Result, Timestamp, GENESIS_PREVIOUS_HASH};

use super::merkle::merkle_root;

/// Block hash over the header fields. The timestamp is rendered as RFC 3339
/// with nanoseconds so the hash survives a JSON save/load cycle.
pub fn compute_block_hash(
    index: u64,
    timestamp: &Timestamp,
    previous_hash: &str,
    merkle_root: &str,
) -> String {
    let index = index.to_string();
    let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
    sha256_hex_concat(&[
        index.as_bytes(),
        timestamp.as_bytes(),
        previous_hash.as_bytes(),
        merkle_root.as_bytes(),
    ])
}

/// Seal `pending` into the block that follows `previous`.
///
/// Payloads were validated before admission; one that no longer decodes is
/// a broken precondition and fails the seal with `InvalidFormat`.
pub fn seal_block(previous: &Block, pending: Vec<Payload>, timestamp: Timestamp) -> Result<Block> {
    build_block(previous.index + 1, &previous.hash, pending, timestamp)
}

/// Genesis block: index 0, previous hash `"0"`, and either no transactions or
/// a single trust-anchor document.
pub fn genesis_block(anchor: Option<Payload>, timestamp: Timestamp) -> Result<Block> {
    build_block(0, GENESIS_PREVIOUS_HASH, anchor.into_iter().collect(), timestamp)
}

fn build_block(
    index: u64,
    previous_hash: &str,
    transactions: Vec<Payload>,
    timestamp: Timestamp,
) -> Result<Block> {
    for payload in &transactions {
        codec::decode(payload)?;
    }

    let merkle_root = merkle_root(&transactions);
    let hash = compute_block_hash(index, &timestamp, previous_hash, &merkle_root);

    Ok(Block {
        index,
        timestamp,
        hash,
        previous_hash: previous_hash.to_string(),
        merkle_root,
        transactions,
    })
}
