//! # Chain Validation
//!
//! Recomputes every block's Merkle root and hash and checks each link to its
//! predecessor. `verify_*` report the failing block and rule;
//! `validate_chain` is the boolean form used at startup.

use shared_types::{Block, LedgerError, Result, GENESIS_PREVIOUS_HASH};
use tracing::error;

use super::block::compute_block_hash;
use super::merkle::merkle_root;

/// Check a block is internally consistent: Merkle root and self-hash.
pub fn verify_block(block: &Block) -> Result<()> {
    let expected_root = merkle_root(&block.transactions);
    if block.merkle_root != expected_root {
        return Err(integrity(
            block.index,
            format!(
                "merkle root mismatch: stored {}, computed {}",
                block.merkle_root, expected_root
            ),
        ));
    }

    let expected_hash = compute_block_hash(
        block.index,
        &block.timestamp,
        &block.previous_hash,
        &block.merkle_root,
    );
    if block.hash != expected_hash {
        return Err(integrity(
            block.index,
            format!("hash mismatch: stored {}, computed {}", block.hash, expected_hash),
        ));
    }

    Ok(())
}

/// Check `block` directly follows `previous`.
pub fn verify_link(previous: &Block, block: &Block) -> Result<()> {
    if block.index != previous.index + 1 {
        return Err(integrity(
            block.index,
            format!("index does not follow predecessor {}", previous.index),
        ));
    }
    if block.previous_hash != previous.hash {
        return Err(integrity(
            block.index,
            "previous hash does not match predecessor",
        ));
    }
    Ok(())
}

/// Full-chain check. An empty chain is invalid: the genesis block must exist.
pub fn verify_chain(blocks: &[Block]) -> Result<()> {
    let Some(genesis) = blocks.first() else {
        return Err(integrity(0, "chain has no genesis block"));
    };
    if genesis.index != 0 {
        return Err(integrity(genesis.index, "first block is not at index 0"));
    }
    if genesis.previous_hash != GENESIS_PREVIOUS_HASH {
        return Err(integrity(0, "genesis previous hash is not \"0\""));
    }
    verify_block(genesis)?;

    for pair in blocks.windows(2) {
        verify_block(&pair[1])?;
        verify_link(&pair[0], &pair[1])?;
    }
    Ok(())
}

/// Boolean form of [`verify_chain`]; logs the first violation found.
pub fn validate_chain(blocks: &[Block]) -> bool {
    match verify_chain(blocks) {
        Ok(()) => true,
        Err(e) => {
            error!("[dl-01] Chain validation failed: {}", e);
            false
        }
    }
}

fn integrity(index: u64, reason: impl Into<String>) -> LedgerError {
    LedgerError::IntegrityViolation {
        index,
        reason: reason.into(),
    }
}
