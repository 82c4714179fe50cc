//! # Ledger State
//!
//! The chain and the pool as one unit. Everything that must observe or
//! change both at once goes through here.

use dl_01_ledger::Chain;
use shared_types::{Block, Payload, Result, Timestamp};

use super::pool::PendingPool;

#[derive(Debug, Clone)]
pub struct LedgerState {
    chain: Chain,
    pool: PendingPool,
}

impl LedgerState {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            pool: PendingPool::new(),
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn pool(&self) -> &PendingPool {
        &self.pool
    }

    pub fn admit(&mut self, payload: Payload) {
        self.pool.push(payload);
    }

    pub fn threshold_met(&self, threshold: usize) -> bool {
        !self.pool.is_empty() && self.pool.len() >= threshold
    }

    /// Seal the pool into a new block when the threshold is met, or when
    /// `force` is set and anything is pending.
    ///
    /// On failure nothing changes: the pool keeps its payloads and the chain
    /// keeps its tip.
    pub fn seal(&mut self, threshold: usize, force: bool, now: Timestamp) -> Result<Option<&Block>> {
        let due = if force {
            !self.pool.is_empty()
        } else {
            self.threshold_met(threshold)
        };
        if !due {
            return Ok(None);
        }

        let block = self.chain.seal_next(self.pool.entries().to_vec(), now)?;
        self.chain.append(block)?;
        self.pool.clear();
        Ok(Some(self.chain.last_block()))
    }
}
