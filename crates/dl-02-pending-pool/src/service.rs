//! # Shared Ledger
//!
//! `LedgerState` behind one `parking_lot::RwLock`, plus the halt flag and
//! the clock. Shared between admission and the sealing scheduler by `Arc`.
//!
//! No I/O happens under the lock. Sealing hands back a cloned chain
//! snapshot for the caller to persist after the guard is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dl_01_ledger::{Chain, SystemTimeSource, TimeSource};
use parking_lot::{RwLock, RwLockReadGuard};
use shared_types::{codec, Block, Document, LedgerError, Payload, Result, Timestamp};
use tracing::{debug, error, info};

use crate::config::PoolConfig;
use crate::domain::state::LedgerState;

pub struct SharedLedger {
    state: RwLock<LedgerState>,
    halted: AtomicBool,
    config: PoolConfig,
    clock: Arc<dyn TimeSource>,
}

impl SharedLedger {
    pub fn new(chain: Chain, config: PoolConfig) -> Self {
        Self::with_clock(chain, config, Arc::new(SystemTimeSource))
    }

    pub fn with_clock(chain: Chain, config: PoolConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(chain)),
            halted: AtomicBool::new(false),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Shared read access for scans. Do not hold across an `.await`.
    pub fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read()
    }

    /// True once a seal has failed; every later write is refused.
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Append an already-encoded payload to the pool.
    pub fn admit(&self, payload: Payload) -> Result<()> {
        let mut state = self.state.write();
        self.ensure_writable(&state)?;
        state.admit(payload);
        debug!("[dl-02] Payload admitted, {} pending", state.pool().len());
        Ok(())
    }

    /// Run `check` against the current state and admit the document it
    /// returns, all under one write lock. Two racing requests for the same
    /// id therefore see each other's effect.
    pub fn admit_with<T, F>(&self, check: F) -> Result<T>
    where
        T: Clone + Into<Document>,
        F: FnOnce(&LedgerState) -> Result<T>,
    {
        let mut state = self.state.write();
        self.ensure_writable(&state)?;

        let admitted = check(&state)?;
        let document: Document = admitted.clone().into();
        state.admit(codec::encode(&document)?);
        debug!(
            "[dl-02] {} admitted, {} pending",
            document.id(),
            state.pool().len()
        );
        Ok(admitted)
    }

    pub fn threshold_met(&self) -> bool {
        self.state.read().threshold_met(self.config.seal_threshold)
    }

    /// Seal pending payloads if due (or if `force` and any are pending).
    ///
    /// Returns a snapshot of the whole chain when a block was sealed. Any
    /// sealing failure halts the ledger.
    pub fn seal_pending(&self, force: bool) -> Result<Option<Vec<Block>>> {
        let mut state = self.state.write();
        self.ensure_writable(&state)?;

        let now = self.clock.now();
        match state.seal(self.config.seal_threshold, force, now) {
            Ok(Some(block)) => {
                let (index, count) = (block.index, block.transactions.len());
                info!("[dl-02] Sealed block #{} with {} transactions", index, count);
                Ok(Some(state.chain().blocks().to_vec()))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.halted.store(true, Ordering::SeqCst);
                error!("[dl-02] Sealing failed, ledger halted: {}", e);
                Err(e)
            }
        }
    }

    /// Clone of every sealed block.
    pub fn snapshot(&self) -> Vec<Block> {
        self.state.read().chain().blocks().to_vec()
    }

    pub fn pool_len(&self) -> usize {
        self.state.read().pool().len()
    }

    pub fn chain_len(&self) -> usize {
        self.state.read().chain().len()
    }

    fn ensure_writable(&self, state: &LedgerState) -> Result<()> {
        if self.is_halted() {
            return Err(LedgerError::IntegrityViolation {
                index: state.chain().last_block().index,
                reason: "ledger halted after a failed seal".into(),
            });
        }
        Ok(())
    }
}
