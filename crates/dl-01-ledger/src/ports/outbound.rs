//! # Outbound Ports (Driven Ports)
//!
//! What the ledger needs from its host: somewhere to keep the chain, and a
//! clock.

use parking_lot::Mutex;
use shared_types::{Block, Timestamp};
use thiserror::Error;

/// Storage failures. Kept apart from `LedgerError`: a failed save never
/// changes what the ledger has admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Chain store {path} is locked by another process")]
    Locked { path: String },
}

/// Whole-chain blob store.
///
/// Production: `JsonFileStore`
/// Testing: `InMemoryChainStore`
pub trait ChainStore: Send + Sync {
    /// Load the persisted chain, or `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError>;

    /// Replace the persisted chain with `blocks`.
    fn save(&self, blocks: &[Block]) -> Result<(), StoreError>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

/// Clock used when sealing blocks and stamping documents.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<Timestamp>,
}

impl ManualTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}
