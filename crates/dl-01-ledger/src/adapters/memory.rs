//! In-memory chain store for tests and the demo mode.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use shared_types::Block;

use crate::ports::outbound::{ChainStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryChainStore {
    blocks: RwLock<Option<Vec<Block>>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `blocks`.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: RwLock::new(Some(blocks)),
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every later save fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Option<Vec<Block>> {
        self.blocks.read().clone()
    }
}

impl ChainStore for InMemoryChainStore {
    fn load(&self) -> Result<Option<Vec<Block>>, StoreError> {
        Ok(self.blocks.read().clone())
    }

    fn save(&self, blocks: &[Block]) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: self.location(),
                message: "simulated write failure".into(),
            });
        }
        *self.blocks.write() = Some(blocks.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}
