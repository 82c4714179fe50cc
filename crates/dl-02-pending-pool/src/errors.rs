//! Error types for the sealing scheduler.

use dl_01_ledger::StoreError;
use shared_types::LedgerError;
use thiserror::Error;

/// Why a graceful shutdown could not complete.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The ledger halted during operation; nothing was persisted.
    #[error("Ledger halted after an integrity failure")]
    Halted,

    /// The final force-seal failed.
    #[error("Ledger error during shutdown: {0}")]
    Ledger(#[from] LedgerError),

    /// The final chain could not be persisted.
    #[error("Failed to persist chain: {0}")]
    Store(#[from] StoreError),

    /// The sealing task panicked or was aborted.
    #[error("Sealing task failed: {0}")]
    Task(String),
}
