//! Pool and ledger state. Synchronous; locking lives in `service`.

pub mod pool;
pub mod state;
