//! # Pending Pool & Sealing Scheduler (dl-02)
//!
//! Admitted documents wait in the pending pool until the sealing scheduler
//! folds them into the next block.
//!
//! ## Ownership
//!
//! Pool and chain live together in one [`LedgerState`] behind a single
//! `RwLock` inside [`SharedLedger`]. Sealing takes the write lock once:
//! seal, verify the link to the tip, append, clear the pool. Readers never
//! see a payload both pending and sealed, or neither.
//!
//! ## Sealing Loop
//!
//! ```text
//! tick ──threshold met?──→ seal_pending ──→ snapshot ──→ ChainStore::save
//!   ↑                          │                          (lock released)
//!   └──────── watch shutdown ──┴── IntegrityViolation → halt
//! ```
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | `pool.len() >= seal_threshold` | block sealed on the next tick |
//! | seal fails | ledger halted, loop exits, writes refused |
//! | shutdown | loop stops, leftovers force-sealed, chain persisted |

pub mod config;
pub mod domain;
pub mod errors;
pub mod scheduler;
pub mod service;

pub use config::PoolConfig;
pub use domain::pool::PendingPool;
pub use domain::state::LedgerState;
pub use errors::ShutdownError;
pub use scheduler::SealingScheduler;
pub use service::SharedLedger;
