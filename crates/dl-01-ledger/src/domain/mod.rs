//! Ledger domain logic. Pure: no I/O, no locking.

pub mod block;
pub mod chain;
pub mod merkle;
pub mod validation;
