//! Pure verification logic; no ledger access.

pub mod keys;
pub mod payload;
pub mod token;
