//! Driven ports of the ledger.

pub mod outbound;
