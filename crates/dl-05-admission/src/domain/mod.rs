//! Admission rules. Everything here is pure; ledger access lives in the
//! service.

pub mod hierarchy;
pub mod rules;
pub mod trace;
