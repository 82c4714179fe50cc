//! # Genesis
//!
//! Builds block 0, optionally carrying the self-anchored root identity.

mod builder;

pub use builder::{GenesisBuilder, GenesisError};
