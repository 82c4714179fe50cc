//! # Node Runtime Library
//!
//! Configuration, genesis creation and the runtime that wires the ledger
//! subsystems together. The `node-runtime` binary is a thin CLI over it.

pub mod config;
pub mod demo;
pub mod genesis;
pub mod inspect;
pub mod runtime;

pub use config::{ConfigError, LedgerConfig, NodeConfig, StorageConfig};
pub use genesis::{GenesisBuilder, GenesisError};
pub use runtime::{load_or_create_chain, NodeRuntime};
