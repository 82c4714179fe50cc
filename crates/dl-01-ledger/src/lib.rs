//! # Ledger (dl-01)
//!
//! The block/chain integrity engine. Owns block construction, block hashing,
//! Merkle roots and whole-chain validation, plus the port through which the
//! chain is loaded from and saved to durable storage.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Self-hash | `hash == SHA256(index ‖ timestamp ‖ previousHash ‖ merkleRoot)` |
//! | 2 | Sequential | `index == predecessor.index + 1` |
//! | 3 | Linked | `previousHash == predecessor.hash`; genesis uses `"0"` |
//! | 4 | Merkle | `merkleRoot` recomputes from the transactions; `"0"` when empty |
//! | 5 | Non-empty | a chain always holds its genesis block |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - blocks, Merkle tree, chain, validation
//! - `ports/` - `ChainStore` and `TimeSource` driven ports
//! - `adapters/` - JSON file store and in-memory store
//!
//! ## Usage
//!
//! ```ignore
//! use dl_01_ledger::{genesis_block, Chain};
//!
//! let mut chain = Chain::new(genesis_block(None, now)?);
//! let block = chain.seal_next(pending, now)?;
//! chain.append(block)?;
//! assert!(validate_chain(chain.blocks()));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryChainStore, JsonFileStore};
pub use domain::block::{compute_block_hash, genesis_block, seal_block};
pub use domain::chain::Chain;
pub use domain::merkle::{merkle_root, MerkleTree};
pub use domain::validation::{validate_chain, verify_block, verify_chain, verify_link};
pub use ports::outbound::{
    ChainStore, ManualTimeSource, StoreError, SystemTimeSource, TimeSource,
};
