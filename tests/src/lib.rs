//! # DID-Ledger Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Signing actors, anchored test ledgers
//! └── integration/      # Cross-subsystem flows
//!     ├── admission_flows.rs
//!     ├── sealing_flows.rs
//!     └── persistence_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dl-tests
//! cargo test -p dl-tests integration::sealing_flows
//!
//! # Benchmarks
//! cargo bench -p dl-tests
//! ```

pub mod fixtures;
pub mod integration;
