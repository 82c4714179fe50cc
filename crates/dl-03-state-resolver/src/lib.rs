//! # State Resolver (dl-03)
//!
//! Derives the current status of an identity or credential by replaying the
//! pending pool and the chain. Nothing is indexed: every query is a linear
//! scan, newest first.
//!
//! ## Scan Order
//!
//! 1. Pending pool, most recently admitted first
//! 2. Blocks from the tip down to genesis
//! 3. Within a block, last transaction first
//!
//! The first document with a matching id decides.
//!
//! ## Lifecycles
//!
//! ```text
//! Identity:    Absent → Valid ⇄ Pending → Revoked
//! Credential:  Absent → Valid → Expired        (+ Pending, Tampered)
//! ```

pub mod domain;

pub use domain::resolver::{
    find_latest_credential, find_latest_identity, list_identities, resolve_credential_state,
    resolve_identity_state,
};
pub use domain::scan::{Location, ScannedDocument};
pub use domain::states::{CredentialState, IdentityState};
