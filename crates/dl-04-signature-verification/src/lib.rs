//! # Key Resolver & Signature Verifier (dl-04)
//!
//! Turns a verification-method reference into a P-256 key taken from the
//! ledger, verifies compact ES256 proofs under that key, and checks that
//! what was signed is what was submitted.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): key decoding, token verification, payload equality
//! - **Ports Layer** (`ports/`): `KeyDirectory`, where identities are looked up
//! - **Adapters** (`adapters/`): `KeyDirectory` over the ledger state
//! - **Service Layer** (`service.rs`): `SignatureVerifier`, resolution plus verification
//!
//! ## Security Notes
//!
//! - Keys are only taken from identities in the `Valid` state. Pending and
//!   revoked identities cannot sign.
//! - The token header must say exactly `ES256`. Algorithm confusion is
//!   rejected before any cryptography runs.
//! - Signature failures are reported by cause (key, algorithm, token,
//!   cryptography) and never collapsed into one boolean.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::keys::decode_key;
pub use domain::payload::payloads_equal;
pub use domain::token::verify_token;
pub use ports::outbound::KeyDirectory;
pub use service::SignatureVerifier;
