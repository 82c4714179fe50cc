//! # Admission Controller (dl-05)
//!
//! Gatekeeper for every write to the ledger, and its read surface.
//!
//! ## Request Lifecycle
//!
//! ```text
//! Received → KeyResolved → SignatureVerified → SemanticallyValid → Admitted
//!     └──────────────┴────────────┴──────────────────┴──────→ Rejected
//! ```
//!
//! ## Operations
//!
//! | Operation | Signed by | Admits |
//! |-----------|-----------|--------|
//! | `create_or_modify_identity` | an authority over the subject type (or the subject, to modify) | `IdentityDocument` |
//! | `revoke_identity` | the subject or an authority | revoked `IdentityDocument` |
//! | `create_credential` | the issuer | `CredentialRecord` |
//! | `revoke_credential` | the issuer | expired `CredentialRecord` |
//! | `verify_presentation` | the holder | nothing |
//!
//! ## Security Notes
//!
//! - State checks and the admit run under one write lock. A request never
//!   lands on state it was not checked against.
//! - A proof must verify AND its claims must equal the submitted document.
//!   A valid signature over something else is `PayloadMismatch`.
//! - `eu` identities only enter through the genesis block.

pub mod domain;
pub mod query;
pub mod service;

pub use domain::hierarchy::{allowed_authorities, check_authority, ROOT_TYPE};
pub use domain::rules::credential_fingerprint;
pub use domain::trace::{RequestStage, RequestTrace};
pub use service::{AdmissionController, VerifiedPresentation};
