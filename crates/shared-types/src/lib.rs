//! # Shared Types Crate
//!
//! Domain entities, document types and error kinds shared by every ledger
//! subsystem.
//!
//! ## Contents
//!
//! - `entities` - `Block` and the opaque transaction `Payload`
//! - `documents` - Identity Documents, Credential Records and the request-side
//!   credential/presentation shapes
//! - `codec` - canonical encode/decode of ledger documents to payload bytes
//! - `identifiers` - DID / URN syntax and verification-method ownership
//! - `errors` - `LedgerError`, the error kinds every operation returns
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-subsystem types are defined here.
//! - **Tagged Envelope**: a ledger payload always decodes to exactly one
//!   `Document` variant, selected by its `type` field.

pub mod codec;
pub mod documents;
pub mod entities;
pub mod errors;
pub mod identifiers;

pub use codec::{decode, encode};
pub use documents::*;
pub use entities::*;
pub use errors::*;
pub use identifiers::{
    identity_type, is_valid_did, is_valid_urn, key_reference, owner_of, require_did,
    require_urn, DID_PREFIX, KEY_FRAGMENT,
};
