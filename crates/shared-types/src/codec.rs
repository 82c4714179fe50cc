//! # Document Codec
//!
//! Canonical serialization of ledger documents into transaction payloads.
//! Encoding uses JCS (RFC 8785) so identical documents always produce
//! identical bytes, whatever field order they were built with.

use crate::documents::Document;
use crate::entities::Payload;
use crate::errors::{LedgerError, Result};

pub fn encode(document: &Document) -> Result<Payload> {
    serde_jcs::to_vec(document)
        .map(Payload::new)
        .map_err(|e| LedgerError::InvalidFormat(format!("cannot encode {}: {e}", document.id())))
}

pub fn decode(payload: &Payload) -> Result<Document> {
    serde_json::from_slice(payload.as_bytes())
        .map_err(|e| LedgerError::InvalidFormat(format!("undecodable payload: {e}")))
}
