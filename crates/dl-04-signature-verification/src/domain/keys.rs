//! # Key Decoding
//!
//! `publicKeyMultibase` → P-256 key. Any decoding failure means the
//! reference does not resolve to a usable key.

use shared_crypto::{decode_public_key_multibase, P256PublicKey};
use shared_types::SignatureFailure;

/// Decode key material published under `reference`.
pub fn decode_key(material: &str, reference: &str) -> Result<P256PublicKey, SignatureFailure> {
    decode_public_key_multibase(material).map_err(|e| SignatureFailure::KeyUnresolvable {
        reference: reference.to_string(),
        reason: e.to_string(),
    })
}
