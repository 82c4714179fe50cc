//! # Canonical JSON
//!
//! JCS (RFC 8785) serialization: sorted keys, compact separators, fixed
//! number formatting. Two documents with the same content produce the same
//! bytes regardless of field order.

use serde::Serialize;
use serde_json::Value;

use crate::CryptoError;

/// JCS bytes of any serializable value.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CryptoError> {
    serde_jcs::to_vec(value).map_err(|e| CryptoError::Canonicalization(e.to_string()))
}

/// Copy of `document` without `proof.jws`.
///
/// A signature cannot cover itself, so this is the form a signer signs and
/// the form a verifier compares.
pub fn strip_proof_signature(document: &Value) -> Value {
    let mut stripped = document.clone();
    if let Some(proof) = stripped.get_mut("proof").and_then(Value::as_object_mut) {
        proof.remove("jws");
    }
    stripped
}

/// True when both values have identical canonical bytes.
pub fn canonical_eq(a: &Value, b: &Value) -> Result<bool, CryptoError> {
    Ok(canonical_bytes(a)? == canonical_bytes(b)?)
}
