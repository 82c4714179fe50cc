//! # Token Verification
//!
//! Compact ES256 JWS verification under an already-resolved key.

use serde_json::Value;
use shared_crypto::{CompactJws, CryptoError, P256PublicKey};
use shared_types::SignatureFailure;

/// Verify `token` under `key` and return its claims (a JSON object).
pub fn verify_token(token: &str, key: &P256PublicKey) -> Result<Value, SignatureFailure> {
    let jws = CompactJws::parse(token).map_err(to_failure)?;
    jws.verify_es256(key).map_err(to_failure)?;
    jws.claims().map_err(to_failure)
}

fn to_failure(e: CryptoError) -> SignatureFailure {
    match e {
        CryptoError::AlgorithmMismatch { expected, found } => {
            SignatureFailure::AlgorithmMismatch { expected, found }
        }
        CryptoError::SignatureVerificationFailed => SignatureFailure::Cryptographic,
        other => SignatureFailure::MalformedToken(other.to_string()),
    }
}
