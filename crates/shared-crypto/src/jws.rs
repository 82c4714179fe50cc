//! # Compact JWS (ES256)
//!
//! Proofs carry a compact JWS `header.payload.signature`, each segment
//! base64url without padding. The signature is a raw 64-byte `r || s` P-256
//! ECDSA signature over the ASCII `header.payload`.
//!
//! The header algorithm is matched exactly against `ES256` before any
//! cryptography runs, so `none`, HMAC or RSA headers can never be accepted
//! with an EC key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::canonical::canonical_bytes;
use crate::ecdsa::{P256KeyPair, P256PublicKey, P256Signature};
use crate::CryptoError;

/// The only accepted JWS algorithm.
pub const ES256: &str = "ES256";

/// A parsed compact JWS with an embedded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactJws {
    header: Value,
    payload: Vec<u8>,
    signature: Vec<u8>,
    signing_input: String,
}

impl CompactJws {
    /// Split and decode a compact token. Detached payloads are rejected.
    pub fn parse(token: &str) -> Result<Self, CryptoError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        let &[header_b64, payload_b64, signature_b64] = segments.as_slice() else {
            return Err(CryptoError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };
        if payload_b64.is_empty() {
            return Err(CryptoError::MalformedToken(
                "detached payloads are not supported".into(),
            ));
        }

        let header: Value = serde_json::from_slice(&decode_segment(header_b64, "header")?)
            .map_err(|e| CryptoError::MalformedToken(format!("header is not JSON: {e}")))?;
        if !header.is_object() {
            return Err(CryptoError::MalformedToken("header is not a JSON object".into()));
        }

        Ok(Self {
            header,
            payload: decode_segment(payload_b64, "payload")?,
            signature: decode_segment(signature_b64, "signature")?,
            signing_input: format!("{header_b64}.{payload_b64}"),
        })
    }

    /// `alg` from the protected header, if present.
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload parsed as a JSON object.
    pub fn claims(&self) -> Result<Value, CryptoError> {
        let claims: Value = serde_json::from_slice(&self.payload)
            .map_err(|e| CryptoError::MalformedToken(format!("payload is not JSON: {e}")))?;
        if !claims.is_object() {
            return Err(CryptoError::MalformedToken("payload is not a JSON object".into()));
        }
        Ok(claims)
    }

    /// Check the algorithm is exactly ES256, then verify the signature.
    pub fn verify_es256(&self, key: &P256PublicKey) -> Result<(), CryptoError> {
        match self.algorithm() {
            Some(ES256) => {}
            other => {
                return Err(CryptoError::AlgorithmMismatch {
                    expected: ES256.to_string(),
                    found: other.unwrap_or("<missing>").to_string(),
                })
            }
        }

        let signature = P256Signature::from_slice(&self.signature)?;
        key.verify(self.signing_input.as_bytes(), &signature)
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, CryptoError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| CryptoError::MalformedToken(format!("{name} is not base64url: {e}")))
}

/// Produce a compact ES256 JWS over the canonical bytes of `claims`.
pub fn sign_es256(claims: &Value, keypair: &P256KeyPair) -> Result<String, CryptoError> {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"ES256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(canonical_bytes(claims)?);
    let signing_input = format!("{header}.{payload}");
    let signature = keypair.sign(signing_input.as_bytes());
    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature.as_bytes())
    ))
}
