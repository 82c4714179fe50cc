//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material is not valid multibase, or not base58btc
    #[error("Invalid multibase key: {0}")]
    InvalidMultibase(String),

    /// Multicodec prefix is not the P-256 public key codec
    #[error("Unsupported key codec: {0}")]
    UnsupportedKeyCodec(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Point is not an uncompressed P-256 point on the curve
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Token is not a compact JWS
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Header algorithm differs from the expected one
    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch {
        /// Algorithm the verifier requires
        expected: String,
        /// Algorithm named in the token header
        found: String,
    },

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Value cannot be canonicalized
    #[error("Canonicalization failed: {0}")]
    Canonicalization(String),
}
