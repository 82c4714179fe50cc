//! # Hashing
//!
//! Hex-encoded digests used across the ledger.
//!
//! - SHA-256: block hashes and Merkle nodes
//! - SHA3-256: credential fingerprints

use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// SHA-256 of `data`, lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 over the concatenation of `parts`, lowercase hex.
pub fn sha256_hex_concat(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// SHA3-256 of `data`, lowercase hex.
pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}
