//! # Shared Crypto - Ledger Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA3-256 | Block hashes, Merkle nodes, credential fingerprints |
//! | `canonical` | JCS (RFC 8785) | Field-order independent comparison and hashing |
//! | `ecdsa` | ECDSA P-256 | Identity keys |
//! | `multikey` | multibase base58btc + multicodec | Public key encoding in DID documents |
//! | `jws` | Compact JWS, ES256 | Document proofs |
//!
//! ## Security Properties
//!
//! - **P-256 keys**: only uncompressed points that lie on the curve are accepted
//! - **JWS**: the header algorithm must be exactly `ES256`; anything else is
//!   rejected before the signature is looked at
//! - **ECDSA**: RFC 6979 deterministic nonces

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod jws;
pub mod multikey;

// Re-exports
pub use canonical::{canonical_bytes, canonical_eq, strip_proof_signature};
pub use ecdsa::{P256KeyPair, P256PublicKey, P256Signature};
pub use errors::CryptoError;
pub use hashing::{sha256_hex, sha256_hex_concat, sha3_256_hex};
pub use jws::{sign_es256, CompactJws, ES256};
pub use multikey::{decode_public_key_multibase, encode_public_key_multibase, P256_MULTICODEC};
