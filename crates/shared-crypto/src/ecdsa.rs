//! # ECDSA Signatures (P-256)
//!
//! Identity keys on the ledger are NIST P-256 keys, published as uncompressed
//! SEC1 points and used for ES256 proofs.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Public keys are checked to lie on the curve when constructed
//! - `SigningKey` zeroizes its scalar on drop; scalar copies passed to
//!   `from_bytes` are wiped once parsed

use crate::CryptoError;
use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroize;

/// Length of an uncompressed SEC1 point: `0x04 || X || Y`.
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

/// Uncompressed P-256 public key (65 bytes) known to lie on the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct P256PublicKey([u8; UNCOMPRESSED_POINT_LEN]);

impl P256PublicKey {
    /// Create from an uncompressed point, rejecting anything off the curve.
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != UNCOMPRESSED_POINT_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: UNCOMPRESSED_POINT_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[0] != 0x04 {
            return Err(CryptoError::InvalidPublicKey(format!(
                "expected uncompressed point tag 0x04, found {:#04x}",
                bytes[0]
            )));
        }

        let (x, y) = bytes[1..].split_at(32);
        Self::from_coordinates(x, y)
    }

    /// Create from the two 32-byte affine coordinates.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, CryptoError> {
        if x.len() != 32 || y.len() != 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 64,
                actual: x.len() + y.len(),
            });
        }

        let mut point = [0u8; UNCOMPRESSED_POINT_LEN];
        point[0] = 0x04;
        point[1..33].copy_from_slice(x);
        point[33..].copy_from_slice(y);

        // Curve membership check
        p256::PublicKey::from_sec1_bytes(&point)
            .map_err(|_| CryptoError::InvalidPublicKey("point is not on P-256".into()))?;
        Ok(Self(point))
    }

    /// Get raw uncompressed bytes.
    pub fn as_bytes(&self) -> &[u8; UNCOMPRESSED_POINT_LEN] {
        &self.0
    }

    /// Affine X coordinate.
    pub fn x(&self) -> &[u8] {
        &self.0[1..33]
    }

    /// Affine Y coordinate.
    pub fn y(&self) -> &[u8] {
        &self.0[33..]
    }

    /// Verify a signature over `message` (SHA-256 prehash, as ES256 requires).
    pub fn verify(&self, message: &[u8], signature: &P256Signature) -> Result<(), CryptoError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(&self.0)
            .map_err(|_| CryptoError::InvalidPublicKey("point is not on P-256".into()))?;

        let sig =
            Signature::from_slice(&signature.0).map_err(|_| CryptoError::InvalidSignatureFormat)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct P256Signature([u8; 64]);

impl P256Signature {
    /// Create from bytes; the length must be exactly 64.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(raw))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// P-256 ECDSA keypair.
pub struct P256KeyPair {
    signing_key: SigningKey,
}

impl P256KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret scalar bytes (32 bytes).
    pub fn from_bytes(mut bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let parsed = SigningKey::from_slice(&bytes);
        bytes.zeroize();
        let signing_key = parsed.map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get the uncompressed public key.
    pub fn public_key(&self) -> P256PublicKey {
        let public = p256::PublicKey::from(self.signing_key.verifying_key());
        let encoded = public.to_encoded_point(false);
        let mut bytes = [0u8; UNCOMPRESSED_POINT_LEN];
        bytes.copy_from_slice(encoded.as_bytes());
        P256PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> P256Signature {
        let sig: Signature = self.signing_key.sign(message);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&sig.to_bytes());
        P256Signature(bytes)
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.signing_key.to_bytes());
        bytes
    }
}
