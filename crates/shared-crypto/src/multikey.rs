//! # Multibase Public Keys
//!
//! `publicKeyMultibase` values are `z` + base58btc(multicodec ‖ point), where
//! the multicodec tag for a P-256 public key is `0x12 0x00` and the point is
//! the 65-byte uncompressed SEC1 encoding.

use multibase::Base;

use crate::ecdsa::P256PublicKey;
use crate::CryptoError;

/// Multicodec prefix identifying a P-256 public key.
pub const P256_MULTICODEC: [u8; 2] = [0x12, 0x00];

/// Decode a `publicKeyMultibase` string into a P-256 key on the curve.
pub fn decode_public_key_multibase(material: &str) -> Result<P256PublicKey, CryptoError> {
    let (base, bytes) =
        multibase::decode(material).map_err(|e| CryptoError::InvalidMultibase(e.to_string()))?;
    if base != Base::Base58Btc {
        return Err(CryptoError::InvalidMultibase(format!(
            "expected base58btc encoding, found {base:?}"
        )));
    }

    let point = bytes.strip_prefix(&P256_MULTICODEC[..]).ok_or_else(|| {
        let tag = bytes.iter().take(2).map(|b| format!("{b:02x}")).collect::<String>();
        CryptoError::UnsupportedKeyCodec(format!("expected 1200, found {tag}"))
    })?;

    P256PublicKey::from_uncompressed(point)
}

/// Encode a P-256 key as `publicKeyMultibase`.
pub fn encode_public_key_multibase(key: &P256PublicKey) -> String {
    let mut bytes = Vec::with_capacity(P256_MULTICODEC.len() + key.as_bytes().len());
    bytes.extend_from_slice(&P256_MULTICODEC);
    bytes.extend_from_slice(key.as_bytes());
    multibase::encode(Base::Base58Btc, bytes)
}
