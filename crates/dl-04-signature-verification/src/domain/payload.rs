//! # Payload Equality
//!
//! A valid signature only proves the signer signed *something*. The signed
//! claims must equal the submitted document, ignoring `proof.jws` on both
//! sides, byte for byte in canonical form.

use serde_json::Value;
use shared_crypto::{canonical_eq, strip_proof_signature};

pub fn payloads_equal(submitted: &Value, claims: &Value) -> bool {
    canonical_eq(
        &strip_proof_signature(submitted),
        &strip_proof_signature(claims),
    )
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_order_and_jws_ignored() {
        let submitted = json!({
            "id": "did:batterypass:oem.a",
            "revoked": false,
            "proof": {"type": "EcdsaSecp256r1Signature2019", "jws": "a.b.c"}
        });
        let claims = json!({
            "proof": {"type": "EcdsaSecp256r1Signature2019"},
            "revoked": false,
            "id": "did:batterypass:oem.a"
        });
        assert!(payloads_equal(&submitted, &claims));
    }

    #[test]
    fn test_any_value_difference_detected() {
        let submitted = json!({"id": "did:batterypass:oem.a", "revoked": false});
        let claims = json!({"id": "did:batterypass:oem.a", "revoked": true});
        assert!(!payloads_equal(&submitted, &claims));

        let extra = json!({"id": "did:batterypass:oem.a", "revoked": false, "x": 1});
        assert!(!payloads_equal(&submitted, &extra));
    }
}
