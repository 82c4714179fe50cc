//! # Cross-Field Rules
//!
//! Checks that need nothing but the submitted document and the clock.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared_crypto::{canonical_bytes, decode_public_key_multibase, sha3_256_hex};
use shared_types::{
    owner_of, require_did, require_urn, IdentityDocument, LedgerError, Result, ServiceEndpoint,
    Timestamp, VerifiableCredential, VerificationMethod,
};

/// Parse a raw request into its typed view.
pub fn parse<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| LedgerError::InvalidFormat(format!("malformed {what}: {e}")))
}

/// DID document as submitted in a create/modify request. The ledger stamps
/// the timestamp itself, so any submitted one is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedIdentity {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,
    pub id: String,
    pub verification_method: VerificationMethod,
    #[serde(default)]
    pub service: Vec<ServiceEndpoint>,
    #[serde(default)]
    pub revoked: bool,
}

impl SubmittedIdentity {
    pub fn into_document(self, now: Timestamp) -> IdentityDocument {
        IdentityDocument {
            context: self.context,
            id: self.id,
            verification_method: self.verification_method,
            service: self.service,
            revoked: false,
            timestamp: now,
        }
    }
}

/// Syntax and self-consistency of a submitted DID document.
pub fn check_identity_payload(identity: &SubmittedIdentity) -> Result<()> {
    require_did(&identity.id)?;
    if owner_of(&identity.verification_method.id) != identity.id {
        return Err(LedgerError::semantic(
            &identity.id,
            format!(
                "verification method {} is not owned by the identity",
                identity.verification_method.id
            ),
        ));
    }
    if identity.revoked {
        return Err(LedgerError::semantic(
            &identity.id,
            "create/modify cannot set revoked; use revocation",
        ));
    }
    decode_public_key_multibase(&identity.verification_method.public_key_multibase).map_err(
        |e| {
            LedgerError::InvalidFormat(format!(
                "unusable key in {}: {e}",
                identity.verification_method.id
            ))
        },
    )?;
    Ok(())
}

/// Issuer, holder and subject consistency of a credential.
pub fn check_credential_fields(vc: &VerifiableCredential) -> Result<()> {
    require_urn(&vc.id)?;
    require_did(&vc.issuer)?;
    require_did(&vc.credential_subject.id)?;

    let signer = vc.proof.signer();
    if signer != vc.issuer {
        return Err(LedgerError::semantic(
            &vc.id,
            format!("signed by {signer}, but issuer is {}", vc.issuer),
        ));
    }
    if let Some(holder) = &vc.holder {
        if *holder != vc.credential_subject.id {
            return Err(LedgerError::semantic(
                &vc.id,
                format!(
                    "holder {holder} differs from credential subject {}",
                    vc.credential_subject.id
                ),
            ));
        }
    }
    Ok(())
}

/// `issuanceDate <= now < expirationDate`. Not yet valid is a semantic
/// error; already expired is a conflict.
pub fn check_validity_window(vc: &VerifiableCredential, now: Timestamp) -> Result<()> {
    if vc.issuance_date > now {
        return Err(LedgerError::semantic(
            &vc.id,
            format!("issuance date {} is in the future", vc.issuance_date),
        ));
    }
    match vc.expiration_date {
        Some(expiry) if expiry <= now => Err(LedgerError::conflict(
            &vc.id,
            format!("credential expired at {expiry}"),
        )),
        _ => Ok(()),
    }
}

/// Hex SHA3-256 over the canonical JSON of the credential as submitted.
pub fn credential_fingerprint(vc: &Value) -> Result<String> {
    let bytes = canonical_bytes(vc).map_err(|e| LedgerError::InvalidFormat(e.to_string()))?;
    Ok(sha3_256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use shared_crypto::{encode_public_key_multibase, P256KeyPair, P256_MULTICODEC};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn vc(issuer: &str, subject: &str, holder: Option<&str>) -> Value {
        let mut vc = json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "id": "urn:uuid:8c4f0d9e-3b1a-4c7e-9f2d-1a2b3c4d5e6f",
            "type": ["VerifiableCredential"],
            "issuer": issuer,
            "issuanceDate": "2025-05-01T00:00:00Z",
            "expirationDate": "2026-05-01T00:00:00Z",
            "credentialSubject": {"id": subject, "role": "maintenance"},
            "proof": {
                "type": "EcdsaSecp256r1Signature2019",
                "created": "2025-05-01T00:00:00Z",
                "verificationMethod": format!("{issuer}#key-1"),
                "proofPurpose": "assertionMethod",
                "jws": "a.b.c"
            }
        });
        if let Some(holder) = holder {
            vc["holder"] = json!(holder);
        }
        vc
    }

    #[test]
    fn test_identity_payload_owner_must_match() {
        let identity: SubmittedIdentity = parse(
            &json!({
                "id": "did:batterypass:bms.1",
                "verificationMethod": {
                    "id": "did:batterypass:bms.2#key-1",
                    "type": "JsonWebKey2020",
                    "controller": "did:batterypass:bms.1",
                    "publicKeyMultibase": "z"
                }
            }),
            "identity",
        )
        .unwrap();
        assert!(matches!(
            check_identity_payload(&identity),
            Err(LedgerError::SemanticViolation { .. })
        ));
    }

    fn identity_with_key(material: &str) -> SubmittedIdentity {
        parse(
            &json!({
                "id": "did:batterypass:bms.1",
                "verificationMethod": {
                    "id": "did:batterypass:bms.1#key-1",
                    "type": "JsonWebKey2020",
                    "controller": "did:batterypass:bms.1",
                    "publicKeyMultibase": material
                }
            }),
            "identity",
        )
        .unwrap()
    }

    #[test]
    fn test_identity_payload_key_must_decode() {
        let key = P256KeyPair::generate().public_key();
        assert!(check_identity_payload(&identity_with_key(&encode_public_key_multibase(&key))).is_ok());

        let mut off_curve = P256_MULTICODEC.to_vec();
        off_curve.push(0x04);
        off_curve.extend_from_slice(&[0x01u8; 64]);
        let off_curve = multibase::encode(multibase::Base::Base58Btc, off_curve);

        for material in ["zzz", "", off_curve.as_str()] {
            assert!(matches!(
                check_identity_payload(&identity_with_key(material)),
                Err(LedgerError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_credential_fields() {
        let ok: VerifiableCredential = parse(
            &vc("did:batterypass:oem.a", "did:batterypass:bms.1", Some("did:batterypass:bms.1")),
            "credential",
        )
        .unwrap();
        assert!(check_credential_fields(&ok).is_ok());
        assert!(check_validity_window(&ok, now()).is_ok());

        let wrong_holder: VerifiableCredential = parse(
            &vc("did:batterypass:oem.a", "did:batterypass:bms.1", Some("did:batterypass:bms.2")),
            "credential",
        )
        .unwrap();
        assert!(matches!(
            check_credential_fields(&wrong_holder),
            Err(LedgerError::SemanticViolation { .. })
        ));

        let mut forged = ok.clone();
        forged.issuer = "did:batterypass:oem.b".into();
        assert!(check_credential_fields(&forged).is_err());
    }

    #[test]
    fn test_validity_window() {
        let vc: VerifiableCredential =
            parse(&vc("did:batterypass:oem.a", "did:batterypass:bms.1", None), "credential").unwrap();

        assert!(matches!(
            check_validity_window(&vc, now() - Duration::days(60)),
            Err(LedgerError::SemanticViolation { .. })
        ));
        assert!(matches!(
            check_validity_window(&vc, now() + Duration::days(365)),
            Err(LedgerError::Conflict { .. })
        ));
    }

    #[test]
    fn test_fingerprint_ignores_field_order() {
        let a = json!({"id": "x", "issuer": "y"});
        let b = json!({"issuer": "y", "id": "x"});
        assert_eq!(credential_fingerprint(&a).unwrap(), credential_fingerprint(&b).unwrap());
        assert_eq!(credential_fingerprint(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_parse_reports_invalid_format() {
        assert!(matches!(
            parse::<SubmittedIdentity>(&json!({"id": 5}), "identity"),
            Err(LedgerError::InvalidFormat(_))
        ));
    }
}
