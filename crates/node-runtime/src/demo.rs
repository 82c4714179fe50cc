//! # Demo
//!
//! Builds a small ledger in memory, end to end through admission:
//!
//! ```text
//! eu (genesis) ── signs ──→ oem.acme ── signs ──→ bms.cell-7
//!                              │
//!                              └── issues credential to bms.cell-7
//!                                        └── presented by bms.cell-7
//! ```
//!
//! Every stage is sealed before the next, since pending identities cannot
//! sign.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use dl_01_ledger::{Chain, SystemTimeSource, TimeSource};
use dl_02_pending_pool::{PoolConfig, SharedLedger};
use dl_05_admission::AdmissionController;
use serde_json::{json, Value};
use shared_crypto::{encode_public_key_multibase, sign_es256, P256KeyPair};
use shared_types::{key_reference, IdentityDocument, VerificationMethod, VERIFICATION_METHOD_TYPE, PROOF_TYPE};
use tracing::info;
use uuid::Uuid;

use crate::genesis::GenesisBuilder;

pub const DEMO_ROOT: &str = "did:batterypass:eu";
pub const DEMO_OEM: &str = "did:batterypass:oem.acme";
pub const DEMO_BMS: &str = "did:batterypass:bms.cell-7";

/// Run the demo flow and return the controller over the resulting ledger.
pub fn run_demo() -> Result<AdmissionController> {
    let clock = SystemTimeSource;
    let root = P256KeyPair::generate();
    let oem = P256KeyPair::generate();
    let bms = P256KeyPair::generate();

    let anchor = IdentityDocument {
        context: vec!["https://www.w3.org/ns/did/v1".into()],
        id: DEMO_ROOT.into(),
        verification_method: VerificationMethod {
            id: key_reference(DEMO_ROOT),
            method_type: VERIFICATION_METHOD_TYPE.into(),
            controller: DEMO_ROOT.into(),
            public_key_multibase: encode_public_key_multibase(&root.public_key()),
        },
        service: vec![],
        revoked: false,
        timestamp: clock.now(),
    };
    let genesis = GenesisBuilder::new().with_anchor(anchor).build(clock.now())?;
    let ledger = Arc::new(SharedLedger::new(Chain::new(genesis), PoolConfig::default()));
    let admission = AdmissionController::new(Arc::clone(&ledger));

    admission
        .create_or_modify_identity(&identity_request(DEMO_OEM, &oem, DEMO_ROOT, &root)?)
        .context("oem identity rejected")?;
    ledger.seal_pending(true)?;

    admission
        .create_or_modify_identity(&identity_request(DEMO_BMS, &bms, DEMO_OEM, &oem)?)
        .context("bms identity rejected")?;
    ledger.seal_pending(true)?;

    let now = clock.now();
    let credential = signed(
        json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "id": format!("urn:uuid:{}", Uuid::new_v4()),
            "type": ["VerifiableCredential", "BatteryDataAccess"],
            "issuer": DEMO_OEM,
            "issuanceDate": now - Duration::minutes(1),
            "expirationDate": now + Duration::days(365),
            "credentialSubject": {"id": DEMO_BMS, "accessLevel": ["read"]}
        }),
        DEMO_OEM,
        &oem,
    )?;
    let record = admission
        .create_credential(&credential)
        .context("credential rejected")?;
    ledger.seal_pending(true)?;
    info!("[node] Demo credential {} recorded", record.id);

    let presentation = signed(
        json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiablePresentation"],
            "holder": DEMO_BMS,
            "verifiableCredential": [credential]
        }),
        DEMO_BMS,
        &bms,
    )?;
    let verified = admission
        .verify_presentation(&presentation)
        .context("presentation rejected")?;
    info!(
        "[node] Demo presentation by {} verified ({} credentials)",
        verified.holder,
        verified.credentials.len()
    );

    Ok(admission)
}

fn did_document(did: &str, key: &P256KeyPair) -> Value {
    json!({
        "@context": ["https://www.w3.org/ns/did/v1"],
        "id": did,
        "verificationMethod": {
            "id": key_reference(did),
            "type": VERIFICATION_METHOD_TYPE,
            "controller": did,
            "publicKeyMultibase": encode_public_key_multibase(&key.public_key())
        }
    })
}

fn proof(signer: &str) -> Value {
    json!({
        "type": PROOF_TYPE,
        "created": chrono::Utc::now(),
        "verificationMethod": key_reference(signer),
        "proofPurpose": "assertionMethod"
    })
}

fn identity_request(subject: &str, subject_key: &P256KeyPair, signer: &str, signer_key: &P256KeyPair) -> Result<Value> {
    let payload = did_document(subject, subject_key);
    let mut proof = proof(signer);
    proof["jws"] = json!(sign_es256(&payload, signer_key)?);
    Ok(json!({"payload": payload, "proof": proof}))
}

fn signed(mut document: Value, signer: &str, key: &P256KeyPair) -> Result<Value> {
    document["proof"] = proof(signer);
    let jws = sign_es256(&document, key)?;
    document["proof"]["jws"] = json!(jws);
    Ok(document)
}
