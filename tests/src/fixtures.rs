//! # Test Fixtures
//!
//! Signing actors and a ledger anchored on a generated root identity. Every
//! document built here is signed the way a real client signs: the proof
//! covers the document with `proof.jws` absent.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use dl_01_ledger::{genesis_block, Chain, ManualTimeSource};
use dl_02_pending_pool::{PoolConfig, SharedLedger};
use dl_05_admission::AdmissionController;
use serde_json::{json, Value};
use shared_crypto::{encode_public_key_multibase, sign_es256, P256KeyPair};
use shared_types::{
    codec, key_reference, Document, IdentityDocument, Payload, Timestamp, VerificationMethod,
    PROOF_TYPE, VERIFICATION_METHOD_TYPE,
};

pub const ROOT_DID: &str = "did:batterypass:eu";

/// Fixed start of every test clock.
pub fn epoch() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// An identity with its signing key.
pub struct Actor {
    pub did: String,
    pub key: P256KeyPair,
}

impl Actor {
    pub fn new(did: &str) -> Self {
        Self {
            did: did.to_string(),
            key: P256KeyPair::generate(),
        }
    }

    pub fn did_document(&self) -> Value {
        json!({
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": self.did,
            "verificationMethod": {
                "id": key_reference(&self.did),
                "type": VERIFICATION_METHOD_TYPE,
                "controller": self.did,
                "publicKeyMultibase": encode_public_key_multibase(&self.key.public_key())
            }
        })
    }

    pub fn identity_document(&self, now: Timestamp) -> IdentityDocument {
        IdentityDocument {
            context: vec!["https://www.w3.org/ns/did/v1".into()],
            id: self.did.clone(),
            verification_method: VerificationMethod {
                id: key_reference(&self.did),
                method_type: VERIFICATION_METHOD_TYPE.into(),
                controller: self.did.clone(),
                public_key_multibase: encode_public_key_multibase(&self.key.public_key()),
            },
            service: vec![],
            revoked: false,
            timestamp: now,
        }
    }

    fn proof(&self) -> Value {
        json!({
            "type": PROOF_TYPE,
            "created": "2025-05-01T00:00:00Z",
            "verificationMethod": key_reference(&self.did),
            "proofPurpose": "assertionMethod"
        })
    }

    /// `{payload, proof}` create/modify request for `subject`, signed by self.
    pub fn identity_request(&self, subject: &Actor) -> Value {
        self.sign_payload(subject.did_document())
    }

    /// `{payload, proof}` with the proof over `payload` as given.
    pub fn sign_payload(&self, payload: Value) -> Value {
        let mut proof = self.proof();
        proof["jws"] = json!(sign_es256(&payload, &self.key).unwrap());
        json!({"payload": payload, "proof": proof})
    }

    /// `document` with an embedded proof over itself.
    pub fn sign(&self, mut document: Value) -> Value {
        document["proof"] = self.proof();
        let jws = sign_es256(&document, &self.key).unwrap();
        document["proof"]["jws"] = json!(jws);
        document
    }

    /// Signed `{id, proof}` revocation request.
    pub fn revocation(&self, id: &str) -> Value {
        self.sign(json!({"id": id}))
    }

    /// Unsigned credential issued by self to `subject`.
    pub fn credential(&self, id: &str, subject: &Actor) -> Value {
        json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "id": id,
            "type": ["VerifiableCredential", "BatteryDataAccess"],
            "issuer": self.did,
            "issuanceDate": epoch() - Duration::days(30),
            "expirationDate": epoch() + Duration::days(365),
            "credentialSubject": {"id": subject.did, "accessLevel": ["read"]}
        })
    }

    /// Presentation of already-signed credentials, signed by self.
    pub fn presentation(&self, credentials: Vec<Value>) -> Value {
        self.sign(json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiablePresentation"],
            "holder": self.did,
            "verifiableCredential": credentials
        }))
    }
}

/// Ledger anchored on `root`, with a manual clock at [`epoch`].
pub struct TestLedger {
    pub root: Actor,
    pub clock: Arc<ManualTimeSource>,
    pub ledger: Arc<SharedLedger>,
    pub admission: AdmissionController,
}

impl TestLedger {
    pub fn new(config: PoolConfig) -> Self {
        let root = Actor::new(ROOT_DID);
        let genesis = genesis_block(Some(anchor_payload(&root)), epoch()).unwrap();
        let clock = Arc::new(ManualTimeSource::new(epoch()));
        let ledger = Arc::new(SharedLedger::with_clock(
            Chain::new(genesis),
            config,
            clock.clone(),
        ));
        let admission = AdmissionController::new(Arc::clone(&ledger));
        Self {
            root,
            clock,
            ledger,
            admission,
        }
    }

    pub fn seal(&self) {
        self.ledger.seal_pending(true).unwrap();
    }

    /// Admit `subject` signed by `authority` and seal it.
    pub fn enroll(&self, authority: &Actor, subject: &Actor) {
        self.admission
            .create_or_modify_identity(&authority.identity_request(subject))
            .unwrap();
        self.seal();
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

pub fn anchor_payload(root: &Actor) -> Payload {
    codec::encode(&Document::from(root.identity_document(epoch()))).unwrap()
}
