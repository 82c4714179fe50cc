//! # Documents
//!
//! The two document kinds stored on the ledger, the `Document` envelope that
//! tags them, and the request-side shapes (identity requests, revocations,
//! credentials, presentations) that the admission layer parses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Timestamp;
use crate::identifiers::owner_of;

/// Proof suite used by every signed document.
pub const PROOF_TYPE: &str = "EcdsaSecp256r1Signature2019";

/// Verification-method type published in identity documents.
pub const VERIFICATION_METHOD_TYPE: &str = "JsonWebKey2020";

// =============================================================================
// PROOF
// =============================================================================

/// Embedded proof block. `jws` is a compact ES256 JWS whose payload is the
/// surrounding document with `proof.jws` removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: Timestamp,
    pub verification_method: String,
    pub proof_purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default)]
    pub jws: String,
}

impl Proof {
    /// Identity that produced this proof.
    pub fn signer(&self) -> &str {
        owner_of(&self.verification_method)
    }
}

// =============================================================================
// IDENTITY DOCUMENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub controller: String,
    pub public_key_multibase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub service_endpoint: String,
}

/// One version of a DID document. Versions of the same identity share `id`;
/// the most recently admitted version is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDocument {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,
    pub id: String,
    pub verification_method: VerificationMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service: Vec<ServiceEndpoint>,
    #[serde(default)]
    pub revoked: bool,
    pub timestamp: Timestamp,
}

impl IdentityDocument {
    /// New version of this identity with `revoked` set.
    pub fn revoked_at(&self, now: Timestamp) -> Self {
        Self {
            revoked: true,
            timestamp: now,
            ..self.clone()
        }
    }
}

// =============================================================================
// CREDENTIAL RECORD
// =============================================================================

/// On-ledger fingerprint of a verifiable credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    /// Hex SHA3-256 of the credential's canonical JSON.
    pub credential_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub timestamp: Timestamp,
    pub proof: Proof,
}

impl CredentialRecord {
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        matches!(self.expiration_date, Some(expiry) if expiry < now)
    }

    /// New version of this record that expires at `now`.
    pub fn expired_at(&self, now: Timestamp, proof: Proof) -> Self {
        Self {
            expiration_date: Some(now),
            timestamp: now,
            proof,
            ..self.clone()
        }
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// A ledger payload, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    #[serde(rename = "IdentityDocument")]
    Identity(IdentityDocument),
    #[serde(rename = "CredentialRecord")]
    Credential(CredentialRecord),
}

impl Document {
    pub fn id(&self) -> &str {
        match self {
            Document::Identity(doc) => &doc.id,
            Document::Credential(record) => &record.id,
        }
    }

    pub fn as_identity(&self) -> Option<&IdentityDocument> {
        match self {
            Document::Identity(doc) => Some(doc),
            Document::Credential(_) => None,
        }
    }

    pub fn as_credential(&self) -> Option<&CredentialRecord> {
        match self {
            Document::Credential(record) => Some(record),
            Document::Identity(_) => None,
        }
    }
}

impl From<IdentityDocument> for Document {
    fn from(doc: IdentityDocument) -> Self {
        Document::Identity(doc)
    }
}

impl From<CredentialRecord> for Document {
    fn from(record: CredentialRecord) -> Self {
        Document::Credential(record)
    }
}

// =============================================================================
// REQUEST DOCUMENTS
// =============================================================================

/// Create/modify request: the DID document plus a proof over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRequest {
    pub payload: Value,
    pub proof: Proof,
}

/// Revocation request for an identity or a credential record. The proof
/// signs the request itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRequest {
    pub id: String,
    pub proof: Proof,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSubject {
    pub id: String,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

/// Full verifiable credential. Only its fingerprint is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,
    pub id: String,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    pub issuance_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub credential_subject: CredentialSubject,
    pub proof: Proof,
}

/// Holder-signed wrapper around credentials. Credentials stay raw JSON so
/// their fingerprints and signatures are checked over the submitted bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiablePresentation {
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    pub holder: String,
    pub verifiable_credential: Vec<Value>,
    pub proof: Proof,
}
