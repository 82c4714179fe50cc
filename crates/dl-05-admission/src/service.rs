//! # Admission Controller
//!
//! Decides whether a create, modify, revoke or verify request may proceed.
//! Every state-dependent check and the final admit run under one ledger
//! write lock (`SharedLedger::admit_with`), so a request is judged against
//! exactly the state it lands in.

use std::sync::Arc;

use dl_02_pending_pool::{LedgerState, SharedLedger};
use dl_03_state_resolver::{
    find_latest_credential, find_latest_identity, resolve_credential_state,
    resolve_identity_state, CredentialState, IdentityState,
};
use dl_04_signature_verification::{payloads_equal, verify_token, SignatureVerifier};
use serde::Serialize;
use serde_json::Value;
use shared_types::{
    owner_of, require_did, require_urn, CredentialRecord, IdentityDocument, IdentityRequest,
    LedgerError, Proof, Result, RevocationRequest, Timestamp, VerifiableCredential,
    VerifiablePresentation,
};

use crate::domain::hierarchy::check_authority;
use crate::domain::rules::{
    check_credential_fields, check_identity_payload, check_validity_window,
    credential_fingerprint, parse, SubmittedIdentity,
};
use crate::domain::trace::{RequestStage, RequestTrace};

/// Outcome of a successful presentation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPresentation {
    pub holder: String,
    pub credentials: Vec<String>,
}

pub struct AdmissionController {
    ledger: Arc<SharedLedger>,
}

impl AdmissionController {
    pub fn new(ledger: Arc<SharedLedger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<SharedLedger> {
        &self.ledger
    }

    // =========================================================================
    // IDENTITIES
    // =========================================================================

    /// Admit a new identity, or a new version of a `Valid` one.
    ///
    /// Request: `{payload: <DID document>, proof}`; the proof signs `payload`.
    pub fn create_or_modify_identity(&self, request: &Value) -> Result<IdentityDocument> {
        let mut trace = RequestTrace::received("create-or-modify-identity", hint(request, "/payload/id"));
        let result = self.admit_identity(request, &mut trace);
        finish(&mut trace, result)
    }

    fn admit_identity(&self, request: &Value, trace: &mut RequestTrace) -> Result<IdentityDocument> {
        let parsed: IdentityRequest = parse(request, "identity request")?;
        let identity: SubmittedIdentity = parse(&parsed.payload, "DID document")?;
        check_identity_payload(&identity)?;

        let now = self.ledger.now();
        self.ledger.admit_with(|state| {
            let current = resolve_identity_state(state, &identity.id);
            match current {
                IdentityState::Pending => return Err(LedgerError::pending(&identity.id)),
                IdentityState::Revoked => {
                    return Err(LedgerError::conflict(&identity.id, "identity is revoked"))
                }
                IdentityState::Valid | IdentityState::Absent => {}
            }
            check_authority(
                &identity.id,
                parsed.proof.signer(),
                current == IdentityState::Valid,
            )?;

            let claims = verify_proof(state, &parsed.proof, trace)?;
            if !payloads_equal(&parsed.payload, &claims) {
                return Err(LedgerError::PayloadMismatch {
                    id: identity.id.clone(),
                });
            }

            trace.advance(RequestStage::SemanticallyValid);
            Ok(identity.into_document(now))
        })
    }

    /// Admit a revoked copy of a `Valid` identity.
    ///
    /// Request: `{id, proof}`, signed by the identity itself or an authority
    /// over its type; the proof signs the request without `proof.jws`.
    pub fn revoke_identity(&self, request: &Value) -> Result<IdentityDocument> {
        let mut trace = RequestTrace::received("revoke-identity", hint(request, "/id"));
        let result = self.revoke_identity_inner(request, &mut trace);
        finish(&mut trace, result)
    }

    fn revoke_identity_inner(&self, request: &Value, trace: &mut RequestTrace) -> Result<IdentityDocument> {
        let parsed: RevocationRequest = parse(request, "revocation request")?;
        require_did(&parsed.id)?;

        let now = self.ledger.now();
        self.ledger.admit_with(|state| {
            require_valid_identity(state, &parsed.id, "identity")?;
            check_authority(&parsed.id, parsed.proof.signer(), true)?;

            let claims = verify_proof(state, &parsed.proof, trace)?;
            if !payloads_equal(request, &claims) {
                return Err(LedgerError::PayloadMismatch {
                    id: parsed.id.clone(),
                });
            }

            let latest = find_latest_identity(state, &parsed.id)
                .ok_or_else(|| LedgerError::not_found("identity", &parsed.id))?;
            trace.advance(RequestStage::SemanticallyValid);
            Ok(latest.revoked_at(now))
        })
    }

    // =========================================================================
    // CREDENTIALS
    // =========================================================================

    /// Record the fingerprint of a full verifiable credential.
    pub fn create_credential(&self, request: &Value) -> Result<CredentialRecord> {
        let mut trace = RequestTrace::received("create-credential", hint(request, "/id"));
        let result = self.create_credential_inner(request, &mut trace);
        finish(&mut trace, result)
    }

    fn create_credential_inner(&self, request: &Value, trace: &mut RequestTrace) -> Result<CredentialRecord> {
        let vc: VerifiableCredential = parse(request, "verifiable credential")?;
        check_credential_fields(&vc)?;

        let now = self.ledger.now();
        check_validity_window(&vc, now)?;
        let fingerprint = credential_fingerprint(request)?;

        self.ledger.admit_with(|state| {
            require_valid_identity(state, &vc.issuer, "issuer")?;
            require_valid_identity(state, &vc.credential_subject.id, "holder")?;

            let claims = verify_proof(state, &vc.proof, trace)?;
            if !payloads_equal(request, &claims) {
                return Err(LedgerError::PayloadMismatch { id: vc.id.clone() });
            }

            match resolve_credential_state(state, &vc.id, &fingerprint, now) {
                CredentialState::Absent => {}
                CredentialState::Pending => return Err(LedgerError::pending(&vc.id)),
                other => {
                    return Err(LedgerError::conflict(
                        &vc.id,
                        format!("credential already recorded ({other:?})"),
                    ))
                }
            }

            trace.advance(RequestStage::SemanticallyValid);
            Ok(CredentialRecord {
                id: vc.id.clone(),
                credential_hash: fingerprint.clone(),
                expiration_date: vc.expiration_date,
                timestamp: now,
                proof: vc.proof.clone(),
            })
        })
    }

    /// Expire a `Valid` credential record now. Only its issuer may.
    ///
    /// Request: `{id, proof}`; the proof signs the request without `proof.jws`.
    pub fn revoke_credential(&self, request: &Value) -> Result<CredentialRecord> {
        let mut trace = RequestTrace::received("revoke-credential", hint(request, "/id"));
        let result = self.revoke_credential_inner(request, &mut trace);
        finish(&mut trace, result)
    }

    fn revoke_credential_inner(&self, request: &Value, trace: &mut RequestTrace) -> Result<CredentialRecord> {
        let parsed: RevocationRequest = parse(request, "revocation request")?;
        require_urn(&parsed.id)?;

        let now = self.ledger.now();
        self.ledger.admit_with(|state| {
            let latest = find_latest_credential(state, &parsed.id)
                .ok_or_else(|| LedgerError::not_found("credential", &parsed.id))?;
            require_valid_credential(state, &parsed.id, &latest.credential_hash, now)?;
            // still Valid at the instant of expiry, but nothing left to revoke
            if let Some(expiry) = latest.expiration_date.filter(|expiry| *expiry <= now) {
                return Err(LedgerError::conflict(
                    &parsed.id,
                    format!("credential expired at {expiry}"),
                ));
            }

            let issuer = owner_of(&latest.proof.verification_method);
            let signer = parsed.proof.signer();
            if signer != issuer {
                return Err(LedgerError::semantic(
                    &parsed.id,
                    format!("only the issuer {issuer} may revoke, signer is {signer}"),
                ));
            }

            let claims = verify_proof(state, &parsed.proof, trace)?;
            if !payloads_equal(request, &claims) {
                return Err(LedgerError::PayloadMismatch {
                    id: parsed.id.clone(),
                });
            }

            trace.advance(RequestStage::SemanticallyValid);
            Ok(latest.expired_at(now, parsed.proof.clone()))
        })
    }

    // =========================================================================
    // PRESENTATIONS
    // =========================================================================

    /// Check a holder-signed presentation and every credential inside it.
    /// Read-only: nothing is admitted.
    pub fn verify_presentation(&self, request: &Value) -> Result<VerifiedPresentation> {
        let mut trace = RequestTrace::received("verify-presentation", hint(request, "/holder"));
        let result = self.verify_presentation_inner(request, &mut trace);
        finish(&mut trace, result)
    }

    fn verify_presentation_inner(
        &self,
        request: &Value,
        trace: &mut RequestTrace,
    ) -> Result<VerifiedPresentation> {
        let vp: VerifiablePresentation = parse(request, "verifiable presentation")?;
        require_did(&vp.holder)?;

        let signer = vp.proof.signer();
        if signer != vp.holder {
            return Err(LedgerError::semantic(
                &vp.holder,
                format!("presentation signed by {signer}, not its holder"),
            ));
        }
        if vp.verifiable_credential.is_empty() {
            return Err(LedgerError::semantic(
                &vp.holder,
                "presentation carries no credential",
            ));
        }

        let now = self.ledger.now();
        let state = self.ledger.read();

        let claims = verify_proof(&state, &vp.proof, trace)?;
        if !payloads_equal(request, &claims) {
            return Err(LedgerError::PayloadMismatch {
                id: vp.holder.clone(),
            });
        }

        let mut credentials = Vec::with_capacity(vp.verifiable_credential.len());
        for raw in &vp.verifiable_credential {
            credentials.push(check_embedded_credential(&state, raw, &vp.holder, now)?);
        }

        trace.advance(RequestStage::SemanticallyValid);
        Ok(VerifiedPresentation {
            holder: vp.holder,
            credentials,
        })
    }
}

/// Signature, cross-field and ledger-state checks for one credential inside
/// a presentation. Returns its id.
fn check_embedded_credential(
    state: &LedgerState,
    raw: &Value,
    holder: &str,
    now: Timestamp,
) -> Result<String> {
    let vc: VerifiableCredential = parse(raw, "embedded credential")?;
    check_credential_fields(&vc)?;
    if vc.credential_subject.id != holder {
        return Err(LedgerError::semantic(
            &vc.id,
            format!(
                "credential subject {} is not the presentation holder {holder}",
                vc.credential_subject.id
            ),
        ));
    }
    check_validity_window(&vc, now)?;

    let claims = SignatureVerifier::new(state)
        .verify_signed_payload(&vc.proof.jws, &vc.proof.verification_method)?;
    if !payloads_equal(raw, &claims) {
        return Err(LedgerError::PayloadMismatch { id: vc.id });
    }

    let fingerprint = credential_fingerprint(raw)?;
    require_valid_credential(state, &vc.id, &fingerprint, now)?;
    Ok(vc.id)
}

/// Resolve the signer's key and verify the proof's token, tracing both
/// stages.
fn verify_proof(state: &LedgerState, proof: &Proof, trace: &mut RequestTrace) -> Result<Value> {
    let key = SignatureVerifier::new(state).resolve_key(&proof.verification_method)?;
    trace.advance(RequestStage::KeyResolved);

    let claims = verify_token(&proof.jws, &key)?;
    trace.advance(RequestStage::SignatureVerified);
    Ok(claims)
}

fn require_valid_identity(state: &LedgerState, did: &str, role: &str) -> Result<()> {
    match resolve_identity_state(state, did) {
        IdentityState::Valid => Ok(()),
        IdentityState::Absent => Err(LedgerError::not_found("identity", did)),
        IdentityState::Pending => Err(LedgerError::pending(did)),
        IdentityState::Revoked => Err(LedgerError::conflict(did, format!("{role} is revoked"))),
    }
}

fn require_valid_credential(
    state: &LedgerState,
    id: &str,
    fingerprint: &str,
    now: Timestamp,
) -> Result<()> {
    match resolve_credential_state(state, id, fingerprint, now) {
        CredentialState::Valid => Ok(()),
        CredentialState::Pending => Err(LedgerError::pending(id)),
        CredentialState::Expired => Err(LedgerError::conflict(id, "credential expired")),
        CredentialState::Tampered => Err(LedgerError::PayloadMismatch { id: id.to_string() }),
        CredentialState::Absent => Err(LedgerError::not_found("credential", id)),
    }
}

fn finish<T>(trace: &mut RequestTrace, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            trace.admitted();
            Ok(value)
        }
        Err(e) => Err(trace.reject(e)),
    }
}

fn hint(request: &Value, pointer: &str) -> String {
    request
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string()
}
