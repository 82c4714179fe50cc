//! # Admission Flows
//!
//! Full request paths through `AdmissionController` against a real ledger:
//! trust hierarchy, lifecycles, tampering and racing writers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::Duration;
    use serde_json::json;
    use shared_types::{ErrorKind, LedgerError, SignatureFailure};

    use dl_03_state_resolver::{resolve_credential_state, resolve_identity_state, CredentialState, IdentityState};
    use dl_05_admission::credential_fingerprint;

    use crate::fixtures::{Actor, TestLedger};

    const VC_ID: &str = "urn:uuid:2b1f6a3c-5d4e-4f7a-8b9c-0d1e2f3a4b5c";

    /// eu → oem → {bms, service}; service → user.
    fn network() -> (TestLedger, Actor, Actor, Actor, Actor) {
        let t = TestLedger::default();
        let oem = Actor::new("did:batterypass:oem.acme");
        let bms = Actor::new("did:batterypass:bms.cell-7");
        let service = Actor::new("did:batterypass:service.garage");
        let user = Actor::new("did:batterypass:user.alice");

        t.enroll(&t.root, &oem);
        t.enroll(&oem, &bms);
        t.enroll(&oem, &service);
        t.enroll(&service, &user);
        (t, oem, bms, service, user)
    }

    // =========================================================================
    // IDENTITIES
    // =========================================================================

    #[test]
    fn test_full_hierarchy_enrolls() {
        let (t, oem, bms, service, user) = network();
        let state = t.ledger.read();
        for actor in [&oem, &bms, &service, &user] {
            assert_eq!(resolve_identity_state(&state, &actor.did), IdentityState::Valid);
        }
        assert_eq!(state.chain().len(), 5);
    }

    #[test]
    fn test_identity_pending_then_revoked() {
        let (t, oem, _, service, _) = network();

        t.admission.revoke_identity(&oem.revocation(&service.did)).unwrap();
        assert_eq!(
            resolve_identity_state(&t.ledger.read(), &service.did),
            IdentityState::Pending
        );

        t.seal();
        assert_eq!(
            resolve_identity_state(&t.ledger.read(), &service.did),
            IdentityState::Revoked
        );

        // a revoked identity can no longer sign
        let bob = Actor::new("did:batterypass:user.bob");
        let err = t
            .admission
            .create_or_modify_identity(&service.identity_request(&bob))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::SignatureInvalid(SignatureFailure::KeyUnresolvable { .. })
        ));
    }

    #[test]
    fn test_self_revocation() {
        let (t, _, _, _, user) = network();
        let revoked = t.admission.revoke_identity(&user.revocation(&user.did)).unwrap();
        assert!(revoked.revoked);
    }

    #[test]
    fn test_revoke_errors() {
        let (t, oem, bms, _, _) = network();

        let err = t
            .admission
            .revoke_identity(&oem.revocation("did:batterypass:bms.ghost"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity: "identity", .. }));

        t.admission.revoke_identity(&oem.revocation(&bms.did)).unwrap();
        t.seal();
        let err = t.admission.revoke_identity(&oem.revocation(&bms.did)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_sibling_cannot_revoke() {
        let (t, _, bms, service, _) = network();
        let err = t
            .admission
            .revoke_identity(&service.revocation(&bms.did))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SemanticViolation);
    }

    #[test]
    fn test_signature_over_different_document() {
        let (t, oem, _, _, _) = network();
        let honest = Actor::new("did:batterypass:bms.cell-8");
        let mut request = oem.identity_request(&honest);

        // swap in another key after signing
        let attacker = Actor::new("did:batterypass:bms.cell-8");
        request["payload"] = attacker.did_document();

        let err = t.admission.create_or_modify_identity(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PayloadMismatch);
    }

    #[test]
    fn test_modification_by_stranger_rejected() {
        let (t, oem, bms, service, _) = network();
        let replacement = Actor::new(&bms.did);

        let err = t
            .admission
            .create_or_modify_identity(&service.identity_request(&replacement))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SemanticViolation);

        // the authority may rotate the key
        t.admission
            .create_or_modify_identity(&oem.identity_request(&replacement))
            .unwrap();
        t.seal();
        let latest = t.admission.get_identity(&bms.did).unwrap();
        assert_eq!(
            latest.verification_method.public_key_multibase,
            replacement.did_document()["verificationMethod"]["publicKeyMultibase"]
        );
    }

    #[test]
    fn test_racing_creates_admit_once() {
        let t = Arc::new(TestLedger::default());
        let oem = Arc::new(Actor::new("did:batterypass:oem.race"));
        let request = Arc::new(t.root.identity_request(&oem));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = Arc::clone(&t);
                let request = Arc::clone(&request);
                thread::spawn(move || t.admission.create_or_modify_identity(&request))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(LedgerError::is_retryable));
        assert_eq!(t.ledger.pool_len(), 1);
    }

    // =========================================================================
    // CREDENTIALS & PRESENTATIONS
    // =========================================================================

    #[test]
    fn test_credential_and_presentation() {
        let (t, oem, bms, _, _) = network();
        let vc = oem.sign(oem.credential(VC_ID, &bms));

        t.admission.create_credential(&vc).unwrap();
        t.seal();

        let hash = credential_fingerprint(&vc).unwrap();
        assert_eq!(
            resolve_credential_state(&t.ledger.read(), VC_ID, &hash, t.ledger.now()),
            CredentialState::Valid
        );

        let verified = t
            .admission
            .verify_presentation(&bms.presentation(vec![vc]))
            .unwrap();
        assert_eq!(verified.credentials, vec![VC_ID.to_string()]);
    }

    #[test]
    fn test_reissued_credential_is_tampered() {
        let (t, oem, bms, _, _) = network();
        let original = oem.sign(oem.credential(VC_ID, &bms));
        t.admission.create_credential(&original).unwrap();
        t.seal();

        let mut body = oem.credential(VC_ID, &bms);
        body["credentialSubject"]["accessLevel"] = json!(["read", "write"]);
        let upgraded = oem.sign(body);

        let err = t.admission.create_credential(&upgraded).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = t
            .admission
            .verify_presentation(&bms.presentation(vec![upgraded]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PayloadMismatch);
    }

    #[test]
    fn test_revoked_credential_fails_presentation() {
        let (t, oem, bms, _, _) = network();
        let vc = oem.sign(oem.credential(VC_ID, &bms));
        t.admission.create_credential(&vc).unwrap();
        t.seal();

        let revoked = t.admission.revoke_credential(&oem.revocation(VC_ID)).unwrap();
        assert_eq!(revoked.expiration_date, Some(t.ledger.now()));
        t.seal();
        t.clock.advance(Duration::seconds(1));

        let err = t
            .admission
            .verify_presentation(&bms.presentation(vec![vc]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let record = t.admission.get_credential(VC_ID).unwrap();
        assert_eq!(record.expiration_date, revoked.expiration_date);
    }

    #[test]
    fn test_credential_expired_on_arrival() {
        let (t, oem, bms, _, _) = network();
        t.clock.advance(Duration::days(400));

        let err = t
            .admission
            .create_credential(&oem.sign(oem.credential(VC_ID, &bms)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_credential_with_bad_urn() {
        let (t, oem, bms, _, _) = network();
        let err = t
            .admission
            .create_credential(&oem.sign(oem.credential("urn:uuid:not-a-uuid", &bms)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
