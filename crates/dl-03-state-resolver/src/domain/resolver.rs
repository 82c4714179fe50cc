//! # Resolution
//!
//! Lifecycle queries over a [`LedgerState`]. Callers hold the ledger lock
//! (read or write) for the duration of a call.

use std::collections::HashMap;

use dl_02_pending_pool::LedgerState;
use shared_types::{CredentialRecord, Document, IdentityDocument, Timestamp};

use super::scan::{newest_first, oldest_first};
use super::states::{CredentialState, IdentityState};

pub fn resolve_identity_state(state: &LedgerState, id: &str) -> IdentityState {
    let found = newest_first(state).find_map(|scanned| match scanned.document {
        Document::Identity(doc) if doc.id == id => Some((scanned.location, doc.revoked)),
        _ => None,
    });

    match found {
        None => IdentityState::Absent,
        Some((location, _)) if location.is_pending() => IdentityState::Pending,
        Some((_, true)) => IdentityState::Revoked,
        Some((_, false)) => IdentityState::Valid,
    }
}

/// Credential state by id and fingerprint. A record matches on either
/// field; a sealed match that disagrees on the other field is `Tampered`.
pub fn resolve_credential_state(
    state: &LedgerState,
    id: &str,
    credential_hash: &str,
    now: Timestamp,
) -> CredentialState {
    let found = newest_first(state).find_map(|scanned| match scanned.document {
        Document::Credential(record)
            if record.id == id || record.credential_hash == credential_hash =>
        {
            Some((scanned.location, record))
        }
        _ => None,
    });

    let Some((location, record)) = found else {
        return CredentialState::Absent;
    };
    if location.is_pending() {
        return CredentialState::Pending;
    }
    if record.id != id || record.credential_hash != credential_hash {
        return CredentialState::Tampered;
    }
    if record.is_expired_at(now) {
        return CredentialState::Expired;
    }
    CredentialState::Valid
}

/// Most recent version of an identity, pending versions included.
pub fn find_latest_identity(state: &LedgerState, id: &str) -> Option<IdentityDocument> {
    newest_first(state).find_map(|scanned| match scanned.document {
        Document::Identity(doc) if doc.id == id => Some(doc),
        _ => None,
    })
}

/// Most recent record with this credential id, pending versions included.
pub fn find_latest_credential(state: &LedgerState, id: &str) -> Option<CredentialRecord> {
    newest_first(state).find_map(|scanned| match scanned.document {
        Document::Credential(record) if record.id == id => Some(record),
        _ => None,
    })
}

/// Latest version of every identity, in order of first appearance.
pub fn list_identities(state: &LedgerState) -> Vec<IdentityDocument> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<IdentityDocument> = Vec::new();

    for scanned in oldest_first(state) {
        let Document::Identity(doc) = scanned.document else {
            continue;
        };
        match position.get(&doc.id) {
            Some(&i) => latest[i] = doc,
            None => {
                position.insert(doc.id.clone(), latest.len());
                latest.push(doc);
            }
        }
    }
    latest
}
