//! # Identifiers
//!
//! Syntax rules for DIDs and credential URNs, and the helpers that split a
//! verification-method reference into its owning identity.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LedgerError, Result};

/// Method prefix every ledger DID carries.
pub const DID_PREFIX: &str = "did:batterypass:";

/// Fragment of the single verification key each identity publishes.
pub const KEY_FRAGMENT: &str = "key-1";

static DID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^did:[a-z0-9]+:[A-Za-z0-9._-]+$").expect("DID pattern compiles")
});

static URN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^urn:uuid:[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-4[a-fA-F0-9]{3}-[89abAB][a-fA-F0-9]{3}-[a-fA-F0-9]{12}$",
    )
    .expect("URN pattern compiles")
});

pub fn is_valid_did(did: &str) -> bool {
    did.starts_with(DID_PREFIX) && DID_PATTERN.is_match(did)
}

/// Credential ids are `urn:uuid:` followed by a version 4 UUID.
pub fn is_valid_urn(urn: &str) -> bool {
    URN_PATTERN.is_match(urn)
}

pub fn require_did(did: &str) -> Result<()> {
    if is_valid_did(did) {
        Ok(())
    } else {
        Err(LedgerError::InvalidFormat(format!("invalid DID: {did}")))
    }
}

pub fn require_urn(urn: &str) -> Result<()> {
    if is_valid_urn(urn) {
        Ok(())
    } else {
        Err(LedgerError::InvalidFormat(format!("invalid credential URN: {urn}")))
    }
}

/// Identity that owns a verification-method reference (`did#fragment`).
pub fn owner_of(reference: &str) -> &str {
    match reference.split_once('#') {
        Some((owner, _)) => owner,
        None => reference,
    }
}

/// Identity type encoded in a DID: `did:batterypass:oem.acme` is `oem`,
/// `did:batterypass:eu` is `eu`.
pub fn identity_type(did: &str) -> Option<&str> {
    let rest = did.strip_prefix(DID_PREFIX)?;
    let kind = rest.split('.').next().unwrap_or(rest);
    if kind.is_empty() {
        None
    } else {
        Some(kind)
    }
}

/// Reference to the verification key of `did`.
pub fn key_reference(did: &str) -> String {
    format!("{did}#{KEY_FRAGMENT}")
}
