//! # Trust Hierarchy
//!
//! Which identity types may author identities of which other type. `eu` is
//! the self-anchored root: it has no row, so nobody can write it through
//! admission; it only enters the ledger in the genesis block.
//!
//! | Subject | Allowed authorities |
//! |---------|---------------------|
//! | `oem` | `eu` |
//! | `bms` | `oem` |
//! | `cloud` | `oem` |
//! | `service` | `oem` |
//! | `user` | `oem`, `service` |

use shared_types::{identity_type, LedgerError, Result};

/// Root identity type.
pub const ROOT_TYPE: &str = "eu";

const AUTHORITIES: &[(&str, &[&str])] = &[
    ("oem", &["eu"]),
    ("bms", &["oem"]),
    ("cloud", &["oem"]),
    ("service", &["oem"]),
    ("user", &["oem", "service"]),
];

/// Identity types allowed to author `subject_type`, or `None` when nothing
/// may (the root, or an unknown type).
pub fn allowed_authorities(subject_type: &str) -> Option<&'static [&'static str]> {
    AUTHORITIES
        .iter()
        .find(|(subject, _)| *subject == subject_type)
        .map(|(_, authorities)| *authorities)
}

/// Check `signer` may author `subject`. With `self_allowed`, the subject
/// signing for itself also passes (modification and revocation).
pub fn check_authority(subject: &str, signer: &str, self_allowed: bool) -> Result<()> {
    let subject_type = identity_type(subject)
        .ok_or_else(|| LedgerError::InvalidFormat(format!("no identity type in {subject}")))?;
    let Some(authorities) = allowed_authorities(subject_type) else {
        return Err(LedgerError::semantic(
            subject,
            format!("identities of type '{subject_type}' cannot be written through admission"),
        ));
    };

    if self_allowed && signer == subject {
        return Ok(());
    }

    match identity_type(signer) {
        Some(signer_type) if authorities.contains(&signer_type) => Ok(()),
        signer_type => Err(LedgerError::semantic(
            subject,
            format!(
                "'{}' may only be authored by {:?}, signer type is '{}'",
                subject_type,
                authorities,
                signer_type.unwrap_or("unknown")
            ),
        )),
    }
}
