//! Lifecycle states.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IdentityState {
    /// Latest version sealed and not revoked.
    Valid,
    /// Latest version sealed with `revoked = true`. Terminal.
    Revoked,
    /// Some version is still in the pending pool.
    Pending,
    /// Never admitted.
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CredentialState {
    Valid,
    Pending,
    /// Past its expiration date. Terminal.
    Expired,
    /// A record shares the id but not the hash, or the hash but not the id.
    Tampered,
    Absent,
}

impl IdentityState {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

impl CredentialState {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}
