//! # Outbound Ports (Driven Ports)

use dl_03_state_resolver::IdentityState;
use shared_types::IdentityDocument;

/// Where identities, and therefore keys, are looked up.
///
/// Production: `LedgerState` (adapters/ledger.rs)
pub trait KeyDirectory {
    /// Current lifecycle state of `did`.
    fn identity_state(&self, did: &str) -> IdentityState;

    /// Most recent version of `did`.
    fn latest_identity(&self, did: &str) -> Option<IdentityDocument>;
}
