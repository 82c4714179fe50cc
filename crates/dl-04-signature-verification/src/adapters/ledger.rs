//! `KeyDirectory` backed by the ledger's pool and chain.

use dl_02_pending_pool::LedgerState;
use dl_03_state_resolver::{find_latest_identity, resolve_identity_state, IdentityState};
use shared_types::IdentityDocument;

use crate::ports::outbound::KeyDirectory;

impl KeyDirectory for LedgerState {
    fn identity_state(&self, did: &str) -> IdentityState {
        resolve_identity_state(self, did)
    }

    fn latest_identity(&self, did: &str) -> Option<IdentityDocument> {
        find_latest_identity(self, did)
    }
}
