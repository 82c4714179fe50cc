//! Read-only lookups over the shared ledger. Each call takes the read lock
//! once and returns owned data.

use serde_json::Value;
use shared_types::{Block, BlockHeader, CredentialRecord, IdentityDocument, LedgerError, Result};
use tracing::warn;

use dl_03_state_resolver::{find_latest_credential, find_latest_identity, list_identities};

use crate::service::AdmissionController;

impl AdmissionController {
    /// Latest version of every identity, pending versions included.
    pub fn list_identities(&self) -> Vec<IdentityDocument> {
        list_identities(&self.ledger().read())
    }

    pub fn get_identity(&self, id: &str) -> Result<IdentityDocument> {
        find_latest_identity(&self.ledger().read(), id)
            .ok_or_else(|| LedgerError::not_found("identity", id))
    }

    pub fn get_credential(&self, id: &str) -> Result<CredentialRecord> {
        find_latest_credential(&self.ledger().read(), id)
            .ok_or_else(|| LedgerError::not_found("credential", id))
    }

    pub fn get_block(&self, index: u64) -> Result<Block> {
        self.ledger().read().chain().get_block(index).cloned()
    }

    /// Headers of every sealed block, genesis first.
    pub fn list_blocks(&self) -> Vec<BlockHeader> {
        self.ledger()
            .read()
            .chain()
            .blocks()
            .iter()
            .map(BlockHeader::from)
            .collect()
    }

    /// Transactions of one block as JSON. Payloads that are not JSON are
    /// left out.
    pub fn list_block_transactions(&self, index: u64) -> Result<Vec<Value>> {
        let block = self.get_block(index)?;
        let decoded = block
            .transactions
            .iter()
            .enumerate()
            .filter_map(|(position, payload)| {
                match serde_json::from_slice::<Value>(payload.as_bytes()) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(
                            "[dl-05] Skipping undecodable transaction {} in block #{}: {}",
                            position, index, e
                        );
                        None
                    }
                }
            })
            .collect();
        Ok(decoded)
    }
}
