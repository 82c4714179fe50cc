//! # Genesis Block Builder
//!
//! Creates the genesis block for chain initialization. The trust anchor, if
//! any, is the only document ever admitted without a signature check, so it
//! is held to the root identity rules here.

use std::path::Path;

use dl_01_ledger::genesis_block;
use dl_05_admission::ROOT_TYPE;
use shared_crypto::decode_public_key_multibase;
use shared_types::{codec, identity_type, is_valid_did, owner_of, Block, Document, IdentityDocument, Timestamp};
use thiserror::Error;
use tracing::info;

/// Genesis block creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("Cannot read trust anchor {path}: {message}")]
    AnchorUnreadable { path: String, message: String },

    #[error("Invalid trust anchor: {0}")]
    InvalidAnchor(String),

    #[error("Failed to build genesis block: {0}")]
    Build(#[from] shared_types::LedgerError),
}

#[derive(Debug, Clone, Default)]
pub struct GenesisBuilder {
    anchor: Option<IdentityDocument>,
}

impl GenesisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor(mut self, anchor: IdentityDocument) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Read the anchor from a JSON identity document. A missing `timestamp`
    /// is filled in at build time.
    pub fn with_anchor_file(self, path: &Path) -> Result<Self, GenesisError> {
        let raw = std::fs::read_to_string(path).map_err(|e| GenesisError::AnchorUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| GenesisError::InvalidAnchor(e.to_string()))?;
        if let Some(object) = value.as_object_mut() {
            object.remove("type");
            object
                .entry("timestamp")
                .or_insert_with(|| serde_json::json!(chrono::Utc::now()));
        }
        let anchor: IdentityDocument = serde_json::from_value(value)
            .map_err(|e| GenesisError::InvalidAnchor(e.to_string()))?;
        Ok(self.with_anchor(anchor))
    }

    pub fn build(self, now: Timestamp) -> Result<Block, GenesisError> {
        let payload = match self.anchor {
            Some(anchor) => {
                check_anchor(&anchor)?;
                info!("[node] Genesis trust anchor: {}", anchor.id);
                Some(codec::encode(&Document::from(anchor))?)
            }
            None => None,
        };

        let block = genesis_block(payload, now)?;
        info!("[node] Genesis block created: hash={}", &block.hash[..16]);
        Ok(block)
    }
}

fn check_anchor(anchor: &IdentityDocument) -> Result<(), GenesisError> {
    if !is_valid_did(&anchor.id) {
        return Err(GenesisError::InvalidAnchor(format!("invalid DID {}", anchor.id)));
    }
    if identity_type(&anchor.id) != Some(ROOT_TYPE) {
        return Err(GenesisError::InvalidAnchor(format!(
            "{} is not a '{ROOT_TYPE}' identity",
            anchor.id
        )));
    }
    if owner_of(&anchor.verification_method.id) != anchor.id {
        return Err(GenesisError::InvalidAnchor(
            "verification method not owned by the anchor".into(),
        ));
    }
    if anchor.revoked {
        return Err(GenesisError::InvalidAnchor("anchor is revoked".into()));
    }
    decode_public_key_multibase(&anchor.verification_method.public_key_multibase)
        .map_err(|e| GenesisError::InvalidAnchor(format!("unusable anchor key: {e}")))?;
    Ok(())
}
