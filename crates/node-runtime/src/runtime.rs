//! # Node Runtime
//!
//! Wires the chain store, the shared ledger, admission and the sealing
//! scheduler together.
//!
//! ## Startup Sequence
//!
//! 1. Open the chain store (exclusive lock on the chain file)
//! 2. Load the stored chain and validate it, or create a genesis block
//! 3. Build the shared ledger and the admission controller
//! 4. Start the sealing scheduler
//!
//! ## Shutdown Sequence
//!
//! 1. Stop the scheduler and wait for its task
//! 2. Force-seal leftovers (if `seal_on_shutdown`)
//! 3. Persist the final chain

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use dl_01_ledger::{Chain, ChainStore, JsonFileStore, SystemTimeSource, TimeSource};
use dl_02_pending_pool::{SealingScheduler, SharedLedger};
use dl_05_admission::AdmissionController;
use tracing::{info, warn};

use crate::config::NodeConfig;
use crate::genesis::GenesisBuilder;

pub struct NodeRuntime {
    config: NodeConfig,
    store: Arc<dyn ChainStore>,
    ledger: Arc<SharedLedger>,
    admission: AdmissionController,
    scheduler: Option<SealingScheduler>,
}

impl NodeRuntime {
    /// Open the configured chain file and load (or create) the chain.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let store = JsonFileStore::open_exclusive(&config.storage.chain_path)
            .context("Failed to open chain store")?;
        Self::with_store(config, Arc::new(store), Arc::new(SystemTimeSource))
    }

    /// Runtime over any store and clock.
    pub fn with_store(
        config: NodeConfig,
        store: Arc<dyn ChainStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self> {
        let chain = load_or_create_chain(store.as_ref(), clock.as_ref())?;
        info!(
            "[node] Chain ready: {} blocks, tip {}",
            chain.len(),
            chain.last_block().hash
        );

        let ledger = Arc::new(SharedLedger::with_clock(
            chain,
            config.ledger.clone(),
            clock,
        ));
        let admission = AdmissionController::new(Arc::clone(&ledger));

        Ok(Self {
            config,
            store,
            ledger,
            admission,
            scheduler: None,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<SharedLedger> {
        &self.ledger
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.as_ref().is_some_and(SealingScheduler::is_running)
    }

    /// Start the sealing scheduler. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.scheduler.is_some() {
            warn!("[node] Runtime already started");
            return;
        }
        info!("===========================================");
        info!("  DID-Ledger Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        self.scheduler = Some(SealingScheduler::start(
            Arc::clone(&self.ledger),
            Arc::clone(&self.store),
        ));
        info!("[node] Chain file: {}", self.store.location());
    }

    /// Stop sealing, drain and persist.
    pub async fn shutdown(mut self) -> Result<()> {
        info!("[node] Initiating graceful shutdown...");
        match self.scheduler.take() {
            Some(scheduler) => scheduler
                .shutdown()
                .await
                .context("Sealing scheduler shutdown failed")?,
            None => {
                if self.ledger.is_halted() {
                    bail!("Ledger halted; stored chain left untouched");
                }
                let snapshot = self.ledger.snapshot();
                self.store
                    .save(&snapshot)
                    .context("Failed to persist chain")?;
            }
        }
        info!("[node] Shutdown complete");
        Ok(())
    }
}

/// Load and validate the stored chain, or create and store a fresh genesis.
///
/// An invalid stored chain is an error: the runtime never starts on it.
pub fn load_or_create_chain(store: &dyn ChainStore, clock: &dyn TimeSource) -> Result<Chain> {
    match store.load().context("Failed to load chain")? {
        Some(blocks) => Chain::from_blocks(blocks).with_context(|| {
            format!(
                "Stored chain at {} failed validation; refusing to start",
                store.location()
            )
        }),
        None => {
            info!("[node] No chain found, creating genesis");
            let genesis = GenesisBuilder::new().build(clock.now())?;
            let chain = Chain::new(genesis);
            store
                .save(chain.blocks())
                .context("Failed to store genesis block")?;
            Ok(chain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_01_ledger::{genesis_block, seal_block, InMemoryChainStore};
    use shared_types::{codec, Document, IdentityDocument, VerificationMethod};
    use std::time::Duration;

    fn config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.ledger.seal_interval = Duration::from_millis(10);
        config
    }

    fn identity(id: &str) -> IdentityDocument {
        IdentityDocument {
            context: vec![],
            id: id.into(),
            verification_method: VerificationMethod {
                id: format!("{id}#key-1"),
                method_type: "JsonWebKey2020".into(),
                controller: id.into(),
                public_key_multibase: "z".into(),
            },
            service: vec![],
            revoked: false,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_creates_genesis_when_empty() {
        let store = Arc::new(InMemoryChainStore::new());
        let runtime = NodeRuntime::with_store(config(), store.clone(), Arc::new(SystemTimeSource)).unwrap();

        assert_eq!(runtime.ledger().chain_len(), 1);
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn test_refuses_invalid_chain() {
        let now = chrono::Utc::now();
        let genesis = genesis_block(None, now).unwrap();
        let payload = codec::encode(&Document::from(identity("did:batterypass:eu"))).unwrap();
        let mut block = seal_block(&genesis, vec![payload], now).unwrap();
        block.previous_hash = "f".repeat(64);

        let store = Arc::new(InMemoryChainStore::with_blocks(vec![genesis, block]));
        let result = NodeRuntime::with_store(config(), store, Arc::new(SystemTimeSource));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_start_and_shutdown_persists() {
        let store = Arc::new(InMemoryChainStore::new());
        let mut runtime =
            NodeRuntime::with_store(config(), store.clone(), Arc::new(SystemTimeSource)).unwrap();
        runtime.start();
        assert!(runtime.is_running());

        let payload = codec::encode(&Document::from(identity("did:batterypass:eu"))).unwrap();
        runtime.ledger().admit(payload).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        runtime.shutdown().await.unwrap();
        let stored = store.snapshot().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(dl_01_ledger::validate_chain(&stored));
    }
}
