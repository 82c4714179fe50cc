//! # Sealing Scheduler
//!
//! One long-lived tokio task. Every `seal_interval` it seals the pool if
//! the threshold is met and persists the resulting snapshot. A `watch`
//! channel stops it.

use std::sync::Arc;

use dl_01_ledger::ChainStore;
use shared_types::Block;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::errors::ShutdownError;
use crate::service::SharedLedger;

pub struct SealingScheduler {
    ledger: Arc<SharedLedger>,
    store: Arc<dyn ChainStore>,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SealingScheduler {
    /// Spawn the sealing loop on the current tokio runtime.
    pub fn start(ledger: Arc<SharedLedger>, store: Arc<dyn ChainStore>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(
            Arc::clone(&ledger),
            Arc::clone(&store),
            shutdown_rx,
        ));

        info!(
            "[dl-02] Sealing scheduler started (interval {:?}, threshold {})",
            ledger.config().seal_interval,
            ledger.config().seal_threshold
        );

        Self {
            ledger,
            store,
            shutdown_tx,
            handle,
        }
    }

    /// True while the loop task is running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the loop, seal leftovers if configured, and persist the chain.
    ///
    /// A halted ledger is never persisted: the stored chain is the last good
    /// one.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("[dl-02] Stopping sealing scheduler");
        // The loop may already have exited on a halt; a closed channel is fine.
        let _ = self.shutdown_tx.send(true);
        self.handle
            .await
            .map_err(|e| ShutdownError::Task(e.to_string()))?;

        if self.ledger.is_halted() {
            error!("[dl-02] Ledger halted; stored chain left untouched");
            return Err(ShutdownError::Halted);
        }

        if self.ledger.config().seal_on_shutdown {
            let pending = self.ledger.pool_len();
            if pending > 0 {
                info!("[dl-02] Sealing {} pending payloads before exit", pending);
            }
            self.ledger.seal_pending(true)?;
        } else if self.ledger.pool_len() > 0 {
            warn!(
                "[dl-02] Discarding {} unsealed payloads on shutdown",
                self.ledger.pool_len()
            );
        }

        let snapshot = self.ledger.snapshot();
        self.store.save(&snapshot)?;
        info!(
            "[dl-02] Persisted {} blocks to {}",
            snapshot.len(),
            self.store.location()
        );
        Ok(())
    }
}

async fn run_loop(
    ledger: Arc<SharedLedger>,
    store: Arc<dyn ChainStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(ledger.config().seal_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !ledger.threshold_met() {
                    continue;
                }
                match ledger.seal_pending(false) {
                    Ok(Some(snapshot)) => persist(store.as_ref(), &snapshot),
                    Ok(None) => {}
                    Err(e) => {
                        error!("[dl-02] Sealing loop stopped: {}", e);
                        break;
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                info!("[dl-02] Shutdown signal received");
                break;
            }
        }
    }
}

/// A failed save is logged, not fatal: the next save writes the whole chain.
fn persist(store: &dyn ChainStore, snapshot: &[Block]) {
    if let Err(e) = store.save(snapshot) {
        error!(
            "[dl-02] Failed to persist chain to {}: {}",
            store.location(),
            e
        );
    }
}
