//! # Sealing Flows
//!
//! Admission feeding the pool while the sealing scheduler runs.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dl_01_ledger::{validate_chain, InMemoryChainStore};
    use dl_02_pending_pool::{PoolConfig, SealingScheduler, ShutdownError};
    use dl_03_state_resolver::{resolve_identity_state, IdentityState};
    use shared_types::{codec, Document, Payload};

    use crate::fixtures::{Actor, TestLedger};

    fn config(threshold: usize, seal_on_shutdown: bool) -> PoolConfig {
        PoolConfig {
            seal_interval: Duration::from_millis(10),
            seal_threshold: threshold,
            seal_on_shutdown,
        }
    }

    #[tokio::test]
    async fn test_threshold_one_tick_seals_identity() {
        let t = TestLedger::new(config(1, true));
        let store = Arc::new(InMemoryChainStore::new());
        let scheduler = SealingScheduler::start(Arc::clone(&t.ledger), store.clone());

        let oem = Actor::new("did:batterypass:oem.acme");
        t.admission
            .create_or_modify_identity(&t.root.identity_request(&oem))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let state = t.ledger.read();
            assert_eq!(state.chain().len(), 2);
            assert!(state.pool().is_empty());
            assert_eq!(resolve_identity_state(&state, &oem.did), IdentityState::Valid);
        }
        let block = t.admission.get_block(1).unwrap();
        let doc = codec::decode(&block.transactions[0]).unwrap();
        assert_eq!(doc.id(), oem.did);

        scheduler.shutdown().await.unwrap();
        assert!(validate_chain(&store.snapshot().unwrap()));
    }

    #[tokio::test]
    async fn test_below_threshold_waits_then_drains() {
        let t = TestLedger::new(config(3, true));
        let store = Arc::new(InMemoryChainStore::new());
        let scheduler = SealingScheduler::start(Arc::clone(&t.ledger), store.clone());

        let oem = Actor::new("did:batterypass:oem.acme");
        t.admission
            .create_or_modify_identity(&t.root.identity_request(&oem))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(t.ledger.chain_len(), 1);
        assert_eq!(t.ledger.pool_len(), 1);

        scheduler.shutdown().await.unwrap();
        let stored = store.snapshot().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].transactions.len(), 1);
        assert_eq!(t.ledger.pool_len(), 0);
    }

    #[tokio::test]
    async fn test_discard_on_shutdown_when_disabled() {
        let t = TestLedger::new(config(3, false));
        let store = Arc::new(InMemoryChainStore::new());
        let scheduler = SealingScheduler::start(Arc::clone(&t.ledger), store.clone());

        let oem = Actor::new("did:batterypass:oem.acme");
        t.admission
            .create_or_modify_identity(&t.root.identity_request(&oem))
            .unwrap();

        scheduler.shutdown().await.unwrap();
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_payload_halts_ledger() {
        let t = TestLedger::new(config(1, true));
        let store = Arc::new(InMemoryChainStore::new());
        let scheduler = SealingScheduler::start(Arc::clone(&t.ledger), store.clone());

        t.ledger.admit(Payload::new(b"not a document".to_vec())).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(t.ledger.is_halted());

        let oem = Actor::new("did:batterypass:oem.acme");
        let err = t
            .admission
            .create_or_modify_identity(&t.root.identity_request(&oem))
            .unwrap_err();
        assert!(err.is_fatal());

        assert!(matches!(scheduler.shutdown().await, Err(ShutdownError::Halted)));
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_chained_enrollment_across_ticks() {
        let t = TestLedger::new(config(1, true));
        let store = Arc::new(InMemoryChainStore::new());
        let scheduler = SealingScheduler::start(Arc::clone(&t.ledger), store.clone());

        let oem = Actor::new("did:batterypass:oem.acme");
        let bms = Actor::new("did:batterypass:bms.cell-7");
        t.admission
            .create_or_modify_identity(&t.root.identity_request(&oem))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        t.admission
            .create_or_modify_identity(&oem.identity_request(&bms))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        scheduler.shutdown().await.unwrap();
        let stored = store.snapshot().unwrap();
        assert_eq!(stored.len(), 3);
        let docs: Vec<Document> = stored[1..]
            .iter()
            .map(|b| codec::decode(&b.transactions[0]).unwrap())
            .collect();
        assert_eq!(docs[1].as_identity().unwrap().id, bms.did);
    }
}
