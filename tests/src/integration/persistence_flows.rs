//! # Persistence Flows
//!
//! The node runtime over a real chain file: restart, tampering, locking.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dl_01_ledger::{validate_chain, ChainStore, JsonFileStore};
    use node_runtime::{NodeConfig, NodeRuntime};
    use serde_json::Value;
    use tempfile::TempDir;

    use crate::fixtures::{anchor_payload, Actor};

    fn config(dir: &TempDir) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.ledger.seal_interval = Duration::from_millis(10);
        config.storage.chain_path = dir.path().join("chain").join("blockchain.json");
        config
    }

    /// Chain file whose genesis carries `root` as trust anchor.
    fn anchored_chain(dir: &TempDir, root: &Actor) {
        let genesis =
            dl_01_ledger::genesis_block(Some(anchor_payload(root)), chrono::Utc::now()).unwrap();
        JsonFileStore::open(config(dir).storage.chain_path)
            .save(&[genesis])
            .unwrap();
    }

    #[tokio::test]
    async fn test_restart_keeps_admitted_identities() {
        let dir = TempDir::new().unwrap();
        let root = Actor::new("did:batterypass:eu");
        let oem = Actor::new("did:batterypass:oem.acme");
        anchored_chain(&dir, &root);

        let mut runtime = NodeRuntime::new(config(&dir)).unwrap();
        runtime.start();
        runtime
            .admission()
            .create_or_modify_identity(&root.identity_request(&oem))
            .unwrap();
        runtime.shutdown().await.unwrap();

        let runtime = NodeRuntime::new(config(&dir)).unwrap();
        assert_eq!(runtime.ledger().chain_len(), 2);
        assert_eq!(runtime.admission().get_identity(&oem.did).unwrap().id, oem.did);
        assert!(validate_chain(&runtime.ledger().snapshot()));
    }

    #[test]
    fn test_tampered_file_refused() {
        let dir = TempDir::new().unwrap();
        let root = Actor::new("did:batterypass:eu");
        anchored_chain(&dir, &root);

        let path = config(&dir).storage.chain_path;
        let mut blocks: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        blocks[0]["timestamp"] = Value::String("2020-01-01T00:00:00Z".into());
        std::fs::write(&path, serde_json::to_vec(&blocks).unwrap()).unwrap();

        assert!(NodeRuntime::new(config(&dir)).is_err());
    }

    #[test]
    fn test_second_runtime_locked_out() {
        let dir = TempDir::new().unwrap();
        let _first = NodeRuntime::new(config(&dir)).unwrap();

        let err = NodeRuntime::new(config(&dir))
            .err()
            .expect("second runtime on a locked chain file must fail");
        assert!(format!("{err:#}").contains("locked"));
    }

    #[test]
    fn test_fresh_start_writes_genesis() {
        let dir = TempDir::new().unwrap();
        let runtime = NodeRuntime::new(config(&dir)).unwrap();
        assert_eq!(runtime.ledger().chain_len(), 1);

        let stored = JsonFileStore::open(config(&dir).storage.chain_path)
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].transactions.is_empty());
    }
}
