//! Configuration for the pool and sealing loop.

use std::time::Duration;

use serde::Deserialize;

/// Sealing parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Scheduler tick period.
    #[serde(with = "millis")]
    pub seal_interval: Duration,

    /// Pending payloads needed before a tick seals a block.
    pub seal_threshold: usize,

    /// Seal leftovers regardless of threshold when shutting down.
    pub seal_on_shutdown: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            seal_interval: Duration::from_secs(1),
            seal_threshold: 1,
            seal_on_shutdown: true,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
