//! Worker pool configuration types.

use std::time::Duration;

/// Default number of workers launched per run.
pub const DEFAULT_WORKER_COUNT: usize = 10;

/// Default last sequence index each worker computes (inclusive).
pub const DEFAULT_LAST_INDEX: u32 = 30;

/// Configuration shared by every worker in a pool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Last sequence index computed by each worker (inclusive).
    ///
    /// Default: 30
    pub last_index: u32,

    /// Lower bound of the paced delay (inclusive).
    ///
    /// Default: 500ms
    pub min_delay: Duration,

    /// Upper bound of the paced delay (exclusive).
    ///
    /// Default: 1000ms
    pub max_delay: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            last_index: DEFAULT_LAST_INDEX,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(1000),
        }
    }
}

impl PoolConfig {
    /// Number of per-step lines a successful worker emits.
    pub fn steps_per_worker(&self) -> usize {
        self.last_index as usize + 1
    }
}
