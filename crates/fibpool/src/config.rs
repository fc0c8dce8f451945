//! Configuration for the harness.
//!
//! Configuration is loaded from environment variables with sensible defaults.

use fibpool_core::{PoolConfig, DEFAULT_WORKER_COUNT};
use std::time::Duration;

/// Largest accepted `last_index`. The sequence is computed by naive
/// recursion, so every extra index roughly multiplies run time by 1.6.
pub const MAX_LAST_INDEX: u32 = 45;

/// Configuration for one harness process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Workers launched in Normal and SelfTest modes (default: 10).
    pub worker_count: usize,

    /// Per-worker settings: index range and pacing bounds.
    pub pool: PoolConfig,

    /// Sleep between interrupt checks in Hang mode (default: 1s).
    pub poll_interval: Duration,
}

/// Configuration validation error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("last index {last_index} exceeds maximum {max}")]
    LastIndexTooLarge { last_index: u32, max: u32 },

    #[error("max delay {max:?} must be greater than min delay {min:?}")]
    EmptyDelayRange { min: Duration, max: Duration },

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            pool: PoolConfig::default(),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FIBPOOL_WORKERS` | `10` |
    /// | `FIBPOOL_LAST_INDEX` | `30` |
    /// | `FIBPOOL_MIN_DELAY_MS` | `500` |
    /// | `FIBPOOL_MAX_DELAY_MS` | `1000` |
    /// | `FIBPOOL_POLL_INTERVAL_MS` | `1000` |
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            worker_count: env_parse("FIBPOOL_WORKERS").unwrap_or(default.worker_count),
            pool: PoolConfig {
                last_index: env_parse("FIBPOOL_LAST_INDEX").unwrap_or(default.pool.last_index),
                min_delay: env_parse("FIBPOOL_MIN_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(default.pool.min_delay),
                max_delay: env_parse("FIBPOOL_MAX_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(default.pool.max_delay),
            },
            poll_interval: env_parse("FIBPOOL_POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(default.poll_interval),
        }
    }

    /// Validate the configuration.
    ///
    /// Call this at startup to get clear error messages about bad settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        if self.pool.last_index > MAX_LAST_INDEX {
            return Err(ConfigError::LastIndexTooLarge {
                last_index: self.pool.last_index,
                max: MAX_LAST_INDEX,
            });
        }

        if self.pool.max_delay <= self.pool.min_delay {
            return Err(ConfigError::EmptyDelayRange {
                min: self.pool.min_delay,
                max: self.pool.max_delay,
            });
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.worker_count, 10);
        assert_eq!(config.pool.last_index, 30);
        assert_eq!(config.pool.min_delay, Duration::from_millis(500));
        assert_eq!(config.pool.max_delay, Duration::from_millis(1000));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = HarnessConfig {
            worker_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_validate_rejects_large_index() {
        let mut config = HarnessConfig::default();
        config.pool.last_index = MAX_LAST_INDEX + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LastIndexTooLarge {
                last_index: MAX_LAST_INDEX + 1,
                max: MAX_LAST_INDEX,
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_delay_range() {
        let mut config = HarnessConfig::default();
        config.pool.max_delay = config.pool.min_delay;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyDelayRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let config = HarnessConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        // Only this test touches FIBPOOL_* variables in this process.
        std::env::set_var("FIBPOOL_WORKERS", "4");
        std::env::set_var("FIBPOOL_LAST_INDEX", "12");
        std::env::set_var("FIBPOOL_MIN_DELAY_MS", "10");
        std::env::set_var("FIBPOOL_MAX_DELAY_MS", "not-a-number");
        std::env::remove_var("FIBPOOL_POLL_INTERVAL_MS");

        let config = HarnessConfig::from_env();

        std::env::remove_var("FIBPOOL_WORKERS");
        std::env::remove_var("FIBPOOL_LAST_INDEX");
        std::env::remove_var("FIBPOOL_MIN_DELAY_MS");
        std::env::remove_var("FIBPOOL_MAX_DELAY_MS");

        assert_eq!(config.worker_count, 4);
        assert_eq!(config.pool.last_index, 12);
        assert_eq!(config.pool.min_delay, Duration::from_millis(10));
        assert_eq!(config.pool.max_delay, Duration::from_millis(1000));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }
}
