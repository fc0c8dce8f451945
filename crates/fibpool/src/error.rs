//! Error types for the fibpool harness.

use crate::config::ConfigError;
use fibpool_core::PoolError;
use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that end a harness run with a non-success exit.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool could not be run to completion
    #[error("worker pool failed: {0}")]
    Pool(#[from] PoolError),

    /// OS signal handlers could not be registered
    #[error("failed to install interrupt listener: {0}")]
    Signal(#[source] std::io::Error),

    /// The blocking pool task panicked or was cancelled
    #[error("pool task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
