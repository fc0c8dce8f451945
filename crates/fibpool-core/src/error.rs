//! Error types for fibpool-core.

use thiserror::Error;

use crate::counter::WorkerId;

/// Result type alias for fibpool-core operations.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur while running a worker pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// A pool run was requested with zero workers.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// A worker thread could not be created. Workers launched before the
    /// failure were released without being joined.
    #[error("failed to launch worker {} of {requested}: {source}", .released.len() + 1)]
    Spawn {
        /// Workers launched before the failure, now running detached
        released: Vec<WorkerId>,
        /// Workers requested for the run
        requested: usize,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}
