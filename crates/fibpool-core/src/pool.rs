//! Pool supervisor: launches a fixed set of workers and waits for all of them.
//!
//! # Architecture
//!
//! ```text
//! Supervisor::run(n)
//!   ├─► n times:
//!   │     Worker::new(identities.next_id(), ..)
//!   │     report "Launching thread <id>"
//!   │     Launcher ─► WorkerHandle::Joinable
//!   │       └─ launch error ─► release() every handle so far ─► PoolError::Spawn { released }
//!   ├─► join every handle (barrier)
//!   │     ├─ Finished  ─► counted by the worker itself
//!   │     └─ Panicked  ─► faulted, never counted
//!   └─► PoolReport { completed = CompletionCounter::get() }
//! ```
//!
//! The identity sequence lives as long as the supervisor; the completion
//! counter is fresh for every run so a released worker from an earlier failed
//! run can never inflate a later report.

use std::fmt;
use std::sync::Arc;

use crate::config::PoolConfig;
use crate::counter::{CompletionCounter, IdentitySequence};
use crate::error::{PoolError, Result};
use crate::launcher::{Launcher, ThreadLauncher};
use crate::reporter::Reporter;
use crate::worker::{Worker, WorkerHandle, WorkerOutcome};

/// Result of one pool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReport {
    /// Workers requested and launched.
    pub requested: usize,
    /// Workers that reached normal termination.
    pub completed: usize,
    /// Workers that panicked before completing.
    pub faulted: usize,
}

impl PoolReport {
    /// Check whether every requested worker completed.
    pub fn is_complete(&self) -> bool {
        self.completed == self.requested
    }
}

/// Owns the workers of a run from creation to join.
pub struct Supervisor {
    config: PoolConfig,
    reporter: Reporter,
    launcher: Box<dyn Launcher>,
    identities: IdentitySequence,
}

impl Supervisor {
    /// Create a supervisor that launches real OS threads.
    pub fn new(config: PoolConfig, reporter: Reporter) -> Self {
        tracing::debug!(
            last_index = config.last_index,
            min_delay = ?config.min_delay,
            max_delay = ?config.max_delay,
            "Creating pool supervisor"
        );

        Self {
            config,
            reporter,
            launcher: Box::new(ThreadLauncher),
            identities: IdentitySequence::new(),
        }
    }

    /// Replace the thread launcher.
    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    /// Get the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get the reporter shared with workers.
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Launch `worker_count` workers and block until every one has terminated.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NoWorkers`] if `worker_count` is zero.
    /// - [`PoolError::Spawn`] if a worker thread cannot be created. Workers
    ///   already running are released, not joined.
    pub fn run(&self, worker_count: usize) -> Result<PoolReport> {
        if worker_count == 0 {
            return Err(PoolError::NoWorkers);
        }

        tracing::info!(
            workers = worker_count,
            last_index = self.config.last_index,
            "Starting worker pool"
        );

        let completed = Arc::new(CompletionCounter::new());
        let handles = self.launch_all(worker_count, &completed)?;
        let faulted = Self::join_all(handles);

        let report = PoolReport {
            requested: worker_count,
            completed: completed.get(),
            faulted,
        };
        tracing::info!(
            requested = report.requested,
            completed = report.completed,
            faulted = report.faulted,
            "Worker pool finished"
        );
        Ok(report)
    }

    /// Launch every worker, or release the ones already started on failure.
    fn launch_all(
        &self,
        worker_count: usize,
        completed: &Arc<CompletionCounter>,
    ) -> Result<Vec<WorkerHandle>> {
        let mut handles = Vec::with_capacity(worker_count);

        for _ in 0..worker_count {
            let worker = Worker::new(
                self.identities.next_id(),
                &self.config,
                self.reporter.clone(),
                Arc::clone(completed),
            );
            let worker_id = worker.id();
            self.reporter
                .report(format!("Launching thread {}", worker_id.as_u32()));

            match worker.launch(self.launcher.as_ref()) {
                Ok(handle) => {
                    tracing::debug!(worker = %worker_id, "Worker launched");
                    handles.push(handle);
                }
                Err(source) => {
                    tracing::error!(
                        worker = %worker_id,
                        launched = handles.len(),
                        requested = worker_count,
                        error = %source,
                        "Failed to launch worker, releasing running workers"
                    );
                    let released = handles
                        .into_iter()
                        .map(|handle| handle.release().id())
                        .collect();
                    return Err(PoolError::Spawn {
                        released,
                        requested: worker_count,
                        source,
                    });
                }
            }
        }

        Ok(handles)
    }

    /// Join every handle; returns how many workers panicked.
    fn join_all(handles: Vec<WorkerHandle>) -> usize {
        let mut faulted = 0;
        for handle in handles {
            let worker_id = handle.id();
            match handle.join() {
                // launch_all never hands back released handles
                WorkerOutcome::Finished | WorkerOutcome::Unobserved => {
                    tracing::debug!(worker = %worker_id, "Worker joined");
                }
                WorkerOutcome::Panicked(message) => {
                    faulted += 1;
                    tracing::warn!(worker = %worker_id, panic = %message, "Worker panicked");
                }
            }
        }
        faulted
    }
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("config", &self.config)
            .field("identities", &self.identities)
            .finish_non_exhaustive()
    }
}
