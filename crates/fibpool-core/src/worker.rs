//! A single pool worker and the handle the supervisor keeps for it.
//!
//! # Lifecycle
//!
//! ```text
//! Worker::new ──► Worker::launch ──► WorkerHandle::Joinable ──► join() ──► WorkerOutcome
//!                                          │
//!                                          └── release() ──► WorkerHandle::Released
//!                                                            (detached, outcome unobserved)
//! ```
//!
//! On its own thread a worker pauses once, then for every index in
//! `0..=last_index` computes the sequence term, reports it and pauses again.
//! It finishes with an "exited" line and, as its very last act, records
//! itself in the [`CompletionCounter`]. A worker that panics never gets that
//! far and is therefore never counted.

use std::any::Any;
use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::PoolConfig;
use crate::counter::{CompletionCounter, WorkerId};
use crate::launcher::Launcher;
use crate::pacer::Pacer;
use crate::reporter::Reporter;
use crate::sequence;

/// One compute/report/pace loop, not yet started.
#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    pacer: Pacer,
    last_index: u32,
    reporter: Reporter,
    completed: Arc<CompletionCounter>,
}

impl Worker {
    /// Create a worker with its own OS-seeded pacer.
    pub fn new(
        id: WorkerId,
        config: &PoolConfig,
        reporter: Reporter,
        completed: Arc<CompletionCounter>,
    ) -> Self {
        Self::with_pacer(
            id,
            Pacer::from_config(config),
            config.last_index,
            reporter,
            completed,
        )
    }

    /// Create a worker with an explicit pacer.
    pub fn with_pacer(
        id: WorkerId,
        pacer: Pacer,
        last_index: u32,
        reporter: Reporter,
        completed: Arc<CompletionCounter>,
    ) -> Self {
        Self {
            id,
            pacer,
            last_index,
            reporter,
            completed,
        }
    }

    /// Get the worker identity.
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Run the loop on the current thread.
    pub fn run(mut self) {
        tracing::debug!(worker = %self.id, last_index = self.last_index, "Worker started");

        self.pacer.pause();
        for i in 0..=self.last_index {
            let value = sequence::compute(i);
            self.reporter
                .report(format!("{}: fib({}) = {}", self.id, i, value));
            self.pacer.pause();
        }
        self.reporter.report(format!("{} exited!", self.id));

        self.completed.record();
        tracing::debug!(worker = %self.id, "Worker completed");
    }

    /// Start the worker on a new thread named after its identity.
    pub fn launch(self, launcher: &dyn Launcher) -> io::Result<WorkerHandle> {
        let id = self.id;
        let handle = launcher.launch(id.to_string(), Box::new(move || self.run()))?;
        Ok(WorkerHandle::Joinable { id, handle })
    }
}

/// Supervisor-side handle to a launched worker.
#[derive(Debug)]
pub enum WorkerHandle {
    /// Owned by the supervisor and still joinable.
    Joinable {
        /// Worker identity
        id: WorkerId,
        /// OS thread handle
        handle: JoinHandle<()>,
    },
    /// Detached; the worker may still be running but nobody will observe it.
    Released {
        /// Worker identity
        id: WorkerId,
    },
}

/// How a joined worker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The thread returned normally.
    Finished,
    /// The thread panicked; carries the panic message when one was available.
    Panicked(String),
    /// The handle had been released, so there is nothing to observe.
    Unobserved,
}

impl WorkerHandle {
    /// Get the worker identity.
    pub fn id(&self) -> WorkerId {
        match self {
            Self::Joinable { id, .. } | Self::Released { id } => *id,
        }
    }

    /// Check whether the handle can still be joined.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Joinable { .. })
    }

    /// Give up ownership of the thread without joining it.
    #[must_use = "a released handle still carries the worker identity"]
    pub fn release(self) -> Self {
        match self {
            Self::Joinable { id, handle } => {
                drop(handle);
                tracing::debug!(worker = %id, "Worker released without join");
                Self::Released { id }
            }
            released @ Self::Released { .. } => released,
        }
    }

    /// Wait for the worker thread to terminate.
    pub fn join(self) -> WorkerOutcome {
        match self {
            Self::Joinable { handle, .. } => match handle.join() {
                Ok(()) => WorkerOutcome::Finished,
                Err(payload) => WorkerOutcome::Panicked(panic_message(payload.as_ref())),
            },
            Self::Released { .. } => WorkerOutcome::Unobserved,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::ThreadLauncher;
    use crate::reporter::CaptureSink;
    use std::time::Duration;

    fn quick_pacer() -> Pacer {
        Pacer::seeded(7, Duration::ZERO, Duration::from_millis(2))
    }

    #[test]
    fn test_run_emits_ordered_lines_then_exit() {
        let capture = CaptureSink::new();
        let completed = Arc::new(CompletionCounter::new());
        let worker = Worker::with_pacer(
            WorkerId::from(3),
            quick_pacer(),
            10,
            Reporter::new(capture.clone()),
            Arc::clone(&completed),
        );

        worker.run();

        let lines = capture.lines();
        assert_eq!(lines.len(), 12);
        for (i, line) in lines.iter().take(11).enumerate() {
            let expected = format!("Thread 3: fib({}) = {}", i, sequence::compute(i as u32));
            assert_eq!(line, &expected);
        }
        assert_eq!(lines[11], "Thread 3 exited!");
        assert_eq!(completed.get(), 1);
    }

    #[test]
    fn test_launch_and_join_finished() {
        let capture = CaptureSink::new();
        let completed = Arc::new(CompletionCounter::new());
        let worker = Worker::with_pacer(
            WorkerId::from(0),
            quick_pacer(),
            2,
            Reporter::new(capture.clone()),
            Arc::clone(&completed),
        );

        let handle = worker.launch(&ThreadLauncher).expect("launch");
        assert!(handle.is_joinable());
        assert_eq!(handle.id(), WorkerId::from(0));
        assert_eq!(handle.join(), WorkerOutcome::Finished);
        assert_eq!(completed.get(), 1);
        assert_eq!(capture.lines().last().map(String::as_str), Some("Thread 0 exited!"));
    }

    #[test]
    fn test_released_handle_is_unobserved() {
        let completed = Arc::new(CompletionCounter::new());
        let worker = Worker::with_pacer(
            WorkerId::from(1),
            quick_pacer(),
            0,
            Reporter::new(CaptureSink::new()),
            completed,
        );

        let handle = worker.launch(&ThreadLauncher).expect("launch").release();
        assert!(!handle.is_joinable());
        assert_eq!(handle.id(), WorkerId::from(1));
        assert_eq!(handle.join(), WorkerOutcome::Unobserved);
    }

    #[test]
    fn test_panic_message_extraction() {
        let handle = std::thread::spawn(|| panic!("boom {}", 42));
        let payload = handle.join().expect_err("thread should panic");
        assert_eq!(panic_message(payload.as_ref()), "boom 42");

        let handle = std::thread::spawn(|| std::panic::panic_any(17u8));
        let payload = handle.join().expect_err("thread should panic");
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
