//! Run-mode selection and dispatch.
//!
//! ```text
//! Harness::run(mode)
//!   ├─ Normal       ─► pool (spawn_blocking) ─► summary line
//!   ├─ SelfTest     ─► "Running in test mode" ─► same as Normal
//!   ├─ Hang         ─► install listener ─► poll InterruptState every poll_interval
//!   └─ InducedFault ─► divide by zero (never returns)
//! ```

use fibpool_core::{PoolReport, Reporter, Supervisor};
use std::fmt;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::fault;
use crate::interrupt::{self, InterruptState};

/// Banner emitted at the start of every run.
pub const BANNER: &str = "Hello World!";

/// Notice distinguishing a self-test run from a normal one.
pub const SELF_TEST_NOTICE: &str = "Running in test mode";

/// Diagnostic behavior selected for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Run the worker pool.
    #[default]
    Normal,
    /// Block until interrupted, for attaching a debugger.
    Hang,
    /// Crash on purpose.
    InducedFault,
    /// Run the worker pool, announced as a self-test.
    SelfTest,
}

impl RunMode {
    /// Parse a mode token (case-insensitive, leading dashes ignored).
    ///
    /// Returns `None` for unknown tokens.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim_start_matches('-').to_lowercase().as_str() {
            "block" | "hang" => Some(Self::Hang),
            "crash" | "fault" => Some(Self::InducedFault),
            "test" | "self-test" | "selftest" => Some(Self::SelfTest),
            "" | "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    /// Select the mode from process arguments (program name already skipped).
    ///
    /// Only the first argument is considered; absent or unknown selects Normal.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let Some(token) = args.into_iter().next() else {
            return Self::Normal;
        };
        let token = token.as_ref();
        Self::parse(token).unwrap_or_else(|| {
            tracing::warn!(token, "Unknown run mode, using normal");
            Self::Normal
        })
    }

    /// Check whether this mode runs the worker pool.
    pub fn runs_pool(&self) -> bool {
        matches!(self, Self::Normal | Self::SelfTest)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Hang => write!(f, "hang"),
            Self::InducedFault => write!(f, "induced-fault"),
            Self::SelfTest => write!(f, "self-test"),
        }
    }
}

/// How a run that returned normally ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The worker pool ran and every worker was joined.
    PoolFinished(PoolReport),
    /// Hang mode saw an interrupt after this many polls.
    Interrupted { polls: u64 },
}

/// Final summary line for a pool run.
pub fn summary_line(report: &PoolReport) -> String {
    if report.is_complete() {
        format!("All {} threads completed successfully!", report.completed)
    } else {
        format!(
            "{} of {} threads completed ({} faulted)",
            report.completed, report.requested, report.faulted
        )
    }
}

/// Owns the configuration, the output reporter and the interrupt state.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    reporter: Reporter,
    interrupt: InterruptState,
}

impl Harness {
    /// Create a harness.
    pub fn new(config: HarnessConfig, reporter: Reporter) -> Self {
        Self {
            config,
            reporter,
            interrupt: InterruptState::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Get the interrupt state read by Hang mode.
    pub fn interrupt_state(&self) -> &InterruptState {
        &self.interrupt
    }

    /// Run the selected mode. Entered once per process.
    ///
    /// `RunMode::InducedFault` never returns.
    pub async fn run(&self, mode: RunMode) -> Result<Outcome> {
        tracing::info!(%mode, "Starting harness");
        self.reporter.report(BANNER);

        match mode {
            RunMode::Hang => self.hang().await,
            RunMode::InducedFault => fault::induce_fault(&self.reporter),
            RunMode::SelfTest => {
                self.reporter.report(SELF_TEST_NOTICE);
                self.run_pool().await
            }
            RunMode::Normal => self.run_pool().await,
        }
    }

    async fn hang(&self) -> Result<Outcome> {
        self.reporter
            .report("Attach a debugger and interrupt the process to continue");
        self.reporter
            .report(format!("Process ID: {}", std::process::id()));

        let listener =
            interrupt::install_listener(self.interrupt.clone()).map_err(HarnessError::Signal)?;
        let polls = interrupt::wait_until_signaled(
            &self.interrupt,
            &self.reporter,
            self.config.poll_interval,
        )
        .await;
        listener.abort();

        tracing::info!(polls, "Hang mode interrupted");
        Ok(Outcome::Interrupted { polls })
    }

    async fn run_pool(&self) -> Result<Outcome> {
        let supervisor = Supervisor::new(self.config.pool.clone(), self.reporter.clone());
        let workers = self.config.worker_count;

        let report = tokio::task::spawn_blocking(move || supervisor.run(workers)).await??;

        if !report.is_complete() {
            tracing::warn!(
                completed = report.completed,
                requested = report.requested,
                faulted = report.faulted,
                "Not every worker completed"
            );
        }
        self.reporter.report(summary_line(&report));
        Ok(Outcome::PoolFinished(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::WAITING_NOTICE;
    use fibpool_core::{CaptureSink, PoolConfig};
    use std::time::Duration;

    fn fast_config(worker_count: usize) -> HarnessConfig {
        HarnessConfig {
            worker_count,
            pool: PoolConfig {
                last_index: 8,
                min_delay: Duration::ZERO,
                max_delay: Duration::from_millis(2),
            },
            poll_interval: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!(RunMode::parse("--block"), Some(RunMode::Hang));
        assert_eq!(RunMode::parse("--crash"), Some(RunMode::InducedFault));
        assert_eq!(RunMode::parse("--test"), Some(RunMode::SelfTest));
        assert_eq!(RunMode::parse("--TEST"), Some(RunMode::SelfTest));
        assert_eq!(RunMode::parse("hang"), Some(RunMode::Hang));
        assert_eq!(RunMode::parse("--normal"), Some(RunMode::Normal));
        assert_eq!(RunMode::parse("--bogus"), None);
    }

    #[test]
    fn test_run_mode_from_args() {
        assert_eq!(RunMode::from_args(Vec::<String>::new()), RunMode::Normal);
        assert_eq!(RunMode::from_args(["--block"]), RunMode::Hang);
        assert_eq!(RunMode::from_args(["--bogus"]), RunMode::Normal);
        // Only the first token counts.
        assert_eq!(RunMode::from_args(["--test", "--crash"]), RunMode::SelfTest);
    }

    #[test]
    fn test_runs_pool_flags() {
        assert!(RunMode::Normal.runs_pool());
        assert!(RunMode::SelfTest.runs_pool());
        assert!(!RunMode::Hang.runs_pool());
        assert!(!RunMode::InducedFault.runs_pool());
    }

    #[test]
    fn test_summary_line() {
        let full = PoolReport {
            requested: 10,
            completed: 10,
            faulted: 0,
        };
        assert_eq!(summary_line(&full), "All 10 threads completed successfully!");

        let partial = PoolReport {
            requested: 10,
            completed: 9,
            faulted: 1,
        };
        assert_eq!(summary_line(&partial), "9 of 10 threads completed (1 faulted)");
    }

    #[tokio::test]
    async fn test_normal_mode_runs_pool() {
        let capture = CaptureSink::new();
        let harness = Harness::new(fast_config(3), Reporter::new(capture.clone()));

        let outcome = harness.run(RunMode::Normal).await.expect("normal run");

        assert_eq!(
            outcome,
            Outcome::PoolFinished(PoolReport {
                requested: 3,
                completed: 3,
                faulted: 0,
            })
        );
        let lines = capture.lines();
        assert_eq!(lines.first().map(String::as_str), Some(BANNER));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("All 3 threads completed successfully!")
        );
        assert!(!lines.iter().any(|l| l == SELF_TEST_NOTICE));
    }

    #[tokio::test]
    async fn test_self_test_mode_matches_normal_plus_notice() {
        let capture = CaptureSink::new();
        let harness = Harness::new(fast_config(2), Reporter::new(capture.clone()));

        let outcome = harness.run(RunMode::SelfTest).await.expect("self-test run");

        assert!(matches!(outcome, Outcome::PoolFinished(r) if r.completed == 2));
        let lines = capture.lines();
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], SELF_TEST_NOTICE);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("All 2 threads completed successfully!")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_mode_never_reaches_pool() {
        let capture = CaptureSink::new();
        let harness = Harness::new(fast_config(4), Reporter::new(capture.clone()));
        harness.interrupt_state().signal();

        let outcome = harness.run(RunMode::Hang).await.expect("hang run");

        assert_eq!(outcome, Outcome::Interrupted { polls: 1 });
        let lines = capture.lines();
        assert_eq!(lines[0], BANNER);
        assert!(lines[2].starts_with("Process ID: "));
        assert_eq!(lines.last().map(String::as_str), Some(WAITING_NOTICE));
        assert!(!lines.iter().any(|l| l.starts_with("Launching thread")));
    }

    #[tokio::test]
    async fn test_invalid_pool_surfaces_error() {
        let harness = Harness::new(fast_config(0), Reporter::new(CaptureSink::new()));

        let err = harness.run(RunMode::Normal).await.expect_err("zero workers");
        assert!(matches!(
            err,
            HarnessError::Pool(fibpool_core::PoolError::NoWorkers)
        ));
    }
}
