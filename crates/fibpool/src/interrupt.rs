//! Interrupt state and OS signal listener.
//!
//! [`InterruptState`] is a one-way flag: it starts unsignaled, flips to
//! signaled on the first interrupt and stays there. The signal listener is
//! its only writer and does nothing but flip the flag; Hang mode polls it.
//!
//! ## Signals
//! **Unix platforms:** `SIGINT` (Ctrl-C), `SIGTERM`, `SIGQUIT`
//!
//! **Windows platforms:** Ctrl-C via [`tokio::signal::ctrl_c`]

use fibpool_core::Reporter;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Notice emitted on every Hang-mode poll.
pub const WAITING_NOTICE: &str = "Waiting... (press Ctrl-C to quit)";

/// Shared one-way interrupt flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptState {
    signaled: Arc<AtomicBool>,
}

impl InterruptState {
    /// Create an unsignaled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the state signaled. Returns `true` only for the first delivery.
    pub fn signal(&self) -> bool {
        !self.signaled.swap(true, Ordering::AcqRel)
    }

    /// Check whether an interrupt has been delivered.
    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }

    fn deliver(&self, source: &'static str) {
        if self.signal() {
            tracing::info!(signal = source, "Interrupt received");
        } else {
            tracing::debug!(signal = source, "Repeated interrupt ignored");
        }
    }
}

/// Register OS signal handlers and spawn a task that feeds them into `state`.
///
/// Registration happens before this returns, so an interrupt arriving right
/// after the call is never lost. Must be called from within a tokio runtime.
#[cfg(unix)]
pub fn install_listener(state: InterruptState) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    Ok(tokio::spawn(async move {
        loop {
            let source = tokio::select! {
                Some(()) = sigint.recv() => "SIGINT",
                Some(()) = sigterm.recv() => "SIGTERM",
                Some(()) = sigquit.recv() => "SIGQUIT",
                else => break,
            };
            state.deliver(source);
        }
        tracing::debug!("Interrupt listener exited");
    }))
}

/// Register the Ctrl-C handler and spawn a task that feeds it into `state`.
///
/// Must be called from within a tokio runtime.
#[cfg(not(unix))]
pub fn install_listener(state: InterruptState) -> io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            state.deliver("Ctrl-C");
        }
        tracing::debug!("Interrupt listener exited");
    }))
}

/// Sleep, report a waiting notice, check the flag; repeat until signaled.
///
/// Returns the number of polls performed. The loop never exits before the
/// flag is set and exits at the first poll after it is set.
pub async fn wait_until_signaled(
    state: &InterruptState,
    reporter: &Reporter,
    poll_interval: Duration,
) -> u64 {
    let mut polls = 0;
    loop {
        tokio::time::sleep(poll_interval).await;
        polls += 1;
        reporter.report(WAITING_NOTICE);
        if state.is_signaled() {
            tracing::debug!(polls, "Wait loop observed interrupt");
            return polls;
        }
    }
}
