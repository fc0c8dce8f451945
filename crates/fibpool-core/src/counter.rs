//! Shared atomic counters: worker identities and completions.
//!
//! Both are owned by the [`Supervisor`](crate::Supervisor) and handed to
//! workers by reference, so every mutation site is visible in a signature.

use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Identity of one worker, unique within its supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(u32);

impl WorkerId {
    /// Get the raw ordinal.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thread {}", self.0)
    }
}

impl From<u32> for WorkerId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// Monotonic source of [`WorkerId`]s. Identities are never reused.
#[derive(Debug, Default)]
pub struct IdentitySequence {
    next: AtomicU32,
}

impl IdentitySequence {
    /// Create a sequence starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next identity.
    pub fn next_id(&self) -> WorkerId {
        WorkerId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of identities handed out so far.
    pub fn issued(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Count of workers that reached normal termination.
///
/// Workers only ever call [`record`](Self::record), once, as their final act.
/// Readers must join the workers first; the join provides the
/// happens-before edge for the final value.
#[derive(Debug, Default)]
pub struct CompletionCounter {
    completed: AtomicUsize,
}

impl CompletionCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed worker.
    pub fn record(&self) {
        self.completed.fetch_add(1, Ordering::Release);
    }

    /// Current number of completed workers.
    pub fn get(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }
}
