//! # fibpool-core
//!
//! Worker pool for the fibpool diagnostic harness.
//!
//! A [`Supervisor`] launches a fixed number of [`Worker`]s, each on its own
//! OS thread. Every worker walks the sequence indices `0..=last_index`,
//! reporting each term through a shared [`Reporter`] and sleeping a random
//! [`Pacer`] delay between steps. The supervisor joins all workers and
//! returns how many of them completed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Supervisor (caller thread)             │
//! │   IdentitySequence ──► WorkerId     Launcher ──► thread  │
//! └───────┬──────────────────┬──────────────────┬────────────┘
//!         ▼                  ▼                  ▼
//!   ┌───────────┐      ┌───────────┐      ┌───────────┐
//!   │ Thread 0  │      │ Thread 1  │ .... │ Thread N  │
//!   │ Pacer     │      │ Pacer     │      │ Pacer     │
//!   │ compute() │      │ compute() │      │ compute() │
//!   └─────┬─────┘      └─────┬─────┘      └─────┬─────┘
//!         │ report()         │                  │
//!         ▼                  ▼                  ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │          Reporter (Mutex<dyn Write>)             │
//!   └──────────────────────────────────────────────────┘
//!         │ record() on exit
//!         ▼
//!   CompletionCounter ──► PoolReport (read after join)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use fibpool_core::{PoolConfig, Reporter, Supervisor};
//!
//! # fn example() -> fibpool_core::Result<()> {
//! let supervisor = Supervisor::new(PoolConfig::default(), Reporter::stdout());
//! let report = supervisor.run(10)?;
//! println!("All {} threads completed successfully!", report.completed);
//! # Ok(())
//! # }
//! ```

mod config;
mod counter;
mod error;
mod launcher;
mod pacer;
mod pool;
mod reporter;
pub mod sequence;
mod worker;

pub use config::{PoolConfig, DEFAULT_LAST_INDEX, DEFAULT_WORKER_COUNT};
pub use counter::{CompletionCounter, IdentitySequence, WorkerId};
pub use error::{PoolError, Result};
pub use launcher::{Launcher, ThreadLauncher, WorkerBody};
pub use pacer::Pacer;
pub use pool::{PoolReport, Supervisor};
pub use reporter::{CaptureSink, Reporter};
pub use worker::{Worker, WorkerHandle, WorkerOutcome};
