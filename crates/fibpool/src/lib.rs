//! # fibpool
//!
//! Diagnostic multi-threaded worker harness built on [`fibpool_core`].
//!
//! One process runs exactly one [`RunMode`]:
//!
//! | Mode | Token | Behavior |
//! |------|-------|----------|
//! | Normal | _(none)_ | run the worker pool, print a summary |
//! | Hang | `--block` | print the PID and wait until interrupted |
//! | InducedFault | `--crash` | divide by zero; the process dies |
//! | SelfTest | `--test` | announce test mode, then run like Normal |
//!
//! Settings come from `FIBPOOL_*` environment variables, see
//! [`HarnessConfig::from_env`].

pub mod config;
mod error;
pub mod fault;
pub mod interrupt;
mod mode;

pub use config::{ConfigError, HarnessConfig};
pub use error::{HarnessError, Result};
pub use interrupt::InterruptState;
pub use mode::{summary_line, Harness, Outcome, RunMode, BANNER, SELF_TEST_NOTICE};
