//! Randomized per-worker pacing.
//!
//! Every worker owns its own [`Pacer`], and every pacer owns its own RNG.
//! Nothing here is shared between threads, so drawing a delay never
//! contends with another worker and delays are not correlated across workers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::PoolConfig;

/// Source of uniformly distributed delays in `[min_delay, max_delay)`.
#[derive(Debug)]
pub struct Pacer {
    rng: StdRng,
    min_delay: Duration,
    max_delay: Duration,
}

impl Pacer {
    /// Create a pacer seeded from OS entropy.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            min_delay,
            max_delay,
        }
    }

    /// Create a pacer with a fixed seed (reproducible delays).
    pub fn seeded(seed: u64, min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_delay,
            max_delay,
        }
    }

    /// Create a pacer using the delay bounds of a pool configuration.
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.min_delay, config.max_delay)
    }

    /// Draw the next delay.
    ///
    /// An empty range (`max_delay <= min_delay`) always yields `min_delay`.
    pub fn next_delay(&mut self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        // Sampled as a Duration so bounds past u64::MAX nanoseconds stay exact
        self.rng.random_range(self.min_delay..self.max_delay)
    }

    /// Draw the next delay and block the calling thread for it.
    pub fn pause(&mut self) {
        let delay = self.next_delay();
        std::thread::sleep(delay);
    }
}
