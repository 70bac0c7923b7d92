//! Injectable randomness and time sources for the drawing engine

use chrono::{DateTime, Utc};
use rand::Rng;

/// Uniform integer source used for winner selection
pub trait RandomSource {
    /// Uniform index in `[0, bound)`. Callers never pass `bound == 0`.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T: Rng + ?Sized> RandomSource for T {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Timestamp source for draw results
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant (for tests and replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
