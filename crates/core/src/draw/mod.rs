//! Drawing engine
//!
//! Pure functions over list snapshots. A draw never mutates shared state:
//! it returns the result plus an optional [`ListPatch`](crate::models::ListPatch)
//! describing the fair-mode change, and the caller persists both together.

mod executor;
mod pool;
mod source;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::models::{DrawSettings, RaffleList};

pub use executor::{execute_draw, DrawOutcome};
pub use pool::{resolve_pool, PoolResolution};
pub use source::{Clock, FixedClock, RandomSource, SystemClock};

/// Validation failures reported by the engine
///
/// None of these are fatal. The input list is left untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("The list has no participants")]
    EmptyList,

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cannot draw {requested} without replacement from {available} participants")]
    InsufficientNames { requested: u32, available: usize },

    #[error("Fair mode cannot be combined with replacement")]
    ConflictingSettings,
}

/// Drawing engine bound to a random source and a clock
pub struct DrawEngine<R, C> {
    rng: R,
    clock: C,
}

impl<R: RandomSource, C: Clock> DrawEngine<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Preview the pool for a draw (no randomness, no mutation)
    pub fn resolve(
        &self,
        list: &RaffleList,
        settings: &DrawSettings,
    ) -> Result<PoolResolution, DrawError> {
        resolve_pool(
            list,
            settings.quantity,
            settings.fair_mode,
            settings.with_replacement,
        )
    }

    pub fn execute(
        &mut self,
        list: &RaffleList,
        settings: &DrawSettings,
        dry_run: bool,
    ) -> Result<DrawOutcome, DrawError> {
        execute_draw(list, settings, dry_run, &mut self.rng, &self.clock)
    }
}

impl DrawEngine<StdRng, SystemClock> {
    /// Reproducible engine for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SystemClock)
    }

    /// Engine seeded from OS entropy
    pub fn system() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock)
    }
}
