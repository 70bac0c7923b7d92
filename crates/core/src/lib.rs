//! Sorteador Core Library
//!
//! Raffle lists, the drawing engine with fair-mode cycling, history,
//! statistics, configuration, and SQLite storage for Sorteador.

pub mod config;
pub mod draw;
pub mod error;
pub mod history;
pub mod invariants;
pub mod models;
pub mod stats;
pub mod storage;

pub use config::AppConfig;
pub use draw::{
    execute_draw, resolve_pool, Clock, DrawEngine, DrawError, DrawOutcome, FixedClock,
    PoolResolution, RandomSource, SystemClock,
};
pub use error::{Error, Result};
pub use history::HistoryQuery;
pub use models::*;
pub use stats::{ListStatistics, ParticipantPerformance};
pub use storage::Database;
