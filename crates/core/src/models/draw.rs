//! Draw settings, results, and the fair-mode patch

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Participant;

/// Parameters for a single draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    /// Number of winners to pick
    pub quantity: u32,
    /// Allow the same participant to be picked more than once
    pub with_replacement: bool,
    /// Pick every participant once per cycle before anyone repeats
    pub fair_mode: bool,
    /// Presentation hint for the front-end, ignored by the engine
    pub animation_effects: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            quantity: 1,
            with_replacement: false,
            fair_mode: false,
            animation_effects: true,
        }
    }
}

impl DrawSettings {
    pub fn new(quantity: u32) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    pub fn with_replacement(mut self) -> Self {
        self.with_replacement = true;
        self
    }

    pub fn fair(mut self) -> Self {
        self.fair_mode = true;
        self
    }

    /// Whether fair-mode cycle tracking applies to this draw
    pub fn tracks_cycle(&self) -> bool {
        self.fair_mode && !self.with_replacement
    }
}

/// Outcome of one executed draw (dry run or committed)
///
/// Winners are kept in generation order: index 0 is first place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub id: Uuid,
    pub list_id: Uuid,
    pub drawn_names: Vec<Participant>,
    pub timestamp: DateTime<Utc>,
    pub settings: DrawSettings,
}

impl DrawResult {
    /// Winner display names in generation order
    pub fn winner_names(&self) -> Vec<&str> {
        self.drawn_names.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Fair-mode state change produced by a committed draw
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListPatch {
    /// Replacement value for `RaffleList::drawn_names`
    pub drawn_names: BTreeSet<Uuid>,
}
