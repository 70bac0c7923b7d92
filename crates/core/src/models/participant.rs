//! Participant model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named entry in a raffle list
///
/// Identity is the `id`. The display name is only used for presentation
/// and case-insensitive duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Case-insensitive comparison against another display name
    pub fn has_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}
