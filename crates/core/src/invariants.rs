//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{DrawResult, RaffleList};

/// Validate that a list's participants have unique ids and non-empty names
pub fn assert_list_invariants(list: &RaffleList) {
    let mut seen = HashSet::new();
    for participant in &list.names {
        debug_assert!(
            seen.insert(participant.id),
            "List {} has duplicate participant id {}",
            list.id,
            participant.id
        );
        debug_assert!(
            !participant.name.trim().is_empty(),
            "List {} has participant {} with empty name",
            list.id,
            participant.id
        );
    }
}

/// Validate a produced draw result against its own settings
pub fn assert_result_invariants(result: &DrawResult) {
    debug_assert_eq!(
        result.drawn_names.len(),
        result.settings.quantity as usize,
        "Draw {} produced wrong number of winners",
        result.id
    );

    if !result.settings.with_replacement {
        let unique: HashSet<_> = result.drawn_names.iter().map(|p| p.id).collect();
        debug_assert!(
            unique.len() == result.drawn_names.len(),
            "Draw {} repeated a winner without replacement",
            result.id
        );
    }
}
