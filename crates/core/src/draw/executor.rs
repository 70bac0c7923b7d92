//! Draw execution: winner selection and the dry-run/commit split

use tracing::{debug, info};
use uuid::Uuid;

use super::{resolve_pool, Clock, DrawError, RandomSource};
use crate::models::{DrawResult, DrawSettings, ListPatch, Participant, RaffleList};

/// Everything a caller needs to present and persist a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub result: DrawResult,
    /// Fair-mode state to store on the list. Always `None` for dry runs.
    pub list_patch: Option<ListPatch>,
    /// The fair-mode cycle was exhausted and restarted for this draw
    pub cycle_reset: bool,
    pub dry_run: bool,
}

/// Run a draw against a list snapshot
///
/// Winners keep generation order. A dry run computes the same result as a
/// committed draw but never carries a patch.
pub fn execute_draw<R, C>(
    list: &RaffleList,
    settings: &DrawSettings,
    dry_run: bool,
    rng: &mut R,
    clock: &C,
) -> Result<DrawOutcome, DrawError>
where
    R: RandomSource + ?Sized,
    C: Clock + ?Sized,
{
    if settings.quantity < 1 {
        return Err(DrawError::InvalidQuantity);
    }

    let resolution = resolve_pool(
        list,
        settings.quantity,
        settings.fair_mode,
        settings.with_replacement,
    )?;

    if settings.fair_mode && settings.with_replacement {
        return Err(DrawError::ConflictingSettings);
    }

    let quantity = settings.quantity as usize;
    if !settings.with_replacement && resolution.len() < quantity {
        return Err(DrawError::InsufficientNames {
            requested: settings.quantity,
            available: resolution.len(),
        });
    }

    let winners = if settings.with_replacement {
        pick_with_replacement(&resolution.pool, quantity, rng)
    } else {
        pick_without_replacement(resolution.pool, quantity, rng)
    };

    debug!(
        list_id = %list.id,
        winners = winners.len(),
        dry_run,
        "Draw completed"
    );

    let result = DrawResult {
        id: Uuid::new_v4(),
        list_id: list.id,
        drawn_names: winners,
        timestamp: clock.now(),
        settings: *settings,
    };

    let list_patch = if !dry_run && settings.tracks_cycle() {
        let mut drawn_names = if resolution.cycle_will_reset {
            info!(list_id = %list.id, "Fair-mode cycle restarted");
            Default::default()
        } else {
            list.drawn_names.clone()
        };
        drawn_names.extend(result.drawn_names.iter().map(|p| p.id));
        Some(ListPatch { drawn_names })
    } else {
        None
    };

    Ok(DrawOutcome {
        result,
        list_patch,
        cycle_reset: resolution.cycle_will_reset,
        dry_run,
    })
}

fn pick_without_replacement<R: RandomSource + ?Sized>(
    mut working: Vec<Participant>,
    quantity: usize,
    rng: &mut R,
) -> Vec<Participant> {
    let mut winners = Vec::with_capacity(quantity);
    while winners.len() < quantity && !working.is_empty() {
        let index = rng.next_index(working.len());
        winners.push(working.remove(index));
    }
    winners
}

fn pick_with_replacement<R: RandomSource + ?Sized>(
    pool: &[Participant],
    quantity: usize,
    rng: &mut R,
) -> Vec<Participant> {
    (0..quantity)
        .map(|_| pool[rng.next_index(pool.len())].clone())
        .collect()
}
