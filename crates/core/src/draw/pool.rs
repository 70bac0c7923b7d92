//! Pool resolution: which participants are eligible for the next draw

use tracing::debug;

use super::DrawError;
use crate::models::{Participant, RaffleList};

/// Eligible candidates for a draw, plus whether the fair-mode cycle restarts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolResolution {
    pub pool: Vec<Participant>,
    pub cycle_will_reset: bool,
}

impl PoolResolution {
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// Compute the candidate pool without touching any state
///
/// With fair mode on and no replacement, only undrawn participants are
/// eligible. When fewer undrawn participants remain than `quantity`, the
/// whole list becomes the pool again and `cycle_will_reset` is set; the
/// partial remainder is never drawn first. Fair mode combined with
/// replacement falls back to the full list here.
pub fn resolve_pool(
    list: &RaffleList,
    quantity: u32,
    fair_mode: bool,
    with_replacement: bool,
) -> Result<PoolResolution, DrawError> {
    if list.names.is_empty() {
        return Err(DrawError::EmptyList);
    }

    if !fair_mode || with_replacement {
        return Ok(PoolResolution {
            pool: list.names.clone(),
            cycle_will_reset: false,
        });
    }

    let undrawn = list.undrawn();
    if undrawn.len() < quantity as usize {
        debug!(
            list_id = %list.id,
            undrawn = undrawn.len(),
            quantity,
            "Fair-mode cycle exhausted"
        );
        return Ok(PoolResolution {
            pool: list.names.clone(),
            cycle_will_reset: true,
        });
    }

    Ok(PoolResolution {
        pool: undrawn.into_iter().cloned().collect(),
        cycle_will_reset: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_list() -> RaffleList {
        RaffleList::new("Team").import_names("Alice, Bob, Carol").0
    }

    #[test]
    fn test_empty_list() {
        let list = RaffleList::new("Empty");
        assert_eq!(
            resolve_pool(&list, 1, true, false),
            Err(DrawError::EmptyList)
        );
    }

    #[test]
    fn test_plain_draw_uses_full_list() {
        let mut list = make_list();
        list.drawn_names.insert(list.names[0].id);

        let resolved = resolve_pool(&list, 2, false, false).unwrap();
        assert_eq!(resolved.pool, list.names);
        assert!(!resolved.cycle_will_reset);
    }

    #[test]
    fn test_fair_mode_with_replacement_uses_full_list() {
        let mut list = make_list();
        list.drawn_names.insert(list.names[0].id);

        let resolved = resolve_pool(&list, 1, true, true).unwrap();
        assert_eq!(resolved.len(), 3);
        assert!(!resolved.cycle_will_reset);
    }

    #[test]
    fn test_fair_mode_filters_drawn() {
        let mut list = make_list();
        let bob = list.names[1].id;
        list.drawn_names.insert(bob);

        let resolved = resolve_pool(&list, 2, true, false).unwrap();
        assert!(!resolved.cycle_will_reset);
        assert_eq!(resolved.len(), 2);
        assert!(resolved.pool.iter().all(|p| p.id != bob));
        // list order is preserved
        assert_eq!(resolved.pool[0].name, "Alice");
        assert_eq!(resolved.pool[1].name, "Carol");
    }

    #[test]
    fn test_fair_mode_reset_when_remainder_too_small() {
        let mut list = make_list();
        list.drawn_names.insert(list.names[0].id);
        list.drawn_names.insert(list.names[1].id);

        let resolved = resolve_pool(&list, 2, true, false).unwrap();
        assert!(resolved.cycle_will_reset);
        assert_eq!(resolved.pool, list.names);
    }

    #[test]
    fn test_stale_drawn_ids_ignored() {
        let mut list = make_list();
        list.drawn_names.insert(uuid::Uuid::new_v4());
        list.drawn_names.insert(uuid::Uuid::new_v4());

        let resolved = resolve_pool(&list, 3, true, false).unwrap();
        assert!(!resolved.cycle_will_reset);
        assert_eq!(resolved.len(), 3);
    }
}
