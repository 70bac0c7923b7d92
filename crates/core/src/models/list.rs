//! Raffle list model - the unit participants are drawn from

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ListPatch, Participant};
use crate::error::{Error, Result};

/// A named, ordered list of participants plus its fair-mode state
///
/// `drawn_names` may hold ids of participants that were removed after being
/// drawn. Those stale entries are harmless: pool resolution only looks at
/// ids that are still present in `names`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleList {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub names: Vec<Participant>,
    /// Ids already drawn in the current fair-mode cycle
    pub drawn_names: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl RaffleList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            names: Vec::new(),
            drawn_names: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a list whose name is not blank and not taken by `existing` (ignoring case)
    pub fn named(name: &str, existing: &[RaffleList]) -> Result<RaffleList> {
        let name = available_name(name, existing, None)?;
        Ok(RaffleList::new(name))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rename under the same rules as [`RaffleList::named`]. The list itself
    /// may appear in `existing` and keeping its own name is allowed.
    pub fn renamed(&self, name: &str, existing: &[RaffleList]) -> Result<RaffleList> {
        let name = available_name(name, existing, Some(self.id))?;
        let mut updated = self.clone();
        updated.name = name;
        Ok(updated)
    }

    /// Copy of this list named `"<name> (Copy)"`, or `"<name> (Copy N)"` when taken
    ///
    /// Participants get fresh ids and the copy starts a new fair-mode cycle.
    pub fn duplicate(&self, existing: &[RaffleList]) -> RaffleList {
        let taken = |candidate: &str| existing.iter().any(|l| same_name(&l.name, candidate));

        let mut name = format!("{} (Copy)", self.name);
        let mut counter = 1;
        while taken(&name) {
            counter += 1;
            name = format!("{} (Copy {})", self.name, counter);
        }

        RaffleList {
            id: Uuid::new_v4(),
            name,
            description: self.description.clone(),
            names: self
                .names
                .iter()
                .map(|p| Participant::new(p.name.clone()))
                .collect(),
            drawn_names: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.iter().any(|p| p.has_name(name))
    }

    pub fn find(&self, id: Uuid) -> Option<&Participant> {
        self.names.iter().find(|p| p.id == id)
    }

    /// Add a single participant, rejecting blanks and case-insensitive duplicates
    pub fn add_name(&self, name: &str) -> Result<RaffleList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidOperation("Name cannot be empty".into()));
        }
        if self.contains_name(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let mut updated = self.clone();
        updated.names.push(Participant::new(name));
        Ok(updated)
    }

    /// Bulk import from text separated by newlines or commas
    ///
    /// Returns the updated list and how many participants were added.
    /// Names already present (ignoring case) are skipped silently.
    pub fn import_names(&self, text: &str) -> (RaffleList, usize) {
        let mut updated = self.clone();
        let mut added = 0;

        for name in text.split(['\n', ',']).map(str::trim) {
            if name.is_empty() || updated.contains_name(name) {
                continue;
            }
            updated.names.push(Participant::new(name));
            added += 1;
        }

        (updated, added)
    }

    /// Remove a participant by id
    ///
    /// The id is left in `drawn_names` if it was there.
    pub fn remove_name(&self, id: Uuid) -> Result<RaffleList> {
        if self.find(id).is_none() {
            return Err(Error::NotFound(format!("Participant {}", id)));
        }

        let mut updated = self.clone();
        updated.names.retain(|p| p.id != id);
        Ok(updated)
    }

    /// Start a fresh fair-mode cycle
    pub fn reset_fair_mode(&self) -> RaffleList {
        let mut updated = self.clone();
        updated.drawn_names.clear();
        updated
    }

    /// Participants not yet drawn in the current cycle
    pub fn undrawn(&self) -> Vec<&Participant> {
        self.names
            .iter()
            .filter(|p| !self.drawn_names.contains(&p.id))
            .collect()
    }

    /// Case-insensitive substring search over display names
    pub fn search(&self, term: &str) -> Vec<&Participant> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.names.iter().collect();
        }
        self.names
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Produce the list with a committed draw's fair-mode state applied
    pub fn apply_patch(&self, patch: &ListPatch) -> RaffleList {
        let mut updated = self.clone();
        updated.drawn_names = patch.drawn_names.clone();
        updated
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn available_name(name: &str, existing: &[RaffleList], own_id: Option<Uuid>) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidOperation("List name cannot be empty".into()));
    }
    let clash = existing
        .iter()
        .filter(|l| Some(l.id) != own_id)
        .any(|l| same_name(&l.name, name));
    if clash {
        return Err(Error::DuplicateName(name.to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_list() -> RaffleList {
        let (list, _) = RaffleList::new("Office").import_names("Alice, Bob\nCarol");
        list
    }

    #[test]
    fn test_add_name() {
        let list = RaffleList::new("Office");
        let updated = list.add_name("  Alice ").unwrap();

        assert!(list.is_empty());
        assert_eq!(updated.names.len(), 1);
        assert_eq!(updated.names[0].name, "Alice");
    }

    #[test]
    fn test_add_duplicate_ignores_case() {
        let list = make_list();
        let err = list.add_name("ALICE").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn test_add_blank_name() {
        let list = make_list();
        assert!(matches!(
            list.add_name("   "),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_import_skips_existing_and_blanks() {
        let list = make_list();
        let (updated, added) = list.import_names("bob,, Dave\n\ndave\nEve,");

        assert_eq!(added, 2);
        let names: Vec<_> = updated.names.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave", "Eve"]);
    }

    #[test]
    fn test_import_nothing_new() {
        let list = make_list();
        let (updated, added) = list.import_names("alice, CAROL");
        assert_eq!(added, 0);
        assert_eq!(updated, list);
    }

    #[test]
    fn test_remove_keeps_stale_drawn_id() {
        let mut list = make_list();
        let alice = list.names[0].id;
        list.drawn_names.insert(alice);

        let updated = list.remove_name(alice).unwrap();
        assert_eq!(updated.names.len(), 2);
        assert!(updated.drawn_names.contains(&alice));
        assert_eq!(updated.undrawn().len(), 2);
    }

    #[test]
    fn test_remove_unknown() {
        let list = make_list();
        assert!(matches!(
            list.remove_name(Uuid::new_v4()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_reset_fair_mode() {
        let mut list = make_list();
        list.drawn_names.insert(list.names[1].id);

        let reset = list.reset_fair_mode();
        assert!(reset.drawn_names.is_empty());
        assert_eq!(list.drawn_names.len(), 1);
    }

    #[test]
    fn test_search() {
        let list = make_list();
        let found = list.search("AR");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Carol");
        assert_eq!(list.search("  ").len(), 3);
    }

    #[test]
    fn test_named_rejects_blank_and_taken() {
        let existing = vec![make_list()];
        assert!(matches!(
            RaffleList::named("  ", &existing),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            RaffleList::named("OFFICE", &existing),
            Err(Error::DuplicateName(_))
        ));

        let created = RaffleList::named("  Party ", &existing).unwrap();
        assert_eq!(created.name, "Party");
    }

    #[test]
    fn test_renamed() {
        let list = make_list();
        let other = RaffleList::new("Party");
        let existing = vec![list.clone(), other];

        assert_eq!(list.renamed("Lunch", &existing).unwrap().name, "Lunch");
        // changing only the case of its own name is fine
        assert_eq!(list.renamed("OFFICE", &existing).unwrap().name, "OFFICE");
        assert!(matches!(
            list.renamed("party", &existing),
            Err(Error::DuplicateName(_))
        ));
        assert!(matches!(
            list.renamed("", &existing),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_duplicate_gets_fresh_ids() {
        let mut list = make_list().with_description("Friday");
        list.drawn_names.insert(list.names[0].id);

        let copy = list.duplicate(&[list.clone()]);
        assert_eq!(copy.name, "Office (Copy)");
        assert_ne!(copy.id, list.id);
        assert_eq!(copy.description.as_deref(), Some("Friday"));
        assert!(copy.drawn_names.is_empty());

        let names: Vec<_> = copy.names.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert!(copy.names.iter().all(|p| list.find(p.id).is_none()));
    }

    #[test]
    fn test_duplicate_numbers_taken_copies() {
        let list = make_list();
        let existing = vec![
            list.clone(),
            RaffleList::new("office (copy)"),
            RaffleList::new("Office (Copy 2)"),
        ];
        assert_eq!(list.duplicate(&existing).name, "Office (Copy 3)");
    }

    #[test]
    fn test_apply_patch() {
        let list = make_list();
        let patch = ListPatch {
            drawn_names: [list.names[2].id].into_iter().collect(),
        };

        let updated = list.apply_patch(&patch);
        assert_eq!(updated.undrawn().len(), 2);
        assert!(list.drawn_names.is_empty());
    }
}
