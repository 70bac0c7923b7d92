//! Raffle list storage operations

use std::collections::BTreeSet;

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{format_datetime, parse_datetime, parse_uuid, OptionalExt};
use crate::error::{Error, Result};
use crate::invariants::assert_list_invariants;
use crate::models::{Participant, RaffleList};

pub struct ListStore<'a> {
    conn: &'a Connection,
}

impl<'a> ListStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new list with its participants and drawn ids
    #[instrument(skip(self, list), fields(list_name = %list.name))]
    pub fn create(&self, list: &RaffleList) -> Result<()> {
        assert_list_invariants(list);
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO lists (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                list.id.to_string(),
                list.name,
                list.description,
                format_datetime(&list.created_at),
            ],
        )?;
        write_participants(&tx, list.id, &list.names)?;
        write_drawn(&tx, list.id, &list.drawn_names)?;
        tx.commit()?;
        Ok(())
    }

    /// Find a list by ID, fully loaded
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<RaffleList>> {
        let header = self
            .conn
            .query_row(
                "SELECT name, description, created_at FROM lists WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        parse_datetime(&row.get::<_, String>(2)?)?,
                    ))
                },
            )
            .optional()?;

        let Some((name, description, created_at)) = header else {
            return Ok(None);
        };

        Ok(Some(RaffleList {
            id,
            name,
            description,
            names: self.load_participants(id)?,
            drawn_names: self.load_drawn(id)?,
            created_at,
        }))
    }

    /// Load a list or fail with `NotFound`
    pub fn get(&self, id: Uuid) -> Result<RaffleList> {
        self.find_by_id(id)?
            .ok_or_else(|| Error::NotFound(format!("List {}", id)))
    }

    pub fn exists(&self, id: Uuid) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM lists WHERE id = ?1",
                params![id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All lists ordered by name
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<RaffleList>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM lists ORDER BY name, created_at")?;
        let ids = stmt
            .query_map([], |row| parse_uuid(&row.get::<_, String>(0)?))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut lists = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(list) = self.find_by_id(id)? {
                lists.push(list);
            }
        }
        Ok(lists)
    }

    /// Replace the stored list with this value
    #[instrument(skip(self, list), fields(list_id = %list.id))]
    pub fn update(&self, list: &RaffleList) -> Result<()> {
        assert_list_invariants(list);
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE lists SET name = ?1, description = ?2 WHERE id = ?3",
            params![list.name, list.description, list.id.to_string()],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("List {}", list.id)));
        }
        write_participants(&tx, list.id, &list.names)?;
        write_drawn(&tx, list.id, &list.drawn_names)?;
        tx.commit()?;
        Ok(())
    }

    /// Overwrite only the fair-mode state of a list
    ///
    /// Does not open its own transaction, so it can run inside
    /// [`Database::commit_draw`](super::Database::commit_draw).
    #[instrument(skip(self, drawn), fields(drawn = drawn.len()))]
    pub fn set_drawn(&self, list_id: Uuid, drawn: &BTreeSet<Uuid>) -> Result<()> {
        write_drawn(self.conn, list_id, drawn)
    }

    /// Delete a list; participants, cycle state, and history cascade
    #[instrument(skip(self))]
    pub fn delete(&self, list_id: Uuid) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM lists WHERE id = ?1",
            params![list_id.to_string()],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("List {}", list_id)));
        }
        Ok(())
    }

    fn load_participants(&self, list_id: Uuid) -> Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name FROM participants WHERE list_id = ?1 ORDER BY position",
        )?;
        let participants = stmt
            .query_map(params![list_id.to_string()], |row| {
                Ok(Participant {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(participants)
    }

    fn load_drawn(&self, list_id: Uuid) -> Result<BTreeSet<Uuid>> {
        let mut stmt = self
            .conn
            .prepare("SELECT participant_id FROM drawn_participants WHERE list_id = ?1")?;
        let drawn = stmt
            .query_map(params![list_id.to_string()], |row| {
                parse_uuid(&row.get::<_, String>(0)?)
            })?
            .collect::<std::result::Result<BTreeSet<_>, _>>()?;
        Ok(drawn)
    }
}

fn write_participants(conn: &Connection, list_id: Uuid, names: &[Participant]) -> Result<()> {
    conn.execute(
        "DELETE FROM participants WHERE list_id = ?1",
        params![list_id.to_string()],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO participants (id, list_id, name, position) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, participant) in names.iter().enumerate() {
        stmt.execute(params![
            participant.id.to_string(),
            list_id.to_string(),
            participant.name,
            position as i64,
        ])?;
    }
    Ok(())
}

fn write_drawn(conn: &Connection, list_id: Uuid, drawn: &BTreeSet<Uuid>) -> Result<()> {
    conn.execute(
        "DELETE FROM drawn_participants WHERE list_id = ?1",
        params![list_id.to_string()],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO drawn_participants (list_id, participant_id) VALUES (?1, ?2)",
    )?;
    for id in drawn {
        stmt.execute(params![list_id.to_string(), id.to_string()])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn make_list() -> RaffleList {
        RaffleList::new("Office")
            .with_description("Friday raffle")
            .import_names("Carol, Alice, Bob")
            .0
    }

    #[test]
    fn test_create_and_find() {
        let db = Database::open_in_memory().unwrap();
        let mut list = make_list();
        list.drawn_names.insert(list.names[1].id);

        db.lists().create(&list).unwrap();
        let loaded = db.lists().find_by_id(list.id).unwrap().unwrap();

        assert_eq!(loaded, list);
        // insertion order, not alphabetical
        assert_eq!(loaded.names[0].name, "Carol");
    }

    #[test]
    #[should_panic(expected = "empty name")]
    fn test_create_checks_list_invariants() {
        let db = Database::open_in_memory().unwrap();
        let mut list = make_list();
        list.names.push(Participant::new("  "));
        let _ = db.lists().create(&list);
    }

    #[test]
    fn test_find_missing() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.lists().find_by_id(Uuid::new_v4()).unwrap().is_none());
        assert!(matches!(
            db.lists().get(Uuid::new_v4()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_update_replaces_participants() {
        let db = Database::open_in_memory().unwrap();
        let list = make_list();
        db.lists().create(&list).unwrap();

        let removed = list.names[0].id;
        let mut updated = list.remove_name(removed).unwrap().add_name("Dave").unwrap();
        updated.name = "Office 2".into();
        updated.drawn_names.insert(removed);
        db.lists().update(&updated).unwrap();

        let loaded = db.lists().get(list.id).unwrap();
        assert_eq!(loaded.name, "Office 2");
        let names: Vec<_> = loaded.names.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Dave"]);
        // stale drawn id survives the round trip
        assert!(loaded.drawn_names.contains(&removed));
    }

    #[test]
    fn test_update_missing_list() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.lists().update(&make_list()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_all_sorted_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.lists().create(&RaffleList::new("Zoo")).unwrap();
        db.lists().create(&RaffleList::new("Art")).unwrap();

        let names: Vec<_> = db
            .lists()
            .list_all()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Art", "Zoo"]);
    }

    #[test]
    fn test_set_drawn() {
        let db = Database::open_in_memory().unwrap();
        let list = make_list();
        db.lists().create(&list).unwrap();

        let drawn: BTreeSet<_> = list.names.iter().take(2).map(|p| p.id).collect();
        db.lists().set_drawn(list.id, &drawn).unwrap();
        assert_eq!(db.lists().get(list.id).unwrap().drawn_names, drawn);

        db.lists().set_drawn(list.id, &BTreeSet::new()).unwrap();
        assert!(db.lists().get(list.id).unwrap().drawn_names.is_empty());
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let list = make_list();
        db.lists().create(&list).unwrap();

        db.lists().delete(list.id).unwrap();
        assert!(!db.lists().exists(list.id).unwrap());
        assert!(matches!(db.lists().delete(list.id), Err(Error::NotFound(_))));
    }
}
