//! SQLite storage layer for Sorteador
//!
//! The single writer for lists and history. Draws are computed by the
//! engine and committed here.

mod history;
mod lists;
mod migrations;
mod parse;

use std::path::Path;

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::draw::DrawOutcome;
use crate::error::{Error, Result};

pub use history::HistoryStore;
pub use lists::ListStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        migrations::current_version(&self.conn).unwrap_or(0)
    }

    pub fn lists(&self) -> ListStore<'_> {
        ListStore::new(&self.conn)
    }

    pub fn history(&self) -> HistoryStore<'_> {
        HistoryStore::new(&self.conn)
    }

    /// Persist a committed draw
    ///
    /// Applies the fair-mode patch and appends the result in one
    /// transaction, so the next draw against the list sees both or neither.
    #[instrument(skip(self, outcome), fields(list_id = %outcome.result.list_id))]
    pub fn commit_draw(&mut self, outcome: &DrawOutcome) -> Result<()> {
        if outcome.dry_run {
            return Err(Error::InvalidOperation(
                "Dry-run draws cannot be committed".into(),
            ));
        }

        let list_id = outcome.result.list_id;
        let tx = self.conn.transaction()?;
        {
            let lists = ListStore::new(&tx);
            if !lists.exists(list_id)? {
                return Err(Error::NotFound(format!("List {}", list_id)));
            }
            if let Some(patch) = &outcome.list_patch {
                lists.set_drawn(list_id, &patch.drawn_names)?;
            }
            HistoryStore::new(&tx).append(&outcome.result)?;
        }
        tx.commit()?;

        info!(
            result_id = %outcome.result.id,
            winners = outcome.result.drawn_names.len(),
            cycle_reset = outcome.cycle_reset,
            "Draw committed"
        );
        Ok(())
    }
}
