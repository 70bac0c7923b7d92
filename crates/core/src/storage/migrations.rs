//! Database migration system
//!
//! Tracks schema versions and applies migrations in order.

use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info, instrument};

use super::parse::format_datetime;
use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Raffle lists
            CREATE TABLE IF NOT EXISTS lists (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            );

            -- Participants, ordered within their list
            CREATE TABLE IF NOT EXISTS participants (
                id TEXT PRIMARY KEY,
                list_id TEXT NOT NULL,
                name TEXT NOT NULL,
                position INTEGER NOT NULL,
                FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
            );

            -- Fair-mode cycle state. No foreign key to participants:
            -- ids of removed participants may linger here.
            CREATE TABLE IF NOT EXISTS drawn_participants (
                list_id TEXT NOT NULL,
                participant_id TEXT NOT NULL,
                PRIMARY KEY (list_id, participant_id),
                FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
            );

            -- Committed draw results
            CREATE TABLE IF NOT EXISTS draw_results (
                id TEXT PRIMARY KEY,
                list_id TEXT NOT NULL,
                winners_json TEXT NOT NULL,
                drawn_at TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                with_replacement INTEGER NOT NULL DEFAULT 0,
                fair_mode INTEGER NOT NULL DEFAULT 0,
                animation_effects INTEGER NOT NULL DEFAULT 1,
                FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for query performance",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_participants_list ON participants(list_id, position);
            CREATE INDEX IF NOT EXISTS idx_draw_results_list ON draw_results(list_id, drawn_at);
            CREATE INDEX IF NOT EXISTS idx_lists_name ON lists(name);
        "#,
    },
];

fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;
    Ok(())
}

/// Highest applied version, 0 on a fresh database
pub(crate) fn current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Apply every migration newer than the stored version
///
/// Each migration runs in its own transaction together with its
/// bookkeeping row, so a failed step leaves the previous version intact.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    ensure_migrations_table(conn)?;

    let from = current_version(conn)?;
    let pending: Vec<_> = MIGRATIONS.iter().filter(|m| m.version > from).collect();
    if pending.is_empty() {
        debug!(version = from, "Schema up to date");
        return Ok(());
    }

    for migration in pending {
        info!(
            version = migration.version,
            description = migration.description,
            "Applying migration"
        );

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                migration.version,
                migration.description,
                format_datetime(&Utc::now())
            ],
        )?;
        tx.commit()?;
    }

    info!(from, to = current_version(conn)?, "Database schema updated");
    Ok(())
}
