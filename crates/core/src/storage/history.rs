//! Draw history storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{format_datetime, parse_datetime, parse_uuid};
use crate::error::Result;
use crate::models::{DrawResult, DrawSettings, Participant};

const SELECT_RESULT: &str = "SELECT id, list_id, winners_json, drawn_at, quantity,
        with_replacement, fair_mode, animation_effects
     FROM draw_results";

pub struct HistoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a committed result
    #[instrument(skip(self, result), fields(result_id = %result.id, list_id = %result.list_id))]
    pub fn append(&self, result: &DrawResult) -> Result<()> {
        let winners_json = serde_json::to_string(&result.drawn_names)?;
        self.conn.execute(
            "INSERT INTO draw_results
             (id, list_id, winners_json, drawn_at, quantity,
              with_replacement, fair_mode, animation_effects)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                result.id.to_string(),
                result.list_id.to_string(),
                winners_json,
                format_datetime(&result.timestamp),
                result.settings.quantity,
                result.settings.with_replacement as i32,
                result.settings.fair_mode as i32,
                result.settings.animation_effects as i32,
            ],
        )?;
        Ok(())
    }

    /// Results for one list, newest first
    #[instrument(skip(self))]
    pub fn list_for_list(&self, list_id: Uuid) -> Result<Vec<DrawResult>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE list_id = ?1 ORDER BY drawn_at DESC",
            SELECT_RESULT
        ))?;
        let rows = stmt
            .query_map(params![list_id.to_string()], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredResult::into_result).collect()
    }

    /// Every stored result, newest first
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<DrawResult>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY drawn_at DESC", SELECT_RESULT))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredResult::into_result).collect()
    }

    /// Remove a list's history, returning how many results were deleted
    #[instrument(skip(self))]
    pub fn clear_for_list(&self, list_id: Uuid) -> Result<u64> {
        let deleted = self.conn.execute(
            "DELETE FROM draw_results WHERE list_id = ?1",
            params![list_id.to_string()],
        )?;
        Ok(deleted as u64)
    }
}

/// Row as read from SQLite, before the winners JSON is decoded
struct StoredResult {
    id: Uuid,
    list_id: Uuid,
    winners_json: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    settings: DrawSettings,
}

impl StoredResult {
    fn into_result(self) -> Result<DrawResult> {
        let drawn_names: Vec<Participant> = serde_json::from_str(&self.winners_json)?;
        Ok(DrawResult {
            id: self.id,
            list_id: self.list_id,
            drawn_names,
            timestamp: self.timestamp,
            settings: self.settings,
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<StoredResult> {
    Ok(StoredResult {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        list_id: parse_uuid(&row.get::<_, String>(1)?)?,
        winners_json: row.get(2)?,
        timestamp: parse_datetime(&row.get::<_, String>(3)?)?,
        settings: DrawSettings {
            quantity: row.get(4)?,
            with_replacement: row.get::<_, i32>(5)? != 0,
            fair_mode: row.get::<_, i32>(6)? != 0,
            animation_effects: row.get::<_, i32>(7)? != 0,
        },
    })
}
