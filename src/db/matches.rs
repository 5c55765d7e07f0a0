// src/db/matches.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::repository::MatchRepository;
use crate::db::sqlite_store::SqliteStore;
use crate::domain::account::{Match, MatchUpdate, NewMatch};
use crate::errors::ServerError;

const MATCH_COLUMNS: &str =
    "id, land_listing_id, concept_plan_id, compatibility_score, notes, created_at, updated_at";

fn row_to_match(row: &Row<'_>) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        land_listing_id: row.get(1)?,
        concept_plan_id: row.get(2)?,
        compatibility_score: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn list_matches(conn: &Connection) -> Result<Vec<Match>, ServerError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY id DESC"))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_match)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn find_match(conn: &Connection, id: i64) -> Result<Match, ServerError> {
    conn.query_row(
        &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?"),
        params![id],
        row_to_match,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("failed to load match: {e}")))?
    .ok_or_else(|| ServerError::not_found("Match"))
}

pub fn insert_match(
    conn: &Connection,
    new: &NewMatch,
    score: u8,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO matches (land_listing_id, concept_plan_id, compatibility_score, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![new.land_listing_id, new.concept_plan_id, score, new.notes, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert match failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// `notes` of `None` only touches `updated_at`; `Some(None)` clears the notes.
pub fn update_match_notes(
    conn: &Connection,
    id: i64,
    notes: Option<Option<&str>>,
    now: DateTime<Utc>,
) -> Result<(), ServerError> {
    let changed = match notes {
        Some(notes) => conn.execute(
            "UPDATE matches SET notes = ?1, updated_at = ?2 WHERE id = ?3",
            params![notes, now, id],
        ),
        None => conn.execute(
            "UPDATE matches SET updated_at = ?1 WHERE id = ?2",
            params![now, id],
        ),
    }
    .map_err(|e| ServerError::DbError(format!("update match failed: {e}")))?;
    if changed == 0 {
        return Err(ServerError::not_found("Match"));
    }
    Ok(())
}

pub fn delete_match(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let changed = conn
        .execute("DELETE FROM matches WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete match failed: {e}")))?;
    if changed == 0 {
        return Err(ServerError::not_found("Match"));
    }
    Ok(())
}

impl MatchRepository for SqliteStore {
    fn list_matches(&self) -> Result<Vec<Match>, ServerError> {
        self.db().with_conn(|conn| list_matches(conn))
    }

    fn get_match(&self, id: i64) -> Result<Match, ServerError> {
        self.db().with_conn(|conn| find_match(conn, id))
    }

    fn create_match(&self, new: NewMatch, score: u8) -> Result<Match, ServerError> {
        self.db().with_conn(|conn| {
            let id = insert_match(conn, &new, score, Utc::now())?;
            find_match(conn, id)
        })
    }

    fn update_match(&self, id: i64, update: MatchUpdate) -> Result<Match, ServerError> {
        self.db().with_conn(|conn| {
            update_match_notes(
                conn,
                id,
                update.notes.as_ref().map(Option::as_deref),
                Utc::now(),
            )?;
            find_match(conn, id)
        })
    }

    fn delete_match(&self, id: i64) -> Result<(), ServerError> {
        self.db().with_conn(|conn| delete_match(conn, id))
    }
}
