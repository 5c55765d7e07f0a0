// src/db/saved_searches.rs
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::repository::SavedSearchRepository;
use crate::db::sqlite_store::SqliteStore;
use crate::domain::account::{require_name, NewSavedSearch, SavedSearch, SavedSearchUpdate};
use crate::domain::criteria::SearchCriteria;
use crate::errors::ServerError;

const SEARCH_COLUMNS: &str = "id, name, criteria, alerts_enabled, created_at, updated_at";

/// Criteria are kept as a JSON column; decoding happens after the row is read
/// so a bad blob surfaces as a `DbError` with a useful message.
struct RawSavedSearch {
    search: SavedSearch,
    criteria_json: String,
}

fn row_to_raw(row: &Row<'_>) -> rusqlite::Result<RawSavedSearch> {
    Ok(RawSavedSearch {
        search: SavedSearch {
            id: row.get(0)?,
            name: row.get(1)?,
            criteria: SearchCriteria::default(),
            alerts_enabled: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        },
        criteria_json: row.get(2)?,
    })
}

fn decode(raw: RawSavedSearch) -> Result<SavedSearch, ServerError> {
    let criteria = serde_json::from_str(&raw.criteria_json)
        .map_err(|e| ServerError::DbError(format!("bad saved criteria: {e}")))?;
    Ok(SavedSearch {
        criteria,
        ..raw.search
    })
}

fn encode(criteria: &SearchCriteria) -> Result<String, ServerError> {
    serde_json::to_string(criteria).map_err(|e| ServerError::DbError(e.to_string()))
}

pub fn list_saved_searches(conn: &Connection) -> Result<Vec<SavedSearch>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SEARCH_COLUMNS} FROM saved_searches ORDER BY id DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_raw)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(decode(r.map_err(|e| ServerError::DbError(e.to_string()))?)?);
    }
    Ok(out)
}

pub fn find_saved_search(conn: &Connection, id: i64) -> Result<SavedSearch, ServerError> {
    let raw = conn
        .query_row(
            &format!("SELECT {SEARCH_COLUMNS} FROM saved_searches WHERE id = ?"),
            params![id],
            row_to_raw,
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("failed to load saved search: {e}")))?
        .ok_or_else(|| ServerError::not_found("Saved search"))?;
    decode(raw)
}

impl SavedSearchRepository for SqliteStore {
    fn list_saved_searches(&self) -> Result<Vec<SavedSearch>, ServerError> {
        self.db().with_conn(|conn| list_saved_searches(conn))
    }

    fn get_saved_search(&self, id: i64) -> Result<SavedSearch, ServerError> {
        self.db().with_conn(|conn| find_saved_search(conn, id))
    }

    fn create_saved_search(&self, new: NewSavedSearch) -> Result<SavedSearch, ServerError> {
        let name = require_name(&new.name)?;
        let criteria = encode(&new.criteria)?;
        self.db().with_conn(|conn| {
            conn.execute(
                "INSERT INTO saved_searches (name, criteria, alerts_enabled, created_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?3)",
                params![name, criteria, Utc::now()],
            )
            .map_err(|e| ServerError::DbError(format!("insert saved search failed: {e}")))?;
            find_saved_search(conn, conn.last_insert_rowid())
        })
    }

    fn update_saved_search(
        &self,
        id: i64,
        update: SavedSearchUpdate,
    ) -> Result<SavedSearch, ServerError> {
        let name = update.name.as_deref().map(require_name).transpose()?;
        let criteria = update.criteria.as_ref().map(encode).transpose()?;
        self.db().with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE saved_searches
                     SET name = COALESCE(?1, name),
                         criteria = COALESCE(?2, criteria),
                         alerts_enabled = COALESCE(?3, alerts_enabled),
                         updated_at = ?4
                     WHERE id = ?5",
                    params![name, criteria, update.alerts_enabled, Utc::now(), id],
                )
                .map_err(|e| ServerError::DbError(format!("update saved search failed: {e}")))?;
            if changed == 0 {
                return Err(ServerError::not_found("Saved search"));
            }
            find_saved_search(conn, id)
        })
    }

    fn delete_saved_search(&self, id: i64) -> Result<(), ServerError> {
        self.db().with_conn(|conn| {
            let changed = conn
                .execute("DELETE FROM saved_searches WHERE id = ?", params![id])
                .map_err(|e| ServerError::DbError(format!("delete saved search failed: {e}")))?;
            if changed == 0 {
                return Err(ServerError::not_found("Saved search"));
            }
            Ok(())
        })
    }
}
