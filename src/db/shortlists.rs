// src/db/shortlists.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::ShortlistRepository;
use crate::db::sqlite_store::SqliteStore;
use crate::domain::account::{require_name, NewShortlist, Shortlist, ShortlistUpdate};
use crate::domain::listing::{ListingKind, ListingRef};
use crate::errors::ServerError;

fn load_items(conn: &Connection, shortlist_id: i64) -> Result<Vec<ListingRef>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT kind, listing_id FROM shortlist_items WHERE shortlist_id = ? ORDER BY position",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![shortlist_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut items = Vec::new();
    for r in rows {
        let (kind, id) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        let kind: ListingKind = kind
            .parse()
            .map_err(|e: String| ServerError::DbError(format!("bad shortlist item: {e}")))?;
        items.push(ListingRef::new(kind, id));
    }
    Ok(items)
}

pub fn find_shortlist(conn: &Connection, id: i64) -> Result<Shortlist, ServerError> {
    let head = conn
        .query_row(
            "SELECT id, name, description, created_at, updated_at FROM shortlists WHERE id = ?",
            params![id],
            |row| {
                Ok(Shortlist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    items: Vec::new(),
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("failed to load shortlist: {e}")))?
        .ok_or_else(|| ServerError::not_found("Shortlist"))?;

    Ok(Shortlist {
        items: load_items(conn, id)?,
        ..head
    })
}

pub fn list_shortlists(conn: &Connection) -> Result<Vec<Shortlist>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT id FROM shortlists ORDER BY id DESC")
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let ids = stmt
        .query_map([], |row| row.get::<_, i64>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    ids.into_iter().map(|id| find_shortlist(conn, id)).collect()
}

/// Appends `item` unless it is already on the list. Returns whether it was added.
fn insert_item(conn: &Connection, shortlist_id: i64, item: ListingRef) -> Result<bool, ServerError> {
    let added = conn
        .execute(
            "INSERT OR IGNORE INTO shortlist_items (shortlist_id, kind, listing_id, position)
             VALUES (?1, ?2, ?3,
                     (SELECT COALESCE(MAX(position), 0) + 1 FROM shortlist_items WHERE shortlist_id = ?1))",
            params![shortlist_id, item.kind.as_str(), item.id],
        )
        .map_err(|e| ServerError::DbError(format!("add shortlist item failed: {e}")))?;
    Ok(added > 0)
}

fn touch(conn: &Connection, id: i64, now: DateTime<Utc>) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE shortlists SET updated_at = ? WHERE id = ?",
        params![now, id],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

impl ShortlistRepository for SqliteStore {
    fn list_shortlists(&self) -> Result<Vec<Shortlist>, ServerError> {
        self.db().with_conn(|conn| list_shortlists(conn))
    }

    fn get_shortlist(&self, id: i64) -> Result<Shortlist, ServerError> {
        self.db().with_conn(|conn| find_shortlist(conn, id))
    }

    fn create_shortlist(&self, new: NewShortlist) -> Result<Shortlist, ServerError> {
        let name = require_name(&new.name)?;
        self.db().with_conn(|conn| {
            let now = Utc::now();
            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            tx.execute(
                "INSERT INTO shortlists (name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![name, new.description, now],
            )
            .map_err(|e| ServerError::DbError(format!("insert shortlist failed: {e}")))?;
            let id = tx.last_insert_rowid();
            for item in &new.items {
                insert_item(&tx, id, *item)?;
            }
            tx.commit()
                .map_err(|e| ServerError::DbError(e.to_string()))?;
            find_shortlist(conn, id)
        })
    }

    fn update_shortlist(&self, id: i64, update: ShortlistUpdate) -> Result<Shortlist, ServerError> {
        let name = update.name.as_deref().map(require_name).transpose()?;
        self.db().with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE shortlists
                     SET name = COALESCE(?1, name),
                         description = COALESCE(?2, description),
                         updated_at = ?3
                     WHERE id = ?4",
                    params![name, update.description, Utc::now(), id],
                )
                .map_err(|e| ServerError::DbError(format!("update shortlist failed: {e}")))?;
            if changed == 0 {
                return Err(ServerError::not_found("Shortlist"));
            }
            find_shortlist(conn, id)
        })
    }

    fn delete_shortlist(&self, id: i64) -> Result<(), ServerError> {
        self.db().with_conn(|conn| {
            let changed = conn
                .execute("DELETE FROM shortlists WHERE id = ?", params![id])
                .map_err(|e| ServerError::DbError(format!("delete shortlist failed: {e}")))?;
            if changed == 0 {
                return Err(ServerError::not_found("Shortlist"));
            }
            Ok(())
        })
    }

    fn add_item_to_shortlist(&self, id: i64, item: ListingRef) -> Result<Shortlist, ServerError> {
        self.db().with_conn(|conn| {
            // 404 before touching items.
            find_shortlist(conn, id)?;
            if insert_item(conn, id, item)? {
                touch(conn, id, Utc::now())?;
            }
            find_shortlist(conn, id)
        })
    }

    fn remove_item_from_shortlist(
        &self,
        id: i64,
        item: ListingRef,
    ) -> Result<Shortlist, ServerError> {
        self.db().with_conn(|conn| {
            find_shortlist(conn, id)?;
            conn.execute(
                "DELETE FROM shortlist_items WHERE shortlist_id = ? AND kind = ? AND listing_id = ?",
                params![id, item.kind.as_str(), item.id],
            )
            .map_err(|e| ServerError::DbError(format!("remove shortlist item failed: {e}")))?;
            touch(conn, id, Utc::now())?;
            find_shortlist(conn, id)
        })
    }
}
