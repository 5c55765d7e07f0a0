// src/db/sqlite_store.rs
//
// The repository impls live next to their SQL in matches.rs, shortlists.rs
// and saved_searches.rs.

use crate::db::connection::{init_db, Database};
use crate::errors::ServerError;

/// Account collections persisted in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens `db` and applies the schema at `schema_path`.
    pub fn open(db: Database, schema_path: &str) -> Result<Self, ServerError> {
        init_db(&db, schema_path)?;
        Ok(Self { db })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
