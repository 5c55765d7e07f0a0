// src/app.rs

use crate::config::{Config, StoreKind};
use crate::db::connection::Database;
use crate::db::{AccountStore, BuilderDirectory, ListingStore, MemoryStore, SqliteStore};
use crate::errors::ServerError;

/// Everything a request handler can reach. Shared by reference across the
/// astra worker threads.
pub struct App {
    pub listings: ListingStore,
    pub accounts: Box<dyn AccountStore>,
    pub builders: BuilderDirectory,
}

impl App {
    pub fn new(
        listings: ListingStore,
        accounts: Box<dyn AccountStore>,
        builders: BuilderDirectory,
    ) -> Self {
        Self {
            listings,
            accounts,
            builders,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ServerError> {
        let accounts: Box<dyn AccountStore> = match cfg.store {
            StoreKind::Memory => Box::new(MemoryStore::seeded(&cfg.fixtures_dir)?),
            StoreKind::Sqlite => Box::new(SqliteStore::open(
                Database::new(cfg.db_path.clone()),
                &cfg.schema_path,
            )?),
        };
        let listings = ListingStore::load(cfg.fixtures_dir.clone(), cfg.latency)?;
        let builders = BuilderDirectory::load(&cfg.fixtures_dir)?;
        Ok(Self::new(listings, accounts, builders))
    }
}
