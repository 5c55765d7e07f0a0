// src/config.rs
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ServerError;

/// Which account store backs matches, shortlists and saved searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => Err(ServerError::Config(format!(
                "LANDMATCH_STORE must be memory or sqlite, got '{other}'"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub fixtures_dir: PathBuf,
    pub latency: Duration,
    pub store: StoreKind,
    pub db_path: String,
    pub schema_path: String,
    pub workers: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            bind: parse("LANDMATCH_BIND", &var("LANDMATCH_BIND", "127.0.0.1:3000"))?,
            fixtures_dir: PathBuf::from(var("LANDMATCH_FIXTURES", "data/fixtures")),
            latency: Duration::from_millis(parse(
                "LANDMATCH_LATENCY_MS",
                &var("LANDMATCH_LATENCY_MS", "300"),
            )?),
            store: var("LANDMATCH_STORE", "memory").parse()?,
            db_path: var("LANDMATCH_DB_PATH", "landmatch.sqlite3"),
            schema_path: var("LANDMATCH_SCHEMA", "sql/schema.sql"),
            workers: parse("LANDMATCH_WORKERS", &var("LANDMATCH_WORKERS", "8"))?,
        })
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ServerError> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::Config(format!("{key} has an invalid value '{raw}'")))
}
