use crate::app::App;
use crate::db::connection::Database;
use crate::db::{BuilderDirectory, ListingStore, MemoryStore, SqliteStore};
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const FIXTURES: &str = "data/fixtures";

/// The bundled fixtures with no simulated latency and an empty in-memory
/// account store.
pub fn test_app() -> App {
    App::new(
        ListingStore::load(FIXTURES, Duration::ZERO).expect("fixtures should load"),
        Box::new(MemoryStore::new()),
        BuilderDirectory::load(Path::new(FIXTURES)).expect("builders should load"),
    )
}

/// Same listings, but accounts live in a fresh SQLite file.
pub fn sqlite_test_app() -> App {
    let path = std::env::temp_dir().join(format!(
        "landmatch_router_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let store = SqliteStore::open(Database::new(path.to_string_lossy()), "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    App::new(
        ListingStore::load(FIXTURES, Duration::ZERO).expect("fixtures should load"),
        Box::new(store),
        BuilderDirectory::load(Path::new(FIXTURES)).expect("builders should load"),
    )
}

/// Runs one request through the router, turning errors into responses the
/// way the server does.
pub fn send(app: &App, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();
    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    }
}

pub fn get(app: &App, uri: &str) -> Response {
    send(app, Method::GET, uri, None)
}

pub fn body_json(resp: &mut Response) -> serde_json::Value {
    let mut buf = Vec::new();
    resp.body_mut().reader().read_to_end(&mut buf).unwrap();
    serde_json::from_slice(&buf).unwrap()
}

pub fn ids(value: &serde_json::Value) -> Vec<i64> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v["Id"].as_i64().expect("record without Id"))
        .collect()
}
