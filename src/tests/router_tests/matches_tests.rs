use crate::tests::utils::{body_json, get, ids, send, sqlite_test_app, test_app};
use crate::app::App;
use http::Method;
use serde_json::json;

fn create(app: &App, land: i64, concept: i64) -> serde_json::Value {
    let mut resp = send(
        app,
        Method::POST,
        "/api/matches",
        Some(json!({ "landListingId": land, "conceptPlanId": concept, "notes": "first look" })),
    );
    assert_eq!(resp.status(), 201);
    body_json(&mut resp)
}

fn match_flow(app: &App) {
    let created = create(app, 5, 2);
    let score = created["compatibilityScore"].as_u64().unwrap();
    assert!((70..=100).contains(&score));
    assert_eq!(created["Id"], 1);

    let second = create(app, 1, 1);
    assert_eq!(second["Id"], 2);

    let mut list = get(app, "/api/matches");
    assert_eq!(ids(&body_json(&mut list)), vec![2, 1]);

    let mut patched = send(
        app,
        Method::PATCH,
        "/api/matches/1",
        Some(json!({ "notes": "talk to the council", "compatibilityScore": 1 })),
    );
    assert_eq!(patched.status(), 200);
    let patched = body_json(&mut patched);
    assert_eq!(patched["notes"], "talk to the council");
    assert_eq!(patched["compatibilityScore"].as_u64().unwrap(), score);

    let mut kept = send(app, Method::PATCH, "/api/matches/1", Some(json!({})));
    assert_eq!(body_json(&mut kept)["notes"], "talk to the council");

    let mut cleared = send(app, Method::PATCH, "/api/matches/1", Some(json!({ "notes": null })));
    assert_eq!(cleared.status(), 200);
    assert!(body_json(&mut cleared)["notes"].is_null());
    let mut fetched = get(app, "/api/matches/1");
    assert!(body_json(&mut fetched)["notes"].is_null());

    assert_eq!(send(app, Method::DELETE, "/api/matches/1", None).status(), 204);
    assert_eq!(get(app, "/api/matches/1").status(), 404);
}

#[test]
fn match_lifecycle_in_memory() {
    match_flow(&test_app());
}

#[test]
fn match_lifecycle_in_sqlite() {
    match_flow(&sqlite_test_app());
}

#[test]
fn unknown_land_is_not_found() {
    let app = test_app();
    let resp = send(
        &app,
        Method::POST,
        "/api/matches",
        Some(json!({ "landListingId": 99, "conceptPlanId": 1 })),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn malformed_body_is_bad_request() {
    let app = test_app();
    let resp = send(
        &app,
        Method::POST,
        "/api/matches",
        Some(json!({ "landListingId": "one" })),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn score_preview_is_bounded() {
    let app = test_app();
    let mut resp = get(&app, "/api/matches/score?landId=1&conceptId=1");
    assert_eq!(resp.status(), 200);
    let body = body_json(&mut resp);
    let score = body["compatibilityScore"].as_u64().unwrap();
    assert!((70..=100).contains(&score));
    assert_eq!(body["landListingId"], 1);

    assert_eq!(get(&app, "/api/matches/score?landId=1").status(), 400);
}
