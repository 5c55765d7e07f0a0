use crate::tests::utils::{body_json, get, ids, send, sqlite_test_app, test_app};
use crate::app::App;
use http::Method;
use serde_json::json;

fn saved_search_flow(app: &App) {
    let mut created = send(
        app,
        Method::POST,
        "/api/saved-searches",
        Some(json!({
            "name": "Affordable Waikato land",
            "criteria": { "type": "land", "region": "Waikato", "maxPrice": 600000 }
        })),
    );
    assert_eq!(created.status(), 201);
    let created = body_json(&mut created);
    assert_eq!(created["alertsEnabled"], true);
    assert_eq!(created["queryString"], "type=land&region=Waikato&maxPrice=600000");
    let id = created["Id"].as_i64().unwrap();

    let mut fetched = get(app, &format!("/api/saved-searches/{id}"));
    assert_eq!(
        body_json(&mut fetched)["queryString"],
        "type=land&region=Waikato&maxPrice=600000"
    );

    let mut results = get(app, &format!("/api/saved-searches/{id}/results"));
    assert_eq!(results.status(), 200);
    assert_eq!(ids(&body_json(&mut results)), vec![1]);

    let mut muted = send(
        app,
        Method::PATCH,
        &format!("/api/saved-searches/{id}"),
        Some(json!({ "alertsEnabled": false })),
    );
    let muted = body_json(&mut muted);
    assert_eq!(muted["alertsEnabled"], false);
    assert_eq!(muted["criteria"]["region"], "Waikato");

    let mut widened = send(
        app,
        Method::PATCH,
        &format!("/api/saved-searches/{id}"),
        Some(json!({ "criteria": { "type": "land", "region": "Waikato" } })),
    );
    assert_eq!(widened.status(), 200);
    assert_eq!(body_json(&mut widened)["queryString"], "type=land&region=Waikato");

    let mut results = get(
        app,
        &format!("/api/saved-searches/{id}/results?sort=price-high"),
    );
    assert_eq!(ids(&body_json(&mut results)), vec![2, 1]);

    assert_eq!(
        send(app, Method::DELETE, &format!("/api/saved-searches/{id}"), None).status(),
        204
    );
    assert_eq!(
        get(app, &format!("/api/saved-searches/{id}/results")).status(),
        404
    );
}

#[test]
fn saved_search_lifecycle_in_memory() {
    saved_search_flow(&test_app());
}

#[test]
fn saved_search_lifecycle_in_sqlite() {
    saved_search_flow(&sqlite_test_app());
}

#[test]
fn list_starts_empty() {
    let app = test_app();
    let mut resp = get(&app, "/api/saved-searches");
    assert_eq!(body_json(&mut resp), json!([]));
}
