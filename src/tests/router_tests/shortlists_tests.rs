use crate::app::App;
use crate::tests::utils::{body_json, get, send, sqlite_test_app, test_app};
use http::Method;
use serde_json::json;

fn shortlist_flow(app: &App) {
    let mut created = send(
        app,
        Method::POST,
        "/api/shortlists",
        Some(json!({ "name": "Coromandel", "items": [{ "type": "land", "Id": 3 }] })),
    );
    assert_eq!(created.status(), 201);
    let created = body_json(&mut created);
    let id = created["Id"].as_i64().unwrap();
    let uri = format!("/api/shortlists/{id}");

    let add = json!({ "type": "concept", "id": 4 });
    let mut once = send(app, Method::POST, &format!("{uri}/items"), Some(add.clone()));
    assert_eq!(once.status(), 200);
    let once = body_json(&mut once);
    let mut twice = send(app, Method::POST, &format!("{uri}/items"), Some(add));
    let twice = body_json(&mut twice);
    assert_eq!(once["items"], twice["items"]);
    assert_eq!(once["items"].as_array().unwrap().len(), 2);

    let mut removed = send(app, Method::DELETE, &format!("{uri}/items/land/3"), None);
    assert_eq!(removed.status(), 200);
    assert_eq!(
        body_json(&mut removed)["items"],
        json!([{ "type": "concept", "Id": 4 }])
    );

    let mut renamed = send(
        app,
        Method::PATCH,
        &uri,
        Some(json!({ "name": "Coromandel baches" })),
    );
    assert_eq!(body_json(&mut renamed)["name"], "Coromandel baches");

    assert_eq!(send(app, Method::DELETE, &uri, None).status(), 204);
    assert_eq!(get(app, &uri).status(), 404);
}

#[test]
fn shortlist_lifecycle_in_memory() {
    shortlist_flow(&test_app());
}

#[test]
fn shortlist_lifecycle_in_sqlite() {
    shortlist_flow(&sqlite_test_app());
}

#[test]
fn blank_name_is_rejected() {
    let app = test_app();
    let mut resp = send(
        &app,
        Method::POST,
        "/api/shortlists",
        Some(json!({ "name": "   " })),
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(&mut resp)["error"], "name must not be empty");
}

#[test]
fn adding_to_missing_shortlist_is_not_found() {
    let app = test_app();
    let resp = send(
        &app,
        Method::POST,
        "/api/shortlists/42/items",
        Some(json!({ "type": "land", "Id": 1 })),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn bad_item_type_is_bad_request() {
    let app = test_app();
    let resp = send(&app, Method::DELETE, "/api/shortlists/1/items/barn/1", None);
    assert_eq!(resp.status(), 400);
}
