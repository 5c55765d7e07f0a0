use crate::tests::utils::{body_json, get, ids, send, test_app};
use http::Method;

#[test]
fn health_is_ok() {
    let app = test_app();
    let mut resp = get(&app, "/health");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&mut resp)["status"], "ok");
}

#[test]
fn collections_are_served_separately() {
    let app = test_app();
    let mut land = get(&app, "/api/land");
    assert_eq!(land.status(), 200);
    assert_eq!(ids(&body_json(&mut land)), vec![1, 2, 3, 4, 5, 6]);

    let mut concepts = get(&app, "/api/concepts");
    assert_eq!(body_json(&mut concepts).as_array().unwrap().len(), 5);

    let mut showcase = get(&app, "/api/showcase");
    assert_eq!(body_json(&mut showcase).as_array().unwrap().len(), 4);
}

#[test]
fn json_content_type_is_set() {
    let app = test_app();
    let resp = get(&app, "/api/land");
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );
}

#[test]
fn unfiltered_search_returns_every_record_tagged() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties");
    let body = body_json(&mut resp);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 15);
    assert!(records
        .iter()
        .all(|r| matches!(r["type"].as_str(), Some("land" | "concept" | "showcase"))));
}

#[test]
fn search_filters_and_sorts() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties?type=land&region=waikato&sort=price-high");
    assert_eq!(resp.status(), 200);
    assert_eq!(ids(&body_json(&mut resp)), vec![2, 1]);
}

#[test]
fn region_slug_matches_display_name() {
    let app = test_app();
    let mut slug = get(&app, "/api/properties?region=bay-of-plenty");
    let mut named = get(&app, "/api/properties?region=Bay%20of%20Plenty");
    let slug = body_json(&mut slug);
    assert!(!slug.as_array().unwrap().is_empty());
    assert_eq!(slug, body_json(&mut named));
}

#[test]
fn search_text_matches_showcase_story() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties?search=seismic");
    let body = body_json(&mut resp);
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body[0]["type"], "showcase");
}

#[test]
fn malformed_numbers_do_not_filter() {
    let app = test_app();
    let mut all = get(&app, "/api/properties?type=concept");
    let mut bogus = get(&app, "/api/properties?type=concept&bedrooms=lots");
    assert_eq!(ids(&body_json(&mut all)), ids(&body_json(&mut bogus)));
}

#[test]
fn unknown_sort_is_bad_request() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties?sort=cheapest");
    assert_eq!(resp.status(), 400);
    assert!(body_json(&mut resp)["error"]
        .as_str()
        .unwrap()
        .contains("cheapest"));
}

#[test]
fn property_by_id_prefers_land() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties/4");
    assert_eq!(resp.status(), 200);
    let body = body_json(&mut resp);
    assert_eq!(body["type"], "land");
    assert_eq!(body["location"], "Queenstown");
}

#[test]
fn property_by_kind_and_id() {
    let app = test_app();
    let mut resp = get(&app, "/api/properties/showcase/4");
    let body = body_json(&mut resp);
    assert_eq!(body["type"], "showcase");
    assert_eq!(body["title"], "Warehouse fit-out");

    assert_eq!(get(&app, "/api/properties/concept/99").status(), 404);
    assert_eq!(get(&app, "/api/properties/house/1").status(), 400);
    assert_eq!(get(&app, "/api/properties/abc").status(), 400);
}

#[test]
fn reload_reports_installed() {
    let app = test_app();
    let mut resp = send(&app, Method::POST, "/api/admin/reload", None);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&mut resp)["reloaded"], true);
}

#[test]
fn unknown_route_is_json_404() {
    let app = test_app();
    let mut resp = get(&app, "/api/nothing-here");
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(&mut resp)["error"], "Route not found");
}
