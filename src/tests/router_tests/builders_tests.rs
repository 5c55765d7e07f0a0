use crate::tests::utils::{body_json, get, ids, send, test_app};
use http::Method;
use serde_json::json;

#[test]
fn builders_list_and_region_filter() {
    let app = test_app();
    let mut all = get(&app, "/api/builders");
    assert_eq!(ids(&body_json(&mut all)), vec![1, 2, 3, 4, 5]);

    let mut otago = get(&app, "/api/builders?region=otago");
    assert_eq!(ids(&body_json(&mut otago)), vec![3]);

    let mut bay = get(&app, "/api/builders?region=Bay%20of%20Plenty");
    assert_eq!(ids(&body_json(&mut bay)), vec![2]);
}

#[test]
fn builder_by_id() {
    let app = test_app();
    let mut resp = get(&app, "/api/builders/4");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&mut resp)["name"], "Harbour City Builders");
    assert_eq!(get(&app, "/api/builders/40").status(), 404);
}

#[test]
fn enquiry_is_acknowledged() {
    let app = test_app();
    let mut resp = send(
        &app,
        Method::POST,
        "/api/enquiries",
        Some(json!({
            "name": "Tama",
            "email": "Tama@Example.nz",
            "budget": 700000,
            "message": "Keen on the Family Haven plan",
            "conceptPlanId": 2
        })),
    );
    assert_eq!(resp.status(), 201);
    let body = body_json(&mut resp);
    assert_eq!(body["success"], true);
    assert!(body["enquiryId"].as_u64().unwrap() < 10_000);
}

#[test]
fn enquiry_with_bad_email_is_rejected() {
    let app = test_app();
    let resp = send(
        &app,
        Method::POST,
        "/api/enquiries",
        Some(json!({ "name": "Tama", "email": "not-an-email" })),
    );
    assert_eq!(resp.status(), 400);
}
