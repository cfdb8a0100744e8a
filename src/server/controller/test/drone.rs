use axum::http::StatusCode;
use serde_json::{json, Value};

use super::drone_server;

fn drone_payload(serial: &str) -> Value {
    json!({
        "serial": serial,
        "name": "Scout",
        "model": "Mavic 3",
        "manufacturer": "DJI"
    })
}

/// Tests registering a drone over HTTP.
///
/// Verifies the envelope carries the 201 status and the drone defaults to `inactive`.
///
/// Expected: 201 with the stored drone
#[tokio::test]
async fn create_drone_returns_envelope() {
    let (_test, server) = drone_server().await;

    let response = server.post("/api/drones").json(&drone_payload("SN-1")).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["serial"], "SN-1");
    assert_eq!(body["data"]["status"], "inactive");
}

/// Tests a duplicate serial.
///
/// Expected: 409 with `data: null`
#[tokio::test]
async fn create_drone_conflict() {
    let (_test, server) = drone_server().await;

    server
        .post("/api/drones")
        .json(&drone_payload("SN-DUP"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post("/api/drones").json(&drone_payload("SN-DUP")).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["status"], 409);
    assert!(body["data"].is_null());
}

/// Tests a body that does not deserialize.
///
/// Expected: 400 in the error envelope rather than axum's plain-text rejection
#[tokio::test]
async fn malformed_body_is_enveloped() {
    let (_test, server) = drone_server().await;

    let response = server
        .post("/api/drones")
        .json(&json!({ "serial": "SN-1" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}

/// Tests list pagination metadata.
///
/// Expected: page 2 of size 2 over 3 drones holds one item, has no next page
#[tokio::test]
async fn list_drones_paginates() {
    let (_test, server) = drone_server().await;

    for serial in ["SN-A", "SN-B", "SN-C"] {
        server
            .post("/api/drones")
            .json(&drone_payload(serial))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/drones")
        .add_query_param("page", 2)
        .add_query_param("pageSize", 2)
        .add_query_param("sortBy", "serial")
        .add_query_param("sortOrder", "ASC")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let page = &body["data"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], false);
    assert_eq!(page["has_prev"], true);
    assert_eq!(page["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["data"][0]["serial"], "SN-C");
}

/// Tests out-of-range and unknown pagination parameters.
///
/// Expected: 400 for each
#[tokio::test]
async fn list_drones_rejects_bad_pagination() {
    let (_test, server) = drone_server().await;

    server
        .get("/api/drones")
        .add_query_param("pageSize", 101)
        .await
        .assert_status_bad_request();
    server
        .get("/api/drones")
        .add_query_param("page", 0)
        .await
        .assert_status_bad_request();
    server
        .get("/api/drones")
        .add_query_param("sortBy", "password")
        .await
        .assert_status_bad_request();
}

/// Tests a page number whose offset overflows.
///
/// Expected: 400 naming the `page` field instead of a failed request
#[tokio::test]
async fn list_drones_rejects_overflowing_page() {
    let (_test, server) = drone_server().await;

    let response = server
        .get("/api/drones")
        .add_query_param("page", u64::MAX)
        .add_query_param("pageSize", 20)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().starts_with("page:"));
}

/// Tests the status whitelist through the status endpoint.
///
/// Verifies an allowed change is recorded in the status archive and a disallowed one is
/// rejected.
///
/// Expected: inactive -> active 200 with one archive row, active -> inactive -> flying 400
#[tokio::test]
async fn update_status_enforces_transitions() {
    let (_test, server) = drone_server().await;

    let created: Value = server
        .post("/api/drones")
        .json(&drone_payload("SN-ST"))
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/drones/{}/status", id))
        .json(&json!({ "status": "active", "reason": "ready" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "active");

    let history: Value = server
        .get(&format!("/api/drone-status-archive/drone/{}", id))
        .await
        .json();
    let rows = history["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["previous_status"], "inactive");
    assert_eq!(rows[0]["status"], "active");

    server
        .put(&format!("/api/drones/{}/status", id))
        .json(&json!({ "status": "inactive" }))
        .await
        .assert_status_ok();

    server
        .put(&format!("/api/drones/{}/status", id))
        .json(&json!({ "status": "flying" }))
        .await
        .assert_status_bad_request();
}

/// Tests lookups of a drone that does not exist.
///
/// Expected: 404
#[tokio::test]
async fn missing_drone_is_not_found() {
    let (_test, server) = drone_server().await;

    server.get("/api/drones/999").await.assert_status_not_found();
    server
        .get("/api/drones/serial/NOPE")
        .await
        .assert_status_not_found();
    server.delete("/api/drones/999").await.assert_status_not_found();
}

/// Tests deleting a drone.
///
/// Expected: 200 with the deleted id, then 404 on lookup
#[tokio::test]
async fn delete_drone_returns_id() {
    let (_test, server) = drone_server().await;

    let created: Value = server
        .post("/api/drones")
        .json(&drone_payload("SN-DEL"))
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = server.delete(&format!("/api/drones/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], id);

    server
        .get(&format!("/api/drones/{}", id))
        .await
        .assert_status_not_found();
}
