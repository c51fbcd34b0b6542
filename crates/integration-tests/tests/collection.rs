//! Integration tests for the owner-scoped collection endpoints.
//!
//! These tests require the server running (cargo run -p waifu-tracker-server).
//! Each test uses fresh owner ids, so they can run against a shared database.

#![allow(clippy::indexing_slicing)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("WAIFU_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn new_owner() -> String {
    format!("it-{}", Uuid::new_v4())
}

async fn add(client: &Client, owner: &str, body: &Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}/add", base_url()))
        .header("x-user-id", owner)
        .json(body)
        .send()
        .await
        .expect("Failed to call /add");
    let status = resp.status();
    (status, resp.json().await.expect("Invalid JSON from /add"))
}

async fn get_json(client: &Client, path: &str, owner: &str) -> (StatusCode, Value) {
    let resp = client
        .get(format!("{}{path}", base_url()))
        .header("x-user-id", owner)
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    (status, resp.json().await.expect("Invalid JSON response"))
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health_endpoints() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to call /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to call /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Add & Dashboard
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_add_then_dashboard() {
    let client = Client::new();
    let owner = new_owner();

    let (status, body) = add(
        &client,
        &owner,
        &json!({"name": "Sinon", "about": "Birthday: August 21"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Saved Sinon! (Birthday: 8/21) 🎉");

    let (_, body) = add(&client, &owner, &json!({"name": "Mystery"})).await;
    assert_eq!(body["message"], "Saved Mystery! (Date set to Unknown)");

    let (status, dashboard) = get_json(&client, "/dashboard", &owner).await;
    assert_eq!(status, StatusCode::OK);
    let entries = dashboard.as_array().expect("dashboard is an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Sinon");
    assert_eq!(entries[1]["days_until"], 999);
    assert_eq!(entries[1]["status"], "Unknown Date");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_duplicate_add() {
    let client = Client::new();
    let owner = new_owner();
    let body = json!({"name": "Llenn", "manual_month": 5, "manual_day": 20});

    add(&client, &owner, &body).await;
    let (status, second) = add(&client, &owner, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Llenn is already in your list!");

    let (_, listed) = get_json(&client, "/waifus", &owner).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_missing_owner_is_unauthorized() {
    let resp = Client::new()
        .get(format!("{}/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to call /dashboard");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_delete_is_owner_scoped() {
    let client = Client::new();
    let (owner, stranger) = (new_owner(), new_owner());

    add(&client, &owner, &json!({"name": "Pito"})).await;
    let (_, listed) = get_json(&client, "/waifus", &owner).await;
    let id = listed[0]["id"].as_i64().expect("record id");

    let resp = client
        .delete(format!("{}/delete/{id}", base_url()))
        .header("x-user-id", &stranger)
        .send()
        .await
        .expect("Failed to call /delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/delete/{id}", base_url()))
        .header("x-user-id", &owner)
        .send()
        .await
        .expect("Failed to call /delete");
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, listed) = get_json(&client, "/waifus", &owner).await;
    assert_eq!(listed, json!([]));
}
