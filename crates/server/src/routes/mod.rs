//! HTTP route handlers for the tracker API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health          - Health check
//! GET    /health/ready    - Readiness (record store reachable)
//!
//! # Search
//! GET    /search/{name}   - Ranked character candidates (max 10)
//!
//! # Collection (requires x-user-id)
//! POST   /add             - Add a waifu
//! GET    /dashboard       - Birthday countdowns, soonest first
//! GET    /waifus          - Stored records
//! GET    /reminders       - Birthdays today or tomorrow
//! DELETE /delete/{id}     - Remove a waifu
//! ```

pub mod health;
pub mod search;
pub mod waifus;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(waifus::add))
        .route("/dashboard", get(waifus::dashboard))
        .route("/waifus", get(waifus::list))
        .route("/reminders", get(waifus::reminders))
        .route("/delete/{id}", delete(waifus::delete))
}

/// Create all routes for the tracker.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/search/{name}", get(search::search))
        .merge(collection_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::db::{InMemoryWaifuStore, WaifuStore};
    use crate::middleware::OWNER_HEADER;
    use crate::search::tests::{FakeLookup, character};
    use crate::state::AppState;

    fn test_app(lookup: FakeLookup) -> axum::Router {
        let state = AppState::new(
            WaifuStore::Memory(InMemoryWaifuStore::new()),
            Arc::new(lookup),
        );
        crate::app(state)
    }

    async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn add_request(owner: &str, body: &Value) -> Request<Body> {
        Request::post("/add")
            .header(OWNER_HEADER, owner)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, owner: &str) -> Request<Body> {
        Request::get(uri)
            .header(OWNER_HEADER, owner)
            .body(Body::empty())
            .unwrap()
    }

    fn delete_request(id: i64, owner: &str) -> Request<Body> {
        Request::delete(format!("/delete/{id}"))
            .header(OWNER_HEADER, owner)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(FakeLookup::new());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        let app = test_app(FakeLookup::new());
        let (status, _) = send(
            &app,
            Request::get("/health/ready").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_returns_ranked_candidates() {
        let mut sinon = character(36828, "Shino Asada");
        sinon.nicknames = vec!["Sinon".into(), "Hecate".into(), "Ghost".into(), "Fourth".into()];
        let lookup = FakeLookup::new().page(
            "Shino Asada",
            1,
            vec![character(1, "Kazuto Kirigaya"), sinon],
        );
        let app = test_app(lookup);

        let (status, body) = send(
            &app,
            Request::get("/search/Shino%20Asada").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["mal_id"], 36828);
        assert_eq!(results[0]["score"], 100);
        assert_eq!(results[0]["nicknames"], "Sinon, Hecate, Ghost");
        assert_eq!(results[0]["about"], "");
    }

    #[tokio::test]
    async fn test_search_blank_name_is_bad_request() {
        let app = test_app(FakeLookup::new());
        let (status, body) = send(
            &app,
            Request::get("/search/%20%20").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_add_requires_owner() {
        let app = test_app(FakeLookup::new());
        let request = Request::post("/add")
            .header("content-type", "application/json")
            .body(Body::from(json!({"name": "Sinon"}).to_string()))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["detail"].is_string());

        let (_, listed) = send(&app, get_request("/waifus", "GGO-4821")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_dashboard_requires_owner() {
        let app = test_app(FakeLookup::new());
        let (status, _) = send(
            &app,
            Request::get("/dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_twice_reports_duplicate() {
        let app = test_app(FakeLookup::new());
        let body = json!({"name": "Sinon", "about": "Birthday: August 21"});

        let (status, first) = send(&app, add_request("GGO-4821", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], "Saved Sinon! (Birthday: 8/21) 🎉");

        let (status, second) = send(&app, add_request("GGO-4821", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["message"], "Sinon is already in your list!");

        let (_, listed) = send(&app, get_request("/waifus", "GGO-4821")).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_manual_birthday_override() {
        let app = test_app(FakeLookup::new());
        let body = json!({
            "name": "Llenn",
            "about": "Birthday: August 21",
            "manual_month": 5,
            "manual_day": 20
        });
        let (_, response) = send(&app, add_request("GGO-4821", &body)).await;
        assert_eq!(response["message"], "Saved Llenn! (Birthday: 5/20) 🎉");
    }

    #[tokio::test]
    async fn test_add_manual_birthday_out_of_range() {
        let app = test_app(FakeLookup::new());
        let body = json!({"name": "Llenn", "manual_month": 13, "manual_day": 1});
        let (status, _) = send(&app, add_request("GGO-4821", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_sorted_with_unknown_last() {
        let app = test_app(FakeLookup::new());
        send(&app, add_request("GGO-4821", &json!({"name": "Mystery"}))).await;
        send(
            &app,
            add_request("GGO-4821", &json!({"name": "Sinon", "manual_month": 8, "manual_day": 21})),
        )
        .await;

        let (status, body) = send(&app, get_request("/dashboard", "GGO-4821")).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "Sinon");
        assert_eq!(entries[1]["name"], "Mystery");
        assert_eq!(entries[1]["days_until"], 999);
        assert_eq!(entries[1]["status"], "Unknown Date");
    }

    #[tokio::test]
    async fn test_delete_other_owners_record_is_not_found() {
        let app = test_app(FakeLookup::new());
        send(&app, add_request("owner-a", &json!({"name": "Sinon"}))).await;
        let (_, listed) = send(&app, get_request("/waifus", "owner-a")).await;
        let id = listed[0]["id"].as_i64().unwrap();

        let (status, body) = send(&app, delete_request(id, "owner-b")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Waifu not found (or you don't own it)");

        let (_, listed) = send(&app, get_request("/waifus", "owner-a")).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, delete_request(id, "owner-a")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Deleted successfully");

        let (_, listed) = send(&app, get_request("/waifus", "owner-a")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_reminders_empty_without_close_birthdays() {
        let app = test_app(FakeLookup::new());
        send(&app, add_request("GGO-4821", &json!({"name": "Mystery"}))).await;
        let (status, body) = send(&app, get_request("/reminders", "GGO-4821")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
