/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An in-memory store behind the real router
/// - Request helpers that return status and parsed JSON body

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hunt_api::app::{build_router, AppState};
use hunt_api::config::Config;
use hunt_shared::db::InMemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: InMemoryStore,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let config = Config::default();

        let state = AppState::new(Arc::new(store.clone()), config.clone());
        let app = build_router(state);

        TestContext { store, app, config }
    }

    /// Sends a request without a body
    pub async fn request(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Sends a JSON request
    pub async fn request_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Sends a request with a raw body
    pub async fn request_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("Expected JSON body, got: {}", String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }

    /// Creates a hunt through the API and returns its id
    pub async fn create_hunt(&self, body: Value) -> String {
        let (status, json) = self.request_json("POST", "/api/hunts", body).await;
        assert_eq!(status, StatusCode::CREATED, "create hunt failed: {}", json);
        json["id"].as_str().unwrap().to_string()
    }

    /// Creates a task through the API and returns its id
    pub async fn create_task(&self, body: Value) -> String {
        let (status, json) = self.request_json("POST", "/api/tasks", body).await;
        assert_eq!(status, StatusCode::CREATED, "create task failed: {}", json);
        json["id"].as_str().unwrap().to_string()
    }
}
