// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use sortify::config::Config;
use sortify::db::SortifyDb;
use sortify::routes::create_router;
use sortify::services::GeminiClassifier;
use sortify::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with an in-memory store and an offline classifier.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = SortifyDb::new_in_memory();
    let classifier = GeminiClassifier::new_mock();

    let state = Arc::new(AppState {
        config,
        db,
        classifier,
    });

    (create_router(state.clone()), state)
}

/// POST a JSON body and return the response.
#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// GET a URI and return the response.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sign up a user through the API, returning their profile JSON.
#[allow(dead_code)]
pub async fn signup(app: &Router, username: &str) -> serde_json::Value {
    let response = post_json(app, "/auth/signup", serde_json::json!({ "username": username })).await;
    assert!(
        response.status().is_success(),
        "signup failed: {}",
        response.status()
    );
    body_json(response).await
}

/// A classification payload as the classifier boundary would produce it.
#[allow(dead_code)]
pub fn classification(confidence: f64) -> serde_json::Value {
    serde_json::json!({
        "detected_item": "plastic bottle",
        "bin_category": "recycle",
        "confidence": confidence,
        "explanation": "PET plastic is recyclable",
        "disposal_tips": ["Rinse before recycling"]
    })
}
