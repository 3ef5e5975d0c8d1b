//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use campus_site::config::SiteConfig;
use campus_site::pages::SiteRenderer;
use campus_site::server;
use campus_site::store::MemoryStore;

/// Build the application router over an in-memory store
pub fn build_test_app(store: MemoryStore) -> Router {
    build_test_app_with(SiteConfig::default(), store)
}

pub fn build_test_app_with(config: SiteConfig, store: MemoryStore) -> Router {
    let renderer = SiteRenderer::new(config, Arc::new(store)).unwrap();
    server::router(Arc::new(renderer), Path::new("tests/no-static-dir"))
}

/// A store holding a little of every collection
pub fn sample_store() -> MemoryStore {
    MemoryStore::new()
        .with_collection(
            "courses",
            vec![
                json!({"_id": "1", "courseName": "MBA", "programType": "PG"}),
                json!({"_id": "2", "courseName": "BBA", "programType": "UG"}),
            ],
        )
        .with_collection(
            "testimonials",
            vec![json!({"_id": "t1", "name": "Priya Sharma", "testimonialText": "Life changing."})],
        )
        .with_collection(
            "galleryphotos",
            vec![json!({"_id": "g1", "title": "Library at Dusk", "category": "Campus"})],
        )
        .with_collection(
            "eventsandannouncements",
            vec![
                json!({"_id": "e1", "title": "Orientation Week", "date": "2024-01-08"}),
                json!({"_id": "e2", "title": "Convocation", "date": {"$date": "2024-06-01T09:00:00Z"}}),
                json!({"_id": "e3", "title": "Alumni Meet"}),
            ],
        )
        .with_collection(
            "facilities",
            vec![json!({"_id": "f1", "facilityName": "Central Library", "capacity": 400.0})],
        )
}

/// Send a GET request to the app
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a form POST to the app
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

