use axum::body::{to_bytes, Body};
use axum::http::Request;
use hyper::Method;
use tower::ServiceExt;

use crate::helpers::{spawn_app, MockWeatherStore};

#[tokio::test]
async fn health_reports_healthy() {
    let test_app = spawn_app(MockWeatherStore::new());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn root_reports_service_identity() {
    let test_app = spawn_app(MockWeatherStore::new());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "agweather-api");
    assert_eq!(json["docs"], "/docs");
    assert!(json["version"].is_string());
}
