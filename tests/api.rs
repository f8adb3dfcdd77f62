use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

use third_place_atlas::config::Config;
use third_place_atlas::server::{app_router, AppState};

fn test_router(overlay_path: PathBuf) -> Router {
    let mut config = Config::default();
    config.data.overlay_path = overlay_path;
    app_router(AppState {
        config: Arc::new(config),
    })
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn get_places_returns_baseline() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (status, body) = get_json(&router, "/places").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["places"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bbox_equals_omitted_bbox() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (_, without) = get_json(&router, "/places").await;
    let (status, with_bad) = get_json(&router, "/places?bbox=abc,47.48,-122.22,47.73").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        with_bad["places"].as_array().unwrap().len(),
        without["places"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn bbox_and_filters_narrow_results() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (_, all) = get_json(&router, "/places").await;
    let (status, filtered) = get_json(
        &router,
        "/places?bbox=-122.459696,47.481002,-122.224433,47.734136&quiet&outlets",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let all_len = all["places"].as_array().unwrap().len();
    let filtered_places = filtered["places"].as_array().unwrap();
    assert!(filtered_places.len() < all_len);
    for place in filtered_places {
        assert!(place["quiet_level"].as_u64().unwrap() >= 2);
        assert!(place["outlets_density"].as_u64().unwrap() >= 2);
    }
}

#[tokio::test]
async fn post_missing_field_names_the_field() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (status, body) = post_json(
        &router,
        "/places",
        json!({
            "name": "Corner Cafe",
            "city": "Seattle",
            "category": "cafe",
            "lat": 47.6,
            "lng": -122.33
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing field: address");
}

#[tokio::test]
async fn post_then_get_round_trips() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (status, body) = post_json(
        &router,
        "/places",
        json!({
            "name": "Discovery Park Library",
            "address": "123 Magnolia Blvd",
            "city": "Seattle",
            "category": "library",
            "lat": 47.66,
            "lng": -122.41,
            "quiet_level": 3,
            "outlets_density": 2,
            "linger_ok": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["id"], "discovery-park-library");

    let (_, listed) = get_json(&router, "/places?quiet&outlets").await;
    assert!(listed["places"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == "discovery-park-library"));
}

#[tokio::test]
async fn resubmission_replaces_instead_of_duplicating() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let submission = json!({
        "name": "Corner Cafe",
        "address": "1 Main St",
        "city": "Seattle",
        "category": "cafe",
        "lat": 47.6,
        "lng": -122.33
    });

    post_json(&router, "/places", submission.clone()).await;
    let (_, after_first) = get_json(&router, "/places").await;

    post_json(&router, "/places", submission).await;
    let (_, after_second) = get_json(&router, "/places").await;

    assert_eq!(
        after_first["places"].as_array().unwrap().len(),
        after_second["places"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempdir().unwrap();
    let router = test_router(dir.path().join("user-places.json"));

    let (status, body) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
