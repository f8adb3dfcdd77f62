use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AtlasError, Result};
use crate::query::{BoundingBox, FacetFilters};
use crate::storage;
use crate::submission::PlaceSubmission;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "third-place-atlas",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /places: filter flags are presence-only query keys; `bbox` is
/// `W,S,E,N` and silently ignored when malformed.
async fn get_places(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let bbox = params.get("bbox").and_then(|raw| BoundingBox::parse(raw));
    let filters = FacetFilters::from_params(&params);

    let result = async {
        let store = storage::active_store(&state.config).await?;
        store.query(bbox.as_ref(), &filters).await
    }
    .await;

    match result {
        Ok(places) => Json(serde_json::json!({ "places": places })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /places: validates and normalizes the submission, then upserts
/// into whichever backend is active.
async fn submit_place(
    State(state): State<AppState>,
    Json(submission): Json<PlaceSubmission>,
) -> Response {
    let place = match submission.into_place() {
        Ok(place) => place,
        Err(e) => return error_response(&e),
    };

    let result = async {
        let store = storage::active_store(&state.config).await?;
        store.upsert(place).await
    }
    .await;

    match result {
        Ok(id) => Json(serde_json::json!({ "ok": true, "id": id })).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &AtlasError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/places", get(get_places).post(submit_place))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server.port;
    let state = AppState {
        config: Arc::new(config),
    };
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on http://0.0.0.0:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
