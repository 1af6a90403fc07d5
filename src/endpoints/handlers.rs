use crate::endpoints::map::INDEX_HTML;
use crate::traits::CycleProvider;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::json;
use std::sync::Arc;

pub struct AppState {
    pub provider: Arc<dyn CycleProvider>,
}

pub async fn webmap_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `GET /api/forecast_cycle`: the current cycle's start time and step count.
/// Any provider failure (missing or broken `current` symlink, unreadable
/// tree) is a plain 500 with a detail string; the frontend treats it the same
/// as a network failure and retries on its next visibility event.
pub async fn forecast_cycle_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.provider.current_cycle().await {
        Ok(cycle) => (StatusCode::OK, Json(json!(cycle))).into_response(),
        Err(e) => {
            eprintln!("⚠️ Forecast cycle lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}
