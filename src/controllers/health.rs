use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::repositories::EspeakTtsRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// The networked backend is not probed; conversions still work without the
/// offline engine, so readiness never fails on it.
pub async fn health_ready(State(offline_engine): State<Arc<EspeakTtsRepository>>) -> impl IntoResponse {
    let offline_tts = if offline_engine.is_available().await {
        "available"
    } else {
        "unavailable"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "offline_tts": offline_tts,
            "networked_tts": "configured"
        })),
    )
}
