use axum::{extract::State, Json};
use crate::models::HealthResponse;
use crate::AppState;

pub async fn health_handler(
    State(state): State<AppState>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_configured: state.config.gemini_api_key.is_some(),
    })
}
