use axum::{extract::State, Json};
use tracing::info;

use crate::{dto::*, AppState};

/// Always answers 200, whatever the backend state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.to_string(),
        wind_available: state.source.is_available(),
        wind_connected: state.source.is_connected(),
    })
}

pub async fn connect(State(state): State<AppState>) -> Json<ConnectResponse> {
    let success = state.source.connect().await;
    info!(success, backend = state.source.backend_name(), "Connect requested");

    Json(ConnectResponse {
        success,
        connected: state.source.is_connected(),
    })
}
