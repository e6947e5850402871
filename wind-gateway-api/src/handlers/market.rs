use axum::{extract::State, Json};
use tracing::info;
use wind_gateway_core::{normalize, NormalizedResponse, RawResult};

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    AppState,
};

/// Reconnects when needed. Data calls are never sent to a backend that
/// could not be connected.
async fn require_connection(state: &AppState) -> ApiResult<()> {
    if state.source.ensure_connected().await {
        Ok(())
    } else {
        Err(ApiError::NotConnected)
    }
}

fn respond(endpoint: &'static str, raw: RawResult) -> Json<NormalizedResponse> {
    let normalized = normalize(raw);
    info!(endpoint, error_code = ?normalized.error_code(), "Backend responded");
    Json(normalized)
}

pub async fn data(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DataRequest>,
) -> ApiResult<Json<NormalizedResponse>> {
    info!(
        codes = %payload.codes,
        fields = ?payload.fields,
        start = ?payload.start_date,
        end = ?payload.end_date,
        "Data request"
    );
    let query = payload.into_query()?;
    require_connection(&state).await?;

    let raw = state.source.fetch(&query).await;

    Ok(respond("data", raw))
}

pub async fn realtime(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RealtimeRequest>,
) -> ApiResult<Json<NormalizedResponse>> {
    require_connection(&state).await?;

    let query = payload.into_query();
    info!(codes = ?query.codes, fields = ?query.fields, "Realtime request");
    let raw = state.source.realtime(&query).await;

    Ok(respond("realtime", raw))
}

pub async fn sector(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SectorRequest>,
) -> ApiResult<Json<NormalizedResponse>> {
    require_connection(&state).await?;

    let query = payload.into_query();
    info!(sector = ?query.codes, fields = ?query.fields, "Sector request");
    let raw = state.source.fetch(&query).await;

    Ok(respond("sector", raw))
}
