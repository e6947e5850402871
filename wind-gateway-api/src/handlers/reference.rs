use axum::Json;
use tracing::info;
use wind_gateway_core::{indicator_tree, search_securities, SUCCESS_CODE};

use crate::{dto::*, error::ApiResult, extract::ApiJson};

pub async fn search(ApiJson(payload): ApiJson<SearchRequest>) -> ApiResult<Json<SearchResponse>> {
    info!(keyword = %payload.keyword, kind = ?payload.kind, "Security search");

    Ok(Json(SearchResponse {
        error_code: SUCCESS_CODE,
        data: search_securities(&payload.keyword),
    }))
}

pub async fn indicators() -> Json<IndicatorsResponse> {
    Json(IndicatorsResponse {
        error_code: SUCCESS_CODE,
        data: indicator_tree(),
    })
}
