use serde::{Deserialize, Serialize};
use wind_gateway_core::{IndicatorTree, SecurityMatch};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
    /// Accepted for compatibility; results are not filtered on it.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub error_code: i64,
    pub data: Vec<SecurityMatch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsResponse {
    pub error_code: i64,
    pub data: IndicatorTree,
}
