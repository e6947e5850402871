use serde::{Deserialize, Serialize};

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub wind_available: bool,
    pub wind_connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectResponse {
    pub success: bool,
    pub connected: bool,
}
