//! HTTP surface of the Wind gateway.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /health` | [`handlers::status::health`] |
//! | `POST /api/connect` | [`handlers::status::connect`] |
//! | `POST /api/data` | [`handlers::market::data`] |
//! | `POST /api/realtime` | [`handlers::market::realtime`] |
//! | `POST /api/sector` | [`handlers::market::sector`] |
//! | `POST /api/search` | [`handlers::reference::search`] |
//! | `GET /api/indicators` | [`handlers::reference::indicators`] |

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;

pub use dto::*;
pub use error::{ApiError, ApiResult};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};
use wind_gateway_core::DataSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DataSource>,
}

impl AppState {
    pub fn new(source: Arc<DataSource>) -> Self {
        Self { source }
    }
}

pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/connect", post(handlers::status::connect))
        .route("/data", post(handlers::market::data))
        .route("/realtime", post(handlers::market::realtime))
        .route("/sector", post(handlers::market::sector))
        .route("/search", post(handlers::reference::search))
        .route("/indicators", get(handlers::reference::indicators));

    Router::new()
        .route("/health", get(handlers::status::health))
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(cors)
        .with_state(state)
}
