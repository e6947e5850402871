use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use wind_gateway_core::{CoreError, INTERNAL_FAILURE_CODE};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Internal(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Data source is not connected")]
    NotConnected,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConnected => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", message);
        }

        let body = json!({
            "errorCode": INTERNAL_FAILURE_CODE,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the same error envelope as any other failure.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}

pub type ApiResult<T> = Result<T, ApiError>;
