//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": "<message>"}`.  Only an
//! empty voice text is a client error; everything else is a 500 carrying
//! the underlying message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::tts::TtsError;

/// Application-level error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `/generate-voice` called without text.
    #[error("No text")]
    NoText,

    /// The request body is not the JSON the endpoint expects.
    #[error("{0}")]
    BadBody(String),

    /// Chat upstream failure, including the missing credential.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Speech upstream failure.
    #[error(transparent)]
    Tts(#[from] TtsError),

    #[error("{0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoText => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            log::error!("Server error: {message}");
        } else {
            log::info!("Rejected request: {message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
