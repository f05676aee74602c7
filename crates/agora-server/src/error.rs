//! HTTP error mapping for the JSON API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper turning [`agora_core::Error`] into an HTTP response.
///
/// Validation failures and missing entities pass their message through as
/// 400/404. Everything else is logged with its error code and replaced by a
/// fixed 500 body so internal detail never reaches the client.
pub struct ApiError(pub agora_core::Error);

impl From<agora_core::Error> for ApiError {
    fn from(err: agora_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use agora_core::Error;

        let (status, message) = match &self.0 {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::AgentNotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            err => {
                tracing::error!(code = err.code(), error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
