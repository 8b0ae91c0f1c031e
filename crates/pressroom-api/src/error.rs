//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpIntakeError>`; errors
//! render consistently (status, body, logging) through `ErrorMetadata`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pressroom_core::{ErrorMetadata, IntakeError, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for IntakeError to implement IntoResponse.
/// Necessary because of Rust's orphan rules: we can't implement
/// IntoResponse (external trait) for IntakeError (type from pressroom-core).
#[derive(Debug)]
pub struct HttpIntakeError(pub IntakeError);

impl From<IntakeError> for HttpIntakeError {
    fn from(err: IntakeError) -> Self {
        HttpIntakeError(err)
    }
}

impl From<anyhow::Error> for HttpIntakeError {
    fn from(err: anyhow::Error) -> Self {
        HttpIntakeError(IntakeError::from(err))
    }
}

fn log_error(error: &IntakeError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpIntakeError {
    fn into_response(self) -> Response {
        let error = self.0;
        log_error(&error);

        let status =
            StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Internal detail stays out of production responses
        let details = if is_production_env() {
            None
        } else {
            Some(error.detailed_message())
        };

        let body = ErrorResponse {
            error: error.client_message(),
            details,
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}
