//! Error types module
//!
//! All pipeline errors are unified under the `IntakeError` enum. Only the
//! `Validation` and `Persistence` variants ever abort a submission; the
//! archive, extraction, generation, and notification variants are caught at
//! their stage boundary and replaced with fallback values, so they surface
//! here only in logs and degraded-content markers.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for degraded-but-continuing stages
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PERSISTENCE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Invalid submission: {0}")]
    Validation(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Draft generation failed: {0}")]
    Generation(String),

    #[error("Content store write failed: {0}")]
    Persistence(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for IntakeError {
    fn from(err: anyhow::Error) -> Self {
        IntakeError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, log_level).
/// client_message stays per-variant for dynamic content.
fn intake_error_static_metadata(
    err: &IntakeError,
) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        IntakeError::Validation(_) => (
            400,
            "VALIDATION_ERROR",
            false,
            Some("Check required submission fields and try again"),
            LogLevel::Debug,
        ),
        IntakeError::Fetch(_) => (
            502,
            "FETCH_ERROR",
            true,
            Some("Verify the attachment URL is reachable"),
            LogLevel::Warn,
        ),
        IntakeError::Storage(_) => (
            502,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        IntakeError::Extraction(_) => (
            502,
            "EXTRACTION_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        IntakeError::Generation(_) => (
            502,
            "GENERATION_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        IntakeError::Persistence(_) => (
            500,
            "PERSISTENCE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        IntakeError::Notification(_) => (
            500,
            "NOTIFICATION_ERROR",
            true,
            None,
            LogLevel::Warn,
        ),
        IntakeError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl IntakeError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            IntakeError::Validation(_) => "Validation",
            IntakeError::Fetch(_) => "Fetch",
            IntakeError::Storage(_) => "Storage",
            IntakeError::Extraction(_) => "Extraction",
            IntakeError::Generation(_) => "Generation",
            IntakeError::Persistence(_) => "Persistence",
            IntakeError::Notification(_) => "Notification",
            IntakeError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for IntakeError {
    fn http_status_code(&self) -> u16 {
        intake_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        intake_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        intake_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        intake_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        intake_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            IntakeError::Validation(msg) => msg.clone(),
            IntakeError::Fetch(_) => "Failed to fetch the source document".to_string(),
            IntakeError::Storage(_) => "Failed to archive the source document".to_string(),
            IntakeError::Extraction(_) => "Failed to extract document text".to_string(),
            IntakeError::Generation(_) => "Failed to generate the draft".to_string(),
            IntakeError::Persistence(_) => "Failed to save the news item".to_string(),
            IntakeError::Notification(_) => "Failed to deliver notifications".to_string(),
            IntakeError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
