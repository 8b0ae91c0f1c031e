//! Intake boundary validation helpers.

use crate::error::IntakeError;

/// Maximum accepted URL length for attachment sources.
pub const MAX_URL_LENGTH: usize = 2048;

/// Require a non-empty, non-whitespace field value.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        return Err(IntakeError::Validation(format!("Missing {}", field)));
    }
    Ok(())
}

/// Validate an attachment URL: bounded length, http(s) scheme only.
pub fn validate_attachment_url(url: &str) -> Result<(), IntakeError> {
    if url.len() > MAX_URL_LENGTH {
        return Err(IntakeError::Validation(format!(
            "Attachment URL too long (max {} characters)",
            MAX_URL_LENGTH
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(IntakeError::Validation(
            "Attachment URL must use http or https".to_string(),
        ));
    }
    Ok(())
}
