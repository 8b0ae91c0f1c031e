//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{origin}/{submission_id}-{unix_millis}.{ext}`.
//! The origin segment separates manually-triggered uploads from automated
//! ones; the millisecond suffix keeps retried submissions from colliding.

use chrono::{DateTime, Utc};
use pressroom_core::constants::ARCHIVE_ROOT;
use pressroom_core::Origin;

/// Generate the archive key for a submission's source document.
pub fn archive_key(
    origin: Origin,
    submission_id: &str,
    ingested_at: DateTime<Utc>,
    extension: &str,
) -> String {
    format!(
        "{}/{}/{}-{}.{}",
        ARCHIVE_ROOT,
        origin.folder(),
        sanitize_id(submission_id),
        ingested_at.timestamp_millis(),
        extension
    )
}

/// Keep submission ids path-safe: alphanumerics, dash, underscore.
fn sanitize_id(id: &str) -> String {
    const MAX: usize = 64;
    let s: String = id
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() {
        "submission".to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_archive_key_is_origin_namespaced() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let key = archive_key(Origin::Manual, "42", ts, "pdf");
        assert_eq!(key, "uploads/manual/42-1700000000000.pdf");

        let key = archive_key(Origin::Automation, "42", ts, "pdf");
        assert_eq!(key, "uploads/automation/42-1700000000000.pdf");
    }

    #[test]
    fn test_archive_key_is_deterministic_per_timestamp() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            archive_key(Origin::Api, "7", ts, "docx"),
            archive_key(Origin::Api, "7", ts, "docx")
        );
    }

    #[test]
    fn test_sanitize_id_replaces_path_characters() {
        let ts = Utc.timestamp_millis_opt(0).unwrap();
        let key = archive_key(Origin::Api, "../etc/passwd", ts, "pdf");
        assert!(
            !key.contains(".."),
            "Path traversal characters must not survive: {}",
            key
        );
        assert!(key.starts_with("uploads/api/"));
    }
}
