//! Shared constants.

/// Maximum number of characters from extracted/raw text sent to the
/// generative backend. Oversized payloads are truncated, not rejected.
pub const MAX_DRAFT_INPUT_CHARS: usize = 30_000;

/// Review status the pipeline writes on every created or patched item.
/// Human review workflows own the other statuses.
pub const INITIAL_REVIEW_STATUS: &str = "needs_review";

/// History action recorded when the pipeline creates an item.
pub const HISTORY_ACTION_IMPORTED: &str = "imported";

/// Root folder for archived source documents in object storage.
pub const ARCHIVE_ROOT: &str = "uploads";
