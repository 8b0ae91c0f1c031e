//! The intake-and-draft pipeline.
//!
//! [`IntakePipeline`] sequences dedup check, archival, extraction, draft
//! generation, formatting, persistence, and notification for each inbound
//! submission. Archive and extraction failures degrade to fallback text;
//! only malformed submissions and persistence failures abort.

pub mod archiver;
pub mod dedup;
pub mod pipeline;

pub use archiver::{ArchivedDocument, Archiver};
pub use dedup::{idempotency_key, DedupGuard};
pub use pipeline::{IntakeOutcome, IntakePipeline};
