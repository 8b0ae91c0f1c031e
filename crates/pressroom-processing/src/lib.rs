//! Text extraction for archived source documents.
//!
//! The [`ExtractorRouter`] picks the extraction strategy from the document
//! kind: word-processing formats are converted locally with no network
//! dependency; PDFs and unknown formats go to the remote
//! document-understanding backend.

pub mod docai;
pub mod kind;
pub mod office;
pub mod router;

pub use docai::DocAiClient;
pub use kind::DocumentKind;
pub use router::{DocumentUnderstanding, ExtractorRouter};

use thiserror::Error;

/// Typed extraction failure. Never partially populated: extraction yields
/// either text or exactly one of these reasons.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The archived document could not be read back for conversion
    #[error("Failed to fetch document for extraction: {0}")]
    Fetch(String),

    /// The document is not in a format the local converter understands
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The remote document-understanding backend failed (timeout, auth,
    /// unsupported content)
    #[error("Extraction backend error: {0}")]
    Backend(String),
}
