//! Pressroom Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration, and
//! validation shared across all Pressroom components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, StorageBackendKind};
pub use error::{ErrorMetadata, IntakeError, LogLevel};
pub use models::{
    AttachmentSource, Block, EditorialComment, HistoryEntry, NewsItem, NewsItemPatch, Origin,
    ReviewStatus, Span, Submission,
};
