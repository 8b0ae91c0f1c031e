use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::blocks::Block;
use super::submission::Origin;

/// Review status of a news item. The pipeline only ever writes
/// `NeedsReview`; the other states belong to human review workflows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    NeedsReview,
    Published,
    Rejected,
}

impl Display for ReviewStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ReviewStatus::NeedsReview => write!(f, "needs_review"),
            ReviewStatus::Published => write!(f, "published"),
            ReviewStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Append-only workflow history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: String,
    pub by: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only editorial comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialComment {
    pub author: String,
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

/// The persisted, human-reviewable editorial record, in the content store's
/// document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_type")]
    pub doc_type: String,
    pub title: String,
    /// Provenance description; doubles as the idempotency key for lookups
    pub description: String,
    pub ai_content: Vec<Block>,
    pub status: ReviewStatus,
    pub source: Origin,
    pub author: String,
    pub history: Vec<HistoryEntry>,
    pub comments: Vec<EditorialComment>,
}

impl NewsItem {
    pub const DOC_TYPE: &'static str = "newsItem";

    /// Build a fresh item in the shape the pipeline persists: needs-review
    /// status and a single "imported" history entry.
    pub fn imported(
        title: String,
        description: String,
        ai_content: Vec<Block>,
        origin: Origin,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            doc_type: Self::DOC_TYPE.to_string(),
            title,
            description,
            ai_content,
            status: ReviewStatus::NeedsReview,
            source: origin,
            author: origin.actor().to_string(),
            history: vec![HistoryEntry {
                action: crate::constants::HISTORY_ACTION_IMPORTED.to_string(),
                by: origin.actor().to_string(),
                timestamp: now,
            }],
            comments: Vec::new(),
        }
    }

    pub fn with_comment(mut self, author: &str, message: String, now: DateTime<Utc>) -> Self {
        self.comments.push(EditorialComment {
            author: author.to_string(),
            message,
            posted_at: now,
        });
        self
    }
}

/// Partial update applied when reprocessing an existing item (manual
/// regenerate). Only set fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_content: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}
