use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::IntakeError;

/// Where a submission entered the system. Closed set; the wire values match
/// the content store's `source` field options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Automated integration (e.g. a no-code automation forwarding uploads)
    Automation,
    /// Manually triggered from the editorial studio
    Manual,
    /// Inbound third-party webhook (ticketing system)
    Api,
}

impl Origin {
    /// Storage folder segment for archived documents from this origin.
    pub fn folder(&self) -> &'static str {
        match self {
            Origin::Automation => "automation",
            Origin::Manual => "manual",
            Origin::Api => "api",
        }
    }

    /// Provenance label used in the idempotency description.
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Automation => "automation job",
            Origin::Manual => "manual upload",
            Origin::Api => "ticket",
        }
    }

    /// Actor name recorded in history entries and comments.
    pub fn actor(&self) -> &'static str {
        match self {
            Origin::Automation => "Automation",
            Origin::Manual => "Editor",
            Origin::Api => "Ticket Webhook",
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Origin::Automation => write!(f, "automation"),
            Origin::Manual => write!(f, "manual"),
            Origin::Api => write!(f, "api"),
        }
    }
}

impl FromStr for Origin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automation" => Ok(Origin::Automation),
            "manual" => Ok(Origin::Manual),
            "api" => Ok(Origin::Api),
            _ => Err(anyhow::anyhow!("Invalid origin: {}", s)),
        }
    }
}

/// How the source file for a submission is located.
///
/// `ResolveFromStore` covers the studio "regenerate" trigger, where only the
/// content-store item id is known and the file URL must be looked up there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttachmentSource {
    Direct { url: String },
    ResolveFromStore { item_id: String },
}

/// One unit of inbound work to the pipeline.
///
/// Built only by the intake boundary after strict payload validation; a
/// `Submission` that passed [`Submission::validate`] is guaranteed to resolve
/// to a non-empty text input for drafting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Caller- or webhook-supplied external identifier (ticket number, document id)
    pub external_id: String,
    pub origin: Origin,
    pub attachment: Option<AttachmentSource>,
    /// Raw text used when no attachment is present, and as fallback when
    /// archive/extraction degrade
    pub inline_text: Option<String>,
    pub title: Option<String>,
    /// When set, persistence patches this existing item instead of creating one
    pub target_item_id: Option<String>,
    /// Optional provenance note recorded as a system comment on creation
    pub system_note: Option<String>,
}

impl Submission {
    /// Enforce the intake invariants: a non-empty external id and at least
    /// one usable text source (attachment or inline text).
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.external_id.trim().is_empty() {
            return Err(IntakeError::Validation(
                "Missing external id".to_string(),
            ));
        }

        let has_inline = self
            .inline_text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);

        if self.attachment.is_none() && !has_inline {
            return Err(IntakeError::Validation(
                "Submission has neither an attachment nor inline text".to_string(),
            ));
        }

        if let Some(AttachmentSource::Direct { url }) = &self.attachment {
            if url.trim().is_empty() {
                return Err(IntakeError::Validation(
                    "Attachment URL is empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
