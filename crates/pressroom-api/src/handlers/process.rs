//! Processing trigger for file-bearing submissions: automated integrations
//! post a direct file URL, the studio regenerate action posts a
//! resolve-from-store reference. The attachment source is a typed tag, not a
//! sentinel value.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use pressroom_core::validation::validate_attachment_url;
use pressroom_core::{AttachmentSource, IntakeError, Origin, Submission};

use crate::error::HttpIntakeError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Existing content-store item to patch in place (regenerate flow)
    pub item_id: Option<String>,
    /// External identifier; defaults to `item_id`
    pub external_id: Option<String>,
    pub attachment: Option<AttachmentSource>,
    pub inline_text: Option<String>,
    pub title: Option<String>,
    pub origin: Option<Origin>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub item_id: String,
    pub message: String,
    pub degraded: bool,
}

/// POST handler: run the pipeline for a file-bearing submission.
pub async fn start_process(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProcessRequest>,
) -> Result<impl IntoResponse, HttpIntakeError> {
    let external_id = body
        .external_id
        .clone()
        .or_else(|| body.item_id.clone())
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            IntakeError::Validation("Missing external_id or item_id".to_string())
        })?;

    if let Some(AttachmentSource::Direct { url }) = &body.attachment {
        validate_attachment_url(url)?;
    }

    // The regenerate flow defaults to manual; automated callers declare
    // themselves explicitly.
    let origin = body.origin.unwrap_or(Origin::Manual);

    let submission = Submission {
        external_id,
        origin,
        attachment: body.attachment,
        inline_text: body.inline_text,
        title: body.title,
        target_item_id: body.item_id,
        system_note: None,
    };

    let outcome = state.pipeline.process(submission).await?;

    Ok(Json(ProcessResponse {
        success: true,
        item_id: outcome.item_id,
        message: outcome.message,
        degraded: outcome.degraded,
    }))
}

/// GET handler: small status body for browser testing.
pub async fn process_status() -> impl IntoResponse {
    Json(json!({
        "status": "API Online",
        "message": "Send a POST request to this endpoint."
    }))
}
