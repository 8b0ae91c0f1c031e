//! Inbound ticket webhook: converts a ticketing-system payload into a
//! validated [`Submission`] and runs the pipeline.
//!
//! Validation happens exhaustively here at the boundary; nothing
//! partially-filled flows into the pipeline.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use pressroom_core::{IntakeError, Origin, Submission};

use crate::error::HttpIntakeError;
use crate::state::AppState;

/// Ticket ids arrive as numbers or strings depending on the sender.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TicketId {
    Num(i64),
    Str(String),
}

impl TicketId {
    fn as_string(&self) -> String {
        match self {
            TicketId::Num(n) => n.to_string(),
            TicketId::Str(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketPayload {
    pub id: Option<TicketId>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    pub tags: Vec<String>,
    #[allow(dead_code)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TicketIntakeRequest {
    pub ticket: Option<TicketPayload>,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub success: bool,
    pub item_id: String,
    pub message: String,
}

/// POST handler for the ticket webhook.
pub async fn ticket_intake(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TicketIntakeRequest>,
) -> Result<impl IntoResponse, HttpIntakeError> {
    let ticket = body.ticket.ok_or_else(|| {
        IntakeError::Validation("Invalid payload: Missing ticket data".to_string())
    })?;

    let external_id = ticket
        .id
        .as_ref()
        .map(TicketId::as_string)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| IntakeError::Validation("Invalid payload: Missing ticket id".to_string()))?;

    let description = ticket
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            IntakeError::Validation("Invalid payload: Missing ticket description".to_string())
        })?
        .to_string();

    tracing::info!(
        ticket_id = %external_id,
        subject = %ticket.subject.as_deref().unwrap_or("<none>"),
        "Ticket received"
    );

    let system_note = match &ticket.priority {
        Some(priority) => format!(
            "Imported from ticket #{}. Original priority: {}",
            external_id, priority
        ),
        None => format!("Imported from ticket #{}", external_id),
    };

    let submission = Submission {
        external_id: external_id.clone(),
        origin: Origin::Api,
        attachment: None,
        inline_text: Some(description),
        title: ticket
            .subject
            .clone()
            .filter(|s| !s.trim().is_empty()),
        target_item_id: None,
        system_note: Some(system_note),
    };

    let outcome = state.pipeline.process(submission).await?;

    Ok(Json(IntakeResponse {
        success: true,
        item_id: outcome.item_id,
        message: outcome.message,
    }))
}
