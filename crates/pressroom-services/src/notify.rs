//! Notifier: best-effort fan-out of completion events.
//!
//! Channels are independent: one channel's outage never suppresses another's
//! delivery, and no channel failure ever fails the pipeline. Which channels
//! fire is decided by configuration at construction time.

use std::time::Duration;

use serde_json::json;

use pressroom_core::Origin;

use crate::email::EmailService;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Completion event for a processed submission.
#[derive(Debug, Clone)]
pub struct IntakeEvent {
    pub item_id: String,
    pub title: String,
    pub external_id: String,
    pub origin: Origin,
}

/// Best-effort notification fan-out to chat-webhook and email channels.
pub struct Notifier {
    http: reqwest::Client,
    chat_webhook_url: Option<String>,
    email: Option<EmailService>,
    editor_email: Option<String>,
    studio_base_url: String,
}

impl Notifier {
    pub fn new(
        chat_webhook_url: Option<String>,
        email: Option<EmailService>,
        editor_email: Option<String>,
        studio_base_url: String,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            chat_webhook_url,
            email,
            editor_email,
            studio_base_url: studio_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Notifier with every channel disabled (tests, minimal deployments).
    pub fn disabled() -> Self {
        Self::new(None, None, None, "http://localhost:3000".to_string())
    }

    fn edit_url(&self, item_id: &str) -> String {
        format!(
            "{}/studio/structure/newsItem;{}",
            self.studio_base_url, item_id
        )
    }

    /// Fan the event out to all configured channels. Each channel failure is
    /// caught and logged independently; this function never errors.
    pub async fn notify(&self, event: &IntakeEvent) {
        if let Err(e) = self.send_chat_message(event).await {
            tracing::warn!(
                error = %e,
                item_id = %event.item_id,
                channel = "chat",
                "Notification delivery failed"
            );
        }

        if let Err(e) = self.send_email(event).await {
            tracing::warn!(
                error = %e,
                item_id = %event.item_id,
                channel = "email",
                "Notification delivery failed"
            );
        }
    }

    async fn send_chat_message(&self, event: &IntakeEvent) -> Result<(), String> {
        let Some(webhook_url) = &self.chat_webhook_url else {
            tracing::debug!("Chat webhook not configured, skipping notification");
            return Ok(());
        };

        let message = format!(
            "*New press-release import*\n\n\
             Submission: #{} - {}\n\
             Source: {}\n\
             Status: Draft generated\n\
             Edit: <{}|Open editor>",
            event.external_id,
            event.title,
            event.origin,
            self.edit_url(&event.item_id),
        );

        let response = self
            .http
            .post(webhook_url)
            .json(&json!({ "text": message }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("chat webhook returned {}", response.status()));
        }

        tracing::info!(item_id = %event.item_id, "Chat notification sent");
        Ok(())
    }

    async fn send_email(&self, event: &IntakeEvent) -> Result<(), String> {
        let (Some(email), Some(to)) = (&self.email, &self.editor_email) else {
            tracing::debug!("Email channel not configured, skipping notification");
            return Ok(());
        };

        let subject = format!("[Pressroom] New import: {}", event.title);
        let body = format!(
            "<h2>New press-release import</h2>\
             <p><strong>Submission:</strong> #{}</p>\
             <p><strong>Title:</strong> {}</p>\
             <br/>\
             <p><a href=\"{}\" style=\"padding: 10px 20px; background-color: #228b22; \
             color: white; text-decoration: none; border-radius: 5px;\">Open Editor</a></p>",
            event.external_id,
            event.title,
            self.edit_url(&event.item_id),
        );

        email.send_html(to, &subject, &body).await
    }
}
