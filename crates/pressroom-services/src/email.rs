//! Email channel for completion notifications, via SMTP.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use pressroom_core::Config;

/// Email service for sending notification messages.
/// No-op if SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Create email service from config. Returns `None` if SMTP is not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.as_deref()?.to_string();
        let port = config.smtp_port.unwrap_or(587);

        let mailer = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    /// Send an HTML email to the given recipient.
    pub async fn send_html(&self, to: &str, subject: &str, body_html: &str) -> Result<(), String> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        info!(to = %to, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_core::StorageBackendKind;

    fn config_without_smtp() -> Config {
        Config {
            server_port: 3000,
            environment: "test".to_string(),
            storage_backend: StorageBackendKind::Local,
            gcs_bucket: None,
            local_storage_path: None,
            local_storage_base_url: None,
            docai_project_id: None,
            docai_location: "us".to_string(),
            docai_processor_id: None,
            docai_access_token: None,
            docai_endpoint: None,
            generative_api_key: None,
            generative_model: "gemini-2.5-flash".to_string(),
            generative_endpoint: None,
            max_draft_input_chars: 30_000,
            content_store_url: "http://localhost:3333".to_string(),
            content_store_dataset: "production".to_string(),
            content_store_token: None,
            chat_webhook_url: None,
            editor_email: None,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            studio_base_url: "http://localhost:3000".to_string(),
        }
    }

    /// EmailService::from_config returns None when SMTP is not configured.
    #[test]
    fn test_from_config_returns_none_without_smtp() {
        let config = config_without_smtp();
        assert!(
            EmailService::from_config(&config).is_none(),
            "Without SMTP_HOST/SMTP_FROM, from_config should return None"
        );
    }

    #[test]
    fn test_from_config_requires_from_address() {
        let mut config = config_without_smtp();
        config.smtp_host = Some("smtp.example.com".to_string());
        assert!(EmailService::from_config(&config).is_none());
    }
}
