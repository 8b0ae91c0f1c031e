//! Configuration module
//!
//! All runtime configuration is read once at startup from environment
//! variables. Credentials for optional collaborators are `Option`s: a missing
//! generative-backend key means mock mode, a missing notification channel
//! means that channel is disabled. Neither is a startup error.

use std::env;

use crate::constants::MAX_DRAFT_INPUT_CHARS;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Gcs,
    Local,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,

    // Object storage
    pub storage_backend: StorageBackendKind,
    pub gcs_bucket: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,

    // Document-understanding backend
    pub docai_project_id: Option<String>,
    pub docai_location: String,
    pub docai_processor_id: Option<String>,
    pub docai_access_token: Option<String>,
    /// Override for the regional endpoint (tests, emulators)
    pub docai_endpoint: Option<String>,

    // Generative backend; absent key = mock mode
    pub generative_api_key: Option<String>,
    pub generative_model: String,
    pub generative_endpoint: Option<String>,
    pub max_draft_input_chars: usize,

    // Content store
    pub content_store_url: String,
    pub content_store_dataset: String,
    pub content_store_token: Option<String>,

    // Notification channels
    pub chat_webhook_url: Option<String>,
    pub editor_email: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,

    /// Base URL for studio edit links in notifications
    pub studio_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "gcs".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackendKind::Local,
            _ => StorageBackendKind::Gcs,
        };

        let config = Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storage_backend,
            gcs_bucket: env::var("GCS_BUCKET_NAME").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            docai_project_id: env::var("GCP_PROJECT_ID").ok(),
            docai_location: env::var("DOCAI_LOCATION").unwrap_or_else(|_| "us".to_string()),
            docai_processor_id: env::var("DOCAI_PROCESSOR_ID").ok(),
            docai_access_token: env::var("DOCAI_ACCESS_TOKEN").ok(),
            docai_endpoint: env::var("DOCAI_ENDPOINT").ok(),
            generative_api_key: env::var("GEMINI_API_KEY").ok(),
            generative_model: env::var("GENERATIVE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            generative_endpoint: env::var("GENERATIVE_ENDPOINT").ok(),
            max_draft_input_chars: env::var("MAX_DRAFT_INPUT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_DRAFT_INPUT_CHARS),
            content_store_url: env::var("CONTENT_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:3333".to_string()),
            content_store_dataset: env::var("CONTENT_STORE_DATASET")
                .unwrap_or_else(|_| "production".to_string()),
            content_store_token: env::var("CONTENT_STORE_TOKEN").ok(),
            chat_webhook_url: env::var("CHAT_WEBHOOK_URL").ok(),
            editor_email: env::var("EDITOR_EMAIL").ok(),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            studio_base_url: env::var("STUDIO_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        };

        config.log_keys();
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Full document-AI processor resource name, if the backend is configured.
    pub fn docai_processor_name(&self) -> Option<String> {
        let project = self.docai_project_id.as_deref()?;
        let processor = self.docai_processor_id.as_deref()?;
        Some(format!(
            "projects/{}/locations/{}/processors/{}",
            project, self.docai_location, processor
        ))
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.len().min(5);
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!(
            environment = %self.environment,
            storage_backend = ?self.storage_backend,
            gcs_bucket = %self.gcs_bucket.as_deref().unwrap_or("<not set>"),
            generative_api_key = %preview_opt(&self.generative_api_key),
            docai_access_token = %preview_opt(&self.docai_access_token),
            content_store_token = %preview_opt(&self.content_store_token),
            chat_webhook = self.chat_webhook_url.is_some(),
            email = self.editor_email.is_some(),
            "Config loaded"
        );
    }
}
