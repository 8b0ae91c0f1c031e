//! Collaborator client construction and dependency injection.
//!
//! Every external client is built exactly once at startup and handed to the
//! pipeline; nothing is constructed at module load time.

use std::sync::Arc;

use anyhow::{Context, Result};

use pressroom_content::{ContentStore, ContentStoreClient};
use pressroom_core::Config;
use pressroom_pipeline::IntakePipeline;
use pressroom_processing::{DocAiClient, DocumentUnderstanding, ExtractorRouter};
use pressroom_services::{DraftGenerator, EmailService, GeminiClient, GenerativeBackend, Notifier};
use pressroom_storage::create_storage;

use crate::state::AppState;

/// Build all services and assemble the pipeline.
pub async fn initialize_services(config: Config) -> Result<Arc<AppState>> {
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let content_store: Arc<dyn ContentStore> = Arc::new(
        ContentStoreClient::new(
            config.content_store_url.clone(),
            config.content_store_dataset.clone(),
            config.content_store_token.clone(),
        )
        .context("Failed to initialize content store client")?,
    );

    let remote: Option<Arc<dyn DocumentUnderstanding>> =
        match (config.docai_processor_name(), &config.docai_access_token) {
            (Some(processor_name), Some(token)) => {
                let client = DocAiClient::new(
                    processor_name,
                    &config.docai_location,
                    token.clone(),
                    config.docai_endpoint.clone(),
                )
                .context("Failed to initialize document-understanding client")?;
                Some(Arc::new(client) as Arc<dyn DocumentUnderstanding>)
            }
            _ => {
                tracing::warn!(
                    "Document-understanding backend not configured; PDF extraction will degrade"
                );
                None
            }
        };

    let generative: Option<Arc<dyn GenerativeBackend>> = match &config.generative_api_key {
        Some(api_key) => {
            let client = GeminiClient::new(
                api_key.clone(),
                config.generative_model.clone(),
                config.generative_endpoint.clone(),
            )
            .context("Failed to initialize generative backend client")?;
            Some(Arc::new(client) as Arc<dyn GenerativeBackend>)
        }
        None => {
            tracing::warn!("No generative backend credential configured, running in mock mode");
            None
        }
    };
    let drafts = DraftGenerator::new(generative, config.max_draft_input_chars);

    let notifier = Notifier::new(
        config.chat_webhook_url.clone(),
        EmailService::from_config(&config),
        config.editor_email.clone(),
        config.studio_base_url.clone(),
    );

    let pipeline = IntakePipeline::new(
        content_store,
        storage,
        ExtractorRouter::new(remote),
        drafts,
        notifier,
    );

    Ok(Arc::new(AppState {
        pipeline: Arc::new(pipeline),
        config,
    }))
}
