//! Test application setup with fake collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use tempfile::TempDir;

use pressroom_api::{build_router, AppState};
use pressroom_content::{ContentStore, ContentStoreError};
use pressroom_core::{Config, NewsItem, NewsItemPatch, StorageBackendKind};
use pressroom_pipeline::IntakePipeline;
use pressroom_processing::ExtractorRouter;
use pressroom_services::{DraftGenerator, Notifier};
use pressroom_storage::LocalStorage;

/// In-memory content store capturing everything the pipeline writes.
#[derive(Default)]
pub struct FakeContentStore {
    pub items: Mutex<Vec<(String, NewsItem)>>,
    pub patches: Mutex<Vec<(String, NewsItemPatch)>>,
    pub attachment_urls: Mutex<HashMap<String, String>>,
}

impl FakeContentStore {
    pub fn created_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn created_item(&self, idx: usize) -> NewsItem {
        self.items.lock().unwrap()[idx].1.clone()
    }

    pub fn patch_count(&self) -> usize {
        self.patches.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn find_item_id_by_description(
        &self,
        description: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|(_, item)| item.description.starts_with(description))
            .map(|(id, _)| id.clone()))
    }

    async fn create_item(&self, item: &NewsItem) -> Result<String, ContentStoreError> {
        let mut items = self.items.lock().unwrap();
        let id = format!("item-{}", items.len() + 1);
        items.push((id.clone(), item.clone()));
        Ok(id)
    }

    async fn patch_item(
        &self,
        item_id: &str,
        patch: &NewsItemPatch,
    ) -> Result<(), ContentStoreError> {
        self.patches
            .lock()
            .unwrap()
            .push((item_id.to_string(), patch.clone()));
        Ok(())
    }

    async fn resolve_attachment_url(
        &self,
        item_id: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        Ok(self.attachment_urls.lock().unwrap().get(item_id).cloned())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<FakeContentStore>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config() -> Config {
    Config {
        server_port: 0,
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
        content_store_dataset: "test".to_string(),
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

/// Setup a test application: fake content store, temp-dir local storage, no
/// remote extractor, mock-mode draft generator, no notification channels.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let storage = LocalStorage::new(
        temp_dir.path(),
        "http://localhost:3000/archive".to_string(),
    )
    .await
    .expect("local storage");

    let store = Arc::new(FakeContentStore::default());

    let pipeline = IntakePipeline::new(
        store.clone(),
        Arc::new(storage),
        ExtractorRouter::new(None),
        DraftGenerator::new(None, 30_000),
        Notifier::disabled(),
    );

    let state = Arc::new(AppState {
        pipeline: Arc::new(pipeline),
        config: test_config(),
    });

    let server = TestServer::new(build_router(state)).expect("test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}
