//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against the in-memory product store and local storage in a
//! temporary directory, so these tests need no external services.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use catalog_api::setup::routes;
use catalog_api::state::{AppState, UploadConfig};
use catalog_db::InMemoryProductStore;
use catalog_storage::{LocalStorage, Storage, UPLOADS_PREFIX};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_BASE_URL: &str = "http://localhost:5000";

/// Test application: server plus the resources it owns.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryProductStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage_root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Filesystem location of an image URL returned by the API.
    pub fn file_for_url(&self, url: &str) -> PathBuf {
        let relative = url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(url)
            .trim_start_matches('/');
        self.storage_root().join(relative)
    }

    /// Number of files currently in the uploads directory.
    pub fn stored_file_count(&self) -> usize {
        match std::fs::read_dir(self.storage_root().join(UPLOADS_PREFIX)) {
            Ok(entries) => entries.filter_map(Result::ok).count(),
            Err(_) => 0,
        }
    }
}

pub fn test_upload_config() -> UploadConfig {
    UploadConfig {
        max_file_size: 64 * 1024,
        max_images: 5,
        allowed_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        allowed_content_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        base_url: TEST_BASE_URL.to_string(),
    }
}

/// Setup test app with default upload limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(test_upload_config()).await
}

/// Setup test app with custom upload limits.
pub async fn setup_test_app_with(upload: UploadConfig) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let storage = LocalStorage::new(temp_dir.path(), TEST_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage");
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let store = Arc::new(InMemoryProductStore::new());

    let state = Arc::new(AppState::new(store.clone(), storage, upload));
    let cors = routes::setup_cors(&["*".to_string()]).expect("Failed to build CORS layer");
    let router = routes::build_router(state, cors, &temp_dir.path().join(UPLOADS_PREFIX));

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}
