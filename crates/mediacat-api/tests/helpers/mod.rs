//! Test helpers: build the real router over an in-memory catalog and tempdir storage.
//!
//! Run from workspace root: `cargo test -p mediacat-api`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use mediacat_api::setup::routes::setup_routes;
use mediacat_api::AppState;
use mediacat_core::{CatalogServiceConfig, Config};
use mediacat_services::{LocalStorage, MemoryCatalog, Storage};
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key-0123456789abcdef";
pub const TEST_BASE_URL: &str = "http://localhost:3000/files";

/// Test application: server plus the storage directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Options that differ between test cases.
#[derive(Default)]
pub struct TestOptions {
    pub api_key: Option<&'static str>,
    pub max_upload_bytes: Option<usize>,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_path = storage_dir.path().to_string_lossy().to_string();

    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("LOCAL_STORAGE_PATH", storage_path);
    vars.insert("LOCAL_STORAGE_BASE_URL", TEST_BASE_URL.to_string());
    if let Some(key) = options.api_key {
        vars.insert("MEDIACAT_API_KEY", key.to_string());
    }
    if let Some(max) = options.max_upload_bytes {
        vars.insert("MAX_UPLOAD_BYTES", max.to_string());
    }

    let config = Config(Box::new(
        CatalogServiceConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build test config"),
    ));

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), TEST_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(MemoryCatalog::new()),
        storage,
    ));

    let router = setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        storage_dir,
    }
}

/// Multipart form with a single `file` part.
pub fn file_form(file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data).file_name(file_name).mime_type(mime_type),
    )
}

/// Upload a file and return the `data` object of the response.
pub async fn upload(
    client: &TestServer,
    file_name: &str,
    mime_type: &str,
    collection: Option<&str>,
    size: usize,
) -> serde_json::Value {
    let mut form = file_form(file_name, mime_type, vec![b'x'; size]);
    if let Some(collection) = collection {
        form = form.add_text("collection", collection);
    }

    let response = client.post("/api/v1/media/upload").multipart(form).await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json::<serde_json::Value>()["data"].clone()
}
