//! Common test utilities and helpers.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use catalog::config::{Config, DatabaseConfig, LogConfig, ServerConfig, StorageConfig};
use catalog::{api, AppState};
use serde_json::Value;
use tempfile::TempDir;

/// Upload cap used by test applications.
pub const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

const BOUNDARY: &str = "catalog-test-boundary";

/// A fully wired application backed by a temporary directory.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    // Dropped last; keeps the database and uploads alive for the test.
    pub dir: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("uploads")
    }

    /// Number of blobs currently in the content directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir()).unwrap().count()
    }
}

/// Build an application with a file-backed database and upload directory
/// inside a fresh temp dir.
pub async fn setup() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            path: dir.path().join("catalog.db").to_string_lossy().into_owned(),
        },
        storage: StorageConfig {
            upload_dir: dir.path().join("uploads"),
            max_upload_size: TEST_MAX_UPLOAD_SIZE,
        },
        log: LogConfig { json: false },
    };

    let state = AppState::new(config)
        .await
        .expect("Failed to build application state");
    let router = api::app(state.clone());

    TestApp { router, state, dir }
}

/// Extract JSON body from response
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Builder for `multipart/form-data` request bodies.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the body and wrap it in a `POST /upload` request.
    pub fn into_upload_request(mut self) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Create a GET request
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a DELETE request
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Create a PUT request with a raw body and an optional content type
pub fn put_request(uri: &str, body: &str, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("PUT").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
