//! Test helpers: in-memory service fakes, router construction and request builders.
//!
//! Run from workspace root: `cargo test -p filedrop-api`.

pub mod fakes;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use filedrop_api::setup::routes::build_router;
use filedrop_api::state::{AppState, UploadSettings};
use filedrop_worker::{FollowUpConfig, FollowUpRunner};
use http_body_util::BodyExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

pub use fakes::{MemoryStorage, RecordingNotifier, RecordingRecordStore};

pub const BOUNDARY: &str = "filedrop-test-boundary";
pub const TEST_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Test application: router, fakes and owned temp dir.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub storage: Arc<MemoryStorage>,
    pub records: Arc<RecordingRecordStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub _tmp_dir: TempDir,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Wait for record, notify and cleanup tasks to finish.
    pub async fn settle(&self) {
        assert!(
            self.state.follow_ups.drain(Duration::from_secs(5)).await,
            "follow-ups did not finish"
        );
    }

    pub fn tmp_dir(&self) -> &Path {
        &self.state.uploads.tmp_dir
    }

    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(self.tmp_dir())
            .expect("tmp dir exists")
            .count()
    }
}

pub struct TestAppBuilder {
    storage: MemoryStorage,
    records: RecordingRecordStore,
    notifier: RecordingNotifier,
    max_retries: u32,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            storage: MemoryStorage::default(),
            records: RecordingRecordStore::default(),
            notifier: RecordingNotifier::default(),
            max_retries: 0,
        }
    }

    pub fn storage(mut self, storage: MemoryStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn records(mut self, records: RecordingRecordStore) -> Self {
        self.records = records;
        self
    }

    pub fn notifier(mut self, notifier: RecordingNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build(self) -> TestApp {
        let tmp_dir = tempfile::tempdir().expect("create tmp dir");
        let storage = Arc::new(self.storage);
        let records = Arc::new(self.records);
        let notifier = Arc::new(self.notifier);

        let state = Arc::new(AppState {
            storage: storage.clone(),
            records: records.clone(),
            notifier: notifier.clone(),
            follow_ups: FollowUpRunner::new(FollowUpConfig {
                max_retries: self.max_retries,
                base_backoff: Duration::from_millis(10),
            }),
            uploads: UploadSettings {
                tmp_dir: tmp_dir.path().to_path_buf(),
            },
        });

        let router = build_router(state.clone(), &public_dir(), TEST_MAX_BODY_BYTES);

        TestApp {
            router,
            state,
            storage,
            records,
            notifier,
            _tmp_dir: tmp_dir,
        }
    }
}

pub fn setup_test_app() -> TestApp {
    TestAppBuilder::new().build()
}

pub fn public_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

/// Multipart body builder for the upload form.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .expect("valid request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn content_type(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
