//! Shared helpers for endpoint tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use docvqa_api::setup::routes::setup_routes;
use docvqa_api::state::AppState;
use docvqa_core::config::VqaServiceConfig;
use docvqa_core::Config;
use docvqa_inference::{InferenceError, InferenceResult, VqaAnswer, VqaModel};
use docvqa_storage::{MemoryStorage, Storage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn test_config() -> Config {
    Config(Box::new(VqaServiceConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        s3_bucket: Some("test-bucket".to_string()),
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        upload_key_prefix: "uploads".to_string(),
        max_file_size_bytes: 10 * 1024 * 1024,
        allowed_extensions: vec![
            "jpg".to_string(),
            "jpeg".to_string(),
            "png".to_string(),
            "gif".to_string(),
            "webp".to_string(),
            "pdf".to_string(),
        ],
        allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
            "application/pdf".to_string(),
        ],
        huggingface_api_token: Some("hf_test".to_string()),
        huggingface_model_url:
            "https://api-inference.huggingface.co/models/Salesforce/blip-vqa-base".to_string(),
        max_question_length: 1000,
        min_question_length: 3,
        upload_timeout_secs: 60,
        ask_timeout_secs: 90,
    }))
}

type StubResponder = Box<dyn Fn() -> InferenceResult<VqaAnswer> + Send + Sync>;

/// VQA model stub with a call counter, so tests can assert the model is
/// never invoked when validation rejects the request first.
pub struct StubVqa {
    responder: StubResponder,
    calls: AtomicUsize,
    delay: Option<std::time::Duration>,
}

impl StubVqa {
    pub fn answering(answer: &str, confidence: f64) -> Self {
        let answer = answer.to_string();
        Self {
            responder: Box::new(move || {
                Ok(VqaAnswer {
                    answer: answer.clone(),
                    confidence,
                })
            }),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn failing(make_error: impl Fn() -> InferenceError + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(move || Err(make_error())),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Stub that hangs for `delay` before answering, to exercise the
    /// handler-level timeout.
    pub fn slow(delay: std::time::Duration) -> Self {
        Self {
            responder: Box::new(|| {
                Ok(VqaAnswer {
                    answer: "late".to_string(),
                    confidence: 0.5,
                })
            }),
            calls: AtomicUsize::new(0),
            delay: Some(delay),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VqaModel for StubVqa {
    async fn ask(&self, _file_url: &str, _question: &str) -> InferenceResult<VqaAnswer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)()
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn model_id(&self) -> &str {
        "stub/vqa-model"
    }
}

pub fn build_server(
    config: Config,
    storage: Arc<dyn Storage>,
    vqa: Arc<dyn VqaModel>,
) -> TestServer {
    let state = Arc::new(AppState::new(config.clone(), storage, vqa));
    let router = setup_routes(&config, state).expect("router setup");
    TestServer::new(router).expect("test server")
}

pub fn default_server() -> (TestServer, Arc<MemoryStorage>, Arc<StubVqa>) {
    let storage = Arc::new(MemoryStorage::default());
    let vqa = Arc::new(StubVqa::answering("blue", 0.87));
    let server = build_server(test_config(), storage.clone(), vqa.clone());
    (server, storage, vqa)
}
