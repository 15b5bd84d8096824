//! Health and service info endpoint tests.

mod helpers;

use helpers::{build_server, default_server, test_config};
use std::sync::Arc;

#[tokio::test]
async fn root_reports_service_info() {
    let (server, _storage, _vqa) = default_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["service"], "docvqa-api");
    assert_eq!(body["docs"], "/docs");
}

#[tokio::test]
async fn health_reports_healthy_with_working_backends() {
    let (server, _storage, _vqa) = default_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["status"], "ok");
    assert_eq!(body["inference"]["status"], "ok");
    assert_eq!(body["inference"]["detail"], "stub/vqa-model");
    assert_eq!(body["configuration"]["maxFileSizeMb"], 10.0);
    assert_eq!(body["configuration"]["maxQuestionLength"], 1000);
    let extensions = body["configuration"]["allowedExtensions"]
        .as_array()
        .unwrap();
    assert!(extensions.iter().any(|e| e == "pdf"));
}

#[tokio::test]
async fn health_reports_degraded_storage_with_200() {
    let storage = Arc::new(docvqa_storage::MemoryStorage::default());
    storage.fail_uploads("backend down");
    let vqa = Arc::new(helpers::StubVqa::answering("blue", 0.87));
    let server = build_server(test_config(), storage, vqa);

    let response = server.get("/health").await;

    // Degraded dependencies are reported, not turned into a failed request.
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["inference"]["status"], "ok");
}

#[tokio::test]
async fn openapi_spec_is_served() {
    let (server, _storage, _vqa) = default_server();

    let response = server.get("/api/openapi.json").await;

    response.assert_status_ok();
    let spec: serde_json::Value = response.json();
    assert_eq!(spec["info"]["title"], "DocVQA API");
    assert!(spec["paths"].get("/upload/").is_some());
    assert!(spec["paths"].get("/ask/").is_some());
}
