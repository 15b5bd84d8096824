//! Upload endpoint tests over an in-memory storage backend.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{build_server, default_server, test_config, StubVqa};
use std::sync::Arc;

fn pdf_form(name: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name(name)
            .mime_type("application/pdf"),
    )
}

#[tokio::test]
async fn uploads_valid_pdf() {
    let (server, storage, _vqa) = default_server();

    let body = vec![0x25u8; 2 * 1024 * 1024]; // 2MB
    let response = server
        .post("/upload/")
        .multipart(pdf_form("report.pdf", body))
        .await;

    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["fileName"], "report.pdf");
    assert_eq!(json["fileSize"], 2 * 1024 * 1024);
    let file_url = json["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with("https://"));
    assert!(file_url.contains("/uploads/"));
    assert!(file_url.ends_with(".pdf"));
    // uploadId is a UUID, not derived from the filename
    assert_eq!(json["uploadId"].as_str().unwrap().len(), 36);
    assert_eq!(storage.object_count(), 1);
}

#[tokio::test]
async fn upload_works_without_trailing_slash() {
    let (server, _storage, _vqa) = default_server();

    let response = server
        .post("/upload")
        .multipart(pdf_form("report.pdf", vec![1, 2, 3]))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn same_filename_uploads_get_distinct_urls() {
    let (server, storage, _vqa) = default_server();

    let first = server
        .post("/upload/")
        .multipart(pdf_form("invoice.pdf", vec![1]))
        .await;
    let second = server
        .post("/upload/")
        .multipart(pdf_form("invoice.pdf", vec![2]))
        .await;

    first.assert_status_ok();
    second.assert_status_ok();
    let url_a = first.json::<serde_json::Value>()["fileUrl"].clone();
    let url_b = second.json::<serde_json::Value>()["fileUrl"].clone();
    assert_ne!(url_a, url_b);
    assert_eq!(storage.object_count(), 2);
}

#[tokio::test]
async fn rejects_disallowed_extension() {
    let (server, storage, _vqa) = default_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0x4d, 0x5a])
            .file_name("malware.exe")
            .mime_type("application/pdf"),
    );
    let response = server.post("/upload/").multipart(form).await;

    response.assert_status_bad_request();
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["message"].as_str().unwrap().contains("exe"));
    assert_eq!(storage.object_count(), 0);
}

#[tokio::test]
async fn rejects_content_type_extension_mismatch() {
    let (server, _storage, _vqa) = default_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![1, 2, 3])
            .file_name("photo.png")
            .mime_type("application/pdf"),
    );
    let response = server.post("/upload/").multipart(form).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn rejects_oversized_file_with_413() {
    let (server, storage, _vqa) = default_server();

    let body = vec![0u8; 11 * 1024 * 1024]; // over the 10MB limit
    let response = server
        .post("/upload/")
        .multipart(pdf_form("big.pdf", body))
        .await;

    response.assert_status(http::StatusCode::PAYLOAD_TOO_LARGE);
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(storage.object_count(), 0);
}

#[tokio::test]
async fn rejects_upload_exceeding_transport_cap_with_413() {
    let (server, storage, _vqa) = default_server();

    // Past the 2x transport body cap, so the failure happens while the
    // multipart body is still being read rather than in the validator.
    let body = vec![0u8; 25 * 1024 * 1024];
    let response = server
        .post("/upload/")
        .multipart(pdf_form("huge.pdf", body))
        .await;

    response.assert_status(http::StatusCode::PAYLOAD_TOO_LARGE);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(storage.object_count(), 0);
}

#[tokio::test]
async fn rejects_empty_file() {
    let (server, _storage, _vqa) = default_server();

    let response = server
        .post("/upload/")
        .multipart(pdf_form("empty.pdf", vec![]))
        .await;

    response.assert_status_bad_request();
    let json: serde_json::Value = response.json();
    assert!(json["message"].as_str().unwrap().contains("Empty file"));
}

#[tokio::test]
async fn rejects_form_without_file_field() {
    let (server, _storage, _vqa) = default_server();

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = server.post("/upload/").multipart(form).await;

    response.assert_status_bad_request();
    let json: serde_json::Value = response.json();
    assert!(json["message"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn storage_failure_maps_to_500() {
    let storage = Arc::new(docvqa_storage::MemoryStorage::default());
    storage.fail_uploads("simulated backend outage");
    let vqa = Arc::new(StubVqa::answering("blue", 0.87));
    let server = build_server(test_config(), storage, vqa);

    let response = server
        .post("/upload/")
        .multipart(pdf_form("report.pdf", vec![1, 2, 3]))
        .await;

    response.assert_status(http::StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "STORAGE_ERROR");
    // Internal detail must not leak to the client
    assert!(!json["message"].as_str().unwrap().contains("simulated"));
}
