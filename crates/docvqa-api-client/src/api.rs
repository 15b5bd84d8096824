//! Domain methods for the DocVQA API client.
//!
//! Response types are re-exported from `docvqa_core::models`.

use crate::ApiClient;
use anyhow::{Context, Result};
use docvqa_core::models::{AskRequest, AskResponse, HealthResponse, UploadResponse};

/// Guess a Content-Type from the file extension. The server cross-checks
/// extension and declared type, so sending the right one matters.
fn content_type_for(filename: &str) -> &'static str {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Upload a document from a local file path.
    pub async fn upload_file(&self, file_path: &str) -> Result<UploadResponse> {
        use std::io::Read;

        let path = std::path::Path::new(file_path);
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
        }
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", file_path))?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read file: {}", file_path))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let part = reqwest::multipart::Part::bytes(buffer)
            .file_name(filename.clone())
            .mime_str(content_type_for(&filename))
            .context("Invalid content type")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        self.post_multipart("/upload/", form).await
    }

    /// Ask a question about a previously uploaded file.
    pub async fn ask(&self, file_url: &str, question: &str) -> Result<AskResponse> {
        let request = AskRequest {
            file_url: file_url.to_string(),
            question: question.to_string(),
        };
        self.post_json("/ask/", &request).await
    }

    /// Fetch the detailed health report.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }
}
