//! Wire models for the DocVQA API.
//!
//! Field names are camelCase on the wire (`fileUrl`, `fileName`, ...) to
//! match the public API contract consumed by the web client.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Response returned by `POST /upload/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: u64,
    pub upload_id: String,
}

/// Request body for `POST /ask/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Public URL of a previously uploaded file.
    pub file_url: String,
    /// Question to ask about the file content.
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Question must be between 1 and 1000 characters"
    ))]
    pub question: String,
}

/// Response returned by `POST /ask/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub success: bool,
    pub answer: String,
    /// Model-reported confidence in [0, 1].
    pub confidence: f64,
    pub file_url: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

/// Status of one external dependency in the health report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub configured: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Effective limits reported by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthConfiguration {
    pub max_file_size_mb: f64,
    pub allowed_extensions: Vec<String>,
    pub max_question_length: usize,
}

/// Response returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub storage: ServiceStatus,
    pub inference: ServiceStatus,
    pub configuration: HealthConfiguration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn upload_response_uses_camel_case() {
        let response = UploadResponse {
            success: true,
            message: "File uploaded successfully".to_string(),
            file_url: "https://bucket.s3.us-east-1.amazonaws.com/uploads/abc.pdf".to_string(),
            file_name: "report.pdf".to_string(),
            file_size: 2_097_152,
            upload_id: "7c9e6679-7425-40de-944b-e07fc1f90ae7".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["fileName"], "report.pdf");
        assert_eq!(json["fileSize"], 2_097_152);
        assert!(json["fileUrl"].as_str().unwrap().starts_with("https://"));
        assert!(json.get("file_name").is_none());
    }

    #[test]
    fn ask_request_accepts_camel_case_body() {
        let body = r#"{"fileUrl":"https://bucket.s3.amazonaws.com/uploads/abc.jpg","question":"What color is the background?"}"#;
        let request: AskRequest = serde_json::from_str(body).expect("deserialize");
        assert_eq!(request.question, "What color is the background?");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn ask_request_rejects_overlong_question() {
        let request = AskRequest {
            file_url: "https://bucket.s3.amazonaws.com/uploads/abc.jpg".to_string(),
            question: "x".repeat(1001),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn ask_response_omits_missing_processing_time() {
        let response = AskResponse {
            success: true,
            answer: "blue".to_string(),
            confidence: 0.87,
            file_url: "https://bucket.s3.amazonaws.com/uploads/abc.jpg".to_string(),
            question: "What color is the background?".to_string(),
            processing_time: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("processingTime").is_none());
        assert_eq!(json["confidence"], 0.87);
    }
}
