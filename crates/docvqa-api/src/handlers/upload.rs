//! Document upload handler.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::multipart::MultipartError,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use docvqa_core::{AppError, UploadResponse};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Upload a document for question answering.
///
/// Accepts a multipart form with a single `file` field, validates it against
/// the configured limits, and stores it under a collision-resistant key. The
/// returned `fileUrl` is what `POST /ask/` expects.
#[utoipa::path(
    post,
    path = "/upload/",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Invalid file", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse),
    ),
    tag = "upload"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidInput("No filename provided".to_string()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field.bytes().await.map_err(multipart_error)?;

        file = Some((filename, content_type, data.to_vec()));
        break;
    }

    let (filename, content_type, data) = file.ok_or_else(|| {
        AppError::InvalidInput("Missing 'file' field in multipart form".to_string())
    })?;

    state.validator.validate(&filename, &content_type, data.len())?;

    let file_size = data.len() as u64;
    let timeout = Duration::from_secs(state.config.upload_timeout_secs());
    let stored = tokio::time::timeout(timeout, state.storage.store(&filename, &content_type, data))
        .await
        .map_err(|_| {
            AppError::UpstreamTimeout(format!(
                "Upload timed out after {}s",
                timeout.as_secs()
            ))
        })??;

    tracing::info!(
        file_name = %filename,
        file_size = file_size,
        storage_key = %stored.key,
        "File uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded successfully".to_string(),
        file_url: stored.url,
        file_name: filename,
        file_size,
        upload_id: Uuid::new_v4().to_string(),
    }))
}

/// Bodies over the transport cap fail mid-read with a length-limit error;
/// that is a 413 for the client, not a malformed request.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File exceeds the maximum allowed upload size".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart field: {}", e))
    }
}
