//! Question answering handler.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use docvqa_core::validation::{validate_file_url, validate_question};
use docvqa_core::{AppError, AskRequest, AskResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};
use validator::Validate;

/// Ask a question about a previously uploaded document.
///
/// The file is referenced by the public URL returned from `POST /upload/`;
/// the service holds no session state between the two calls.
#[utoipa::path(
    post,
    path = "/ask/",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer produced", body = AskResponse),
        (status = 400, description = "Invalid question or file URL", body = crate::error::ErrorResponse),
        (status = 503, description = "Model is loading", body = crate::error::ErrorResponse),
        (status = 500, description = "Inference failure", body = crate::error::ErrorResponse),
    ),
    tag = "ask"
)]
#[tracing::instrument(skip(state, request))]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AskRequest>,
) -> Result<Json<AskResponse>, HttpAppError> {
    request
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    validate_question(
        &request.question,
        state.config.min_question_length(),
        state.config.max_question_length(),
    )?;
    validate_file_url(&request.file_url)?;

    let question = request.question.trim();
    let start = Instant::now();
    let timeout = Duration::from_secs(state.config.ask_timeout_secs());
    let answer = tokio::time::timeout(timeout, state.vqa.ask(&request.file_url, question))
        .await
        .map_err(|_| {
            AppError::UpstreamTimeout(format!(
                "Inference request timed out after {}s",
                timeout.as_secs()
            ))
        })??;

    Ok(Json(AskResponse {
        success: true,
        answer: answer.answer,
        confidence: answer.confidence,
        file_url: request.file_url,
        question: question.to_string(),
        processing_time: Some(start.elapsed().as_secs_f64()),
    }))
}
