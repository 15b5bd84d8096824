//! HuggingFace Inference API client for visual question answering.

use crate::traits::{InferenceError, InferenceResult, VqaAnswer, VqaModel};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// HuggingFace Inference API client.
///
/// Sends `{"inputs": {"image": url, "question": text}}` to a hosted model
/// endpoint and parses the `[{"answer", "score"}]` response.
pub struct HuggingFaceVqa {
    http_client: reqwest::Client,
    api_token: String,
    model_url: String,
    model_id: String,
}

#[derive(Debug, Serialize)]
struct VqaRequest<'a> {
    inputs: VqaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct VqaInputs<'a> {
    image: &'a str,
    question: &'a str,
}

impl HuggingFaceVqa {
    /// Create a new client.
    ///
    /// `request_timeout` bounds each HTTP call; callers typically wrap `ask`
    /// in their own slightly larger timeout as well.
    pub fn new(
        api_token: String,
        model_url: String,
        request_timeout: Duration,
    ) -> InferenceResult<Self> {
        if api_token.is_empty() {
            return Err(InferenceError::NotConfigured(
                "HUGGINGFACE_API_TOKEN is empty".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                InferenceError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        let model_id = model_id_from_url(&model_url);

        Ok(Self {
            http_client,
            api_token,
            model_url,
            model_id,
        })
    }

    async fn send_request(&self, file_url: &str, question: &str) -> InferenceResult<Value> {
        let body = VqaRequest {
            inputs: VqaInputs {
                image: file_url,
                question,
            },
        };

        tracing::info!(
            model = %self.model_id,
            question = %preview(question, 50),
            "Sending VQA request"
        );

        let response = self
            .http_client
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout
                } else {
                    InferenceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 503 {
            return Err(InferenceError::ModelLoading);
        }
        if status.as_u16() == 401 {
            return Err(InferenceError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // The API reports errors as {"error": "..."}; fall back to raw text.
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(text);
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| InferenceError::MalformedResponse(e.to_string()))
    }
}

/// Extract the model id from an Inference API model URL
/// ("https://.../models/Salesforce/blip-vqa-base" -> "Salesforce/blip-vqa-base").
fn model_id_from_url(model_url: &str) -> String {
    model_url
        .split_once("/models/")
        .map(|(_, id)| id.trim_matches('/').to_string())
        .unwrap_or_else(|| model_url.to_string())
}

/// Status endpoint for a model URL, if it follows the Inference API layout.
fn status_url(model_url: &str) -> Option<String> {
    model_url
        .split_once("/models/")
        .map(|(base, id)| format!("{}/status/{}", base, id.trim_matches('/')))
}

/// Parse the model response into an answer and confidence.
///
/// The usual shape is a non-empty array of `{"answer", "score"}` candidates
/// ordered by score; a bare object with an `answer` field is also accepted
/// (score defaults to 0.5, matching observed API behavior). Anything else is
/// malformed, which is a distinct failure from a network error.
pub fn parse_response(value: &Value) -> InferenceResult<VqaAnswer> {
    let candidate = match value {
        Value::Array(items) => items.first().ok_or_else(|| {
            InferenceError::MalformedResponse("empty candidate list".to_string())
        })?,
        Value::Object(_) => value,
        other => {
            return Err(InferenceError::MalformedResponse(format!(
                "unexpected response shape: {}",
                other
            )))
        }
    };

    let answer = candidate
        .get("answer")
        .and_then(|a| a.as_str())
        .ok_or_else(|| {
            InferenceError::MalformedResponse("candidate has no answer field".to_string())
        })?;

    let confidence = candidate
        .get("score")
        .and_then(|s| s.as_f64())
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    Ok(VqaAnswer {
        answer: answer.to_string(),
        confidence,
    })
}

fn preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[async_trait]
impl VqaModel for HuggingFaceVqa {
    async fn ask(&self, file_url: &str, question: &str) -> InferenceResult<VqaAnswer> {
        let start = std::time::Instant::now();
        let raw = self.send_request(file_url, question).await?;
        let answer = parse_response(&raw)?;

        tracing::info!(
            model = %self.model_id,
            question = %preview(question, 30),
            answer = %preview(&answer.answer, 30),
            confidence = answer.confidence,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "VQA request completed"
        );

        Ok(answer)
    }

    async fn health_check(&self) -> bool {
        let Some(url) = status_url(&self.model_url) else {
            return false;
        };

        match self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Inference status check failed");
                false
            }
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
