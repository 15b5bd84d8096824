//! VQA model abstraction trait

use async_trait::async_trait;
use thiserror::Error;

/// Inference operation errors.
///
/// `Network` means no response was received at all; `Api` means the remote
/// returned a well-formed error response. `ModelLoading` is the retry-later
/// case callers are told to retry after a short delay.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model is loading, please try again in a few moments")]
    ModelLoading,

    #[error("Invalid inference API token")]
    Unauthorized,

    #[error("Inference API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Inference request timed out")]
    Timeout,

    #[error("Inference API unreachable: {0}")]
    Network(String),

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("Inference not configured: {0}")]
    NotConfigured(String),
}

/// Result type for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Answer returned by the VQA model.
#[derive(Debug, Clone, PartialEq)]
pub struct VqaAnswer {
    pub answer: String,
    /// Model-reported confidence in [0, 1].
    pub confidence: f64,
}

/// Hosted VQA model abstraction
///
/// One call per question; no retry, batching, or caching. The caller applies
/// its own timeout around `ask`.
#[async_trait]
pub trait VqaModel: Send + Sync {
    /// Ask a question about the file at `file_url`.
    async fn ask(&self, file_url: &str, question: &str) -> InferenceResult<VqaAnswer>;

    /// Lightweight reachability probe for the health endpoint.
    async fn health_check(&self) -> bool;

    /// Model identifier for diagnostics (e.g. "Salesforce/blip-vqa-base").
    fn model_id(&self) -> &str;
}
