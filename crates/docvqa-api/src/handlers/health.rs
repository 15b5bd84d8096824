//! Health and service info handlers.

use crate::state::AppState;
use axum::{extract::State, Json};
use docvqa_core::{HealthConfiguration, HealthResponse, ServiceStatus};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Basic service info at the root path.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service info")),
    tag = "health"
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "docvqa-api",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}

/// Detailed health report.
///
/// Probes storage and inference with a short timeout each. A degraded
/// dependency is reported but does not fail the endpoint; orchestrators
/// decide what to do with "degraded".
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health report", body = HealthResponse)),
    tag = "health"
)]
#[tracing::instrument(skip(state))]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let storage = probe_storage(&state).await;
    let inference = probe_inference(&state).await;

    let status = if storage.status == "ok" && inference.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage,
        inference,
        configuration: HealthConfiguration {
            max_file_size_mb: state.config.max_file_size_bytes() as f64 / (1024.0 * 1024.0),
            allowed_extensions: state.config.allowed_extensions().to_vec(),
            max_question_length: state.config.max_question_length(),
        },
    })
}

async fn probe_storage(state: &AppState) -> ServiceStatus {
    let backend = state.storage.backend_type().as_str().to_string();
    // A head on a key that does not exist still proves the backend answers.
    let probe = state.storage.exists("health/probe");
    match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
        Ok(Ok(_)) => ServiceStatus {
            configured: true,
            status: "ok".to_string(),
            detail: Some(backend),
        },
        Ok(Err(e)) => ServiceStatus {
            configured: true,
            status: "error".to_string(),
            detail: Some(e.to_string()),
        },
        Err(_) => ServiceStatus {
            configured: true,
            status: "timeout".to_string(),
            detail: Some(backend),
        },
    }
}

async fn probe_inference(state: &AppState) -> ServiceStatus {
    let model = state.vqa.model_id().to_string();
    match tokio::time::timeout(PROBE_TIMEOUT, state.vqa.health_check()).await {
        Ok(true) => ServiceStatus {
            configured: true,
            status: "ok".to_string(),
            detail: Some(model),
        },
        Ok(false) => ServiceStatus {
            configured: true,
            status: "unreachable".to_string(),
            detail: Some(model),
        },
        Err(_) => ServiceStatus {
            configured: true,
            status: "timeout".to_string(),
            detail: Some(model),
        },
    }
}
