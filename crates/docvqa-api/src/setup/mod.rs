//! Application setup and initialization
//!
//! Initialization logic lives here instead of main.rs so the endpoint tests
//! can assemble the same router over fake backends.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use docvqa_core::Config;
use docvqa_inference::HuggingFaceVqa;
use docvqa_storage::create_storage;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the application: validate config, build backends, wire routes.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = create_storage(&config).context("Failed to initialize object storage")?;

    let client_timeout_secs = inference_client_timeout_secs(config.ask_timeout_secs());
    let vqa = HuggingFaceVqa::new(
        config.huggingface_api_token().unwrap_or_default().to_string(),
        config.huggingface_model_url().to_string(),
        Duration::from_secs(client_timeout_secs),
    )
    .context("Failed to initialize inference client")?;

    let state = Arc::new(AppState::new(config.clone(), storage, Arc::new(vqa)));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// The HTTP client times out a little before the handler's deadline so a
/// hung connection surfaces as an inference error, not a handler timeout.
fn inference_client_timeout_secs(ask_timeout_secs: u64) -> u64 {
    ask_timeout_secs.saturating_sub(5).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_timeout_stays_below_handler_deadline() {
        assert_eq!(inference_client_timeout_secs(90), 85);
        assert_eq!(inference_client_timeout_secs(6), 1);
        // Tiny deadlines never collapse to zero
        assert_eq!(inference_client_timeout_secs(3), 1);
        assert_eq!(inference_client_timeout_secs(0), 1);
    }
}
