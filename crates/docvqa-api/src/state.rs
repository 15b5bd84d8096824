use docvqa_core::{Config, FileValidator};
use docvqa_inference::VqaModel;
use docvqa_storage::Storage;
use std::sync::Arc;

/// Shared application state passed to every handler.
///
/// Storage and inference are trait objects so the endpoint tests can swap in
/// in-memory fakes without touching the router.
pub struct AppState {
    pub config: Config,
    pub validator: FileValidator,
    pub storage: Arc<dyn Storage>,
    pub vqa: Arc<dyn VqaModel>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>, vqa: Arc<dyn VqaModel>) -> Self {
        let validator = FileValidator::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
            config.allowed_content_types().to_vec(),
        );
        Self {
            config,
            validator,
            storage,
            vqa,
        }
    }
}
