use docvqa_core::{FileValidator, ValidationError};

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Client-side pre-check of a file before uploading, mirroring the server's
/// default limits. Saves a round trip for obviously rejected files; the
/// server-side check stays authoritative.
pub fn pre_validate_file(filename: &str, size: usize) -> Result<(), ValidationError> {
    let validator = FileValidator::new(
        10 * 1024 * 1024,
        vec![
            "jpg".to_string(),
            "jpeg".to_string(),
            "png".to_string(),
            "gif".to_string(),
            "webp".to_string(),
            "pdf".to_string(),
        ],
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
            "application/pdf".to_string(),
        ],
    );
    validator.validate_extension(filename)?;
    validator.validate_file_size(size)?;
    Ok(())
}
