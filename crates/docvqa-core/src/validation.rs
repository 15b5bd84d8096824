//! Upload and question validation.
//!
//! Pure functions over declared metadata: no I/O, deterministic given the
//! same inputs. The server-side checks here are authoritative; the CLI
//! mirrors them client-side only as a user-experience shortcut.

use std::path::Path;

/// Validation failures for uploaded files and questions
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large ({size_mb:.1}MB). Maximum size: {max_mb:.1}MB")]
    FileTooLarge { size_mb: f64, max_mb: f64 },

    #[error("Unsupported file type '.{extension}'. Allowed: {}", allowed.join(", "))]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Unsupported content type '{content_type}'. Allowed: {}", allowed.join(", "))]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Content type '{content_type}' does not match file extension '.{extension}'")]
    ContentTypeMismatch {
        extension: String,
        content_type: String,
    },

    #[error("No filename provided")]
    MissingFilename,

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Empty file provided")]
    EmptyFile,

    #[error("Question must be at least {min} characters long")]
    QuestionTooShort { min: usize },

    #[error("Question exceeds maximum length of {max} characters")]
    QuestionTooLong { max: usize },

    #[error("fileUrl must be an http(s) URL")]
    InvalidFileUrl,
}

/// Validator for uploaded files.
///
/// Checks declared metadata (filename, content type, size) against the
/// configured allow-lists before any network call is made.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl FileValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    /// Validate filename, content type, and size in one pass.
    pub fn validate(
        &self,
        filename: &str,
        content_type: &str,
        size: usize,
    ) -> Result<(), ValidationError> {
        let extension = self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        validate_extension_content_type_match(&extension, content_type)?;
        self.validate_file_size(size)?;
        Ok(())
    }

    /// Validate file size. Zero-byte files are rejected.
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size_mb: size as f64 / (1024.0 * 1024.0),
                max_mb: self.max_file_size as f64 / (1024.0 * 1024.0),
            });
        }

        Ok(())
    }

    /// Validate file extension, returning the normalized extension.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        if filename.is_empty() {
            return Err(ValidationError::MissingFilename);
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Validate declared content type against the allow-list.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }
}

/// Cross-check the declared Content-Type against the file extension.
/// Prevents Content-Type spoofing where a disallowed payload is uploaded
/// under a legitimate declared type.
fn validate_extension_content_type_match(
    extension: &str,
    content_type: &str,
) -> Result<(), ValidationError> {
    let normalized = content_type.to_lowercase();

    let expected: &[&str] = match extension {
        "jpg" | "jpeg" => &["image/jpeg"],
        "png" => &["image/png"],
        "gif" => &["image/gif"],
        "webp" => &["image/webp"],
        "pdf" => &["application/pdf"],
        _ => {
            // Unknown extensions were already filtered by the allow-list;
            // skip cross-validation for anything configured beyond the defaults.
            tracing::debug!(
                extension = %extension,
                content_type = %content_type,
                "Unknown extension, skipping Content-Type/extension cross-validation"
            );
            return Ok(());
        }
    };

    if !expected.iter().any(|ct| ct == &normalized) {
        return Err(ValidationError::ContentTypeMismatch {
            extension: extension.to_string(),
            content_type: content_type.to_string(),
        });
    }

    Ok(())
}

/// Validate a question string against configured length bounds.
/// The question is trimmed before checking, so whitespace-only input is
/// rejected as too short.
pub fn validate_question(
    question: &str,
    min_length: usize,
    max_length: usize,
) -> Result<(), ValidationError> {
    let trimmed = question.trim();
    if trimmed.chars().count() < min_length {
        return Err(ValidationError::QuestionTooShort { min: min_length });
    }
    if trimmed.chars().count() > max_length {
        return Err(ValidationError::QuestionTooLong { max: max_length });
    }
    Ok(())
}

/// Validate that a file URL is a plausible http(s) URL.
pub fn validate_file_url(file_url: &str) -> Result<(), ValidationError> {
    let lowered = file_url.to_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .ok_or(ValidationError::InvalidFileUrl)?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ValidationError::InvalidFileUrl);
    }
    Ok(())
}
