//! DocVQA Core Library
//!
//! Shared types for the DocVQA service: configuration, the unified error
//! taxonomy, wire models, and pure input validation. No I/O happens in this
//! crate; network-facing code lives in docvqa-storage, docvqa-inference,
//! and docvqa-api.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AskRequest, AskResponse, HealthConfiguration, HealthResponse, ServiceStatus, UploadResponse,
};
pub use validation::{FileValidator, ValidationError};
