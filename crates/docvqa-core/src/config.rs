//! Configuration module
//!
//! All environment-derived settings are read once at process start into an
//! immutable `Config` that is passed to each component constructor. Request
//! handlers never read ambient environment state.

use std::env;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_MAX_QUESTION_LENGTH: usize = 1000;
const DEFAULT_MIN_QUESTION_LENGTH: usize = 3;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;
const DEFAULT_ASK_TIMEOUT_SECS: u64 = 90;
const DEFAULT_KEY_PREFIX: &str = "uploads";
const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/Salesforce/blip-vqa-base";

/// DocVQA service configuration.
#[derive(Clone, Debug)]
pub struct VqaServiceConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Object storage configuration
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub upload_key_prefix: String,
    // Upload limits
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    // Inference configuration
    pub huggingface_api_token: Option<String>,
    pub huggingface_model_url: String,
    // Question limits
    pub max_question_length: usize,
    pub min_question_length: usize,
    // Upstream call timeouts
    pub upload_timeout_secs: u64,
    pub ask_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<VqaServiceConfig>);

impl Config {
    fn inner(&self) -> &VqaServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = VqaServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn upload_key_prefix(&self) -> &str {
        &self.inner().upload_key_prefix
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.inner().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.inner().allowed_content_types
    }

    pub fn huggingface_api_token(&self) -> Option<&str> {
        self.inner().huggingface_api_token.as_deref()
    }

    pub fn huggingface_model_url(&self) -> &str {
        &self.inner().huggingface_model_url
    }

    pub fn max_question_length(&self) -> usize {
        self.inner().max_question_length
    }

    pub fn min_question_length(&self) -> usize {
        self.inner().min_question_length
    }

    pub fn upload_timeout_secs(&self) -> u64 {
        self.inner().upload_timeout_secs
    }

    pub fn ask_timeout_secs(&self) -> u64 {
        self.inner().ask_timeout_secs
    }
}

impl VqaServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "jpg,jpeg,png,gif,webp,pdf".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| {
                "image/jpeg,image/png,image/gif,image/webp,application/pdf".to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let config = VqaServiceConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            upload_key_prefix: env::var("UPLOAD_KEY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_content_types,
            huggingface_api_token: env::var("HUGGINGFACE_API_TOKEN").ok(),
            huggingface_model_url: env::var("HUGGINGFACE_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string()),
            max_question_length: env::var("MAX_QUESTION_LENGTH")
                .unwrap_or_else(|_| DEFAULT_MAX_QUESTION_LENGTH.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_QUESTION_LENGTH),
            min_question_length: DEFAULT_MIN_QUESTION_LENGTH,
            upload_timeout_secs: env::var("UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS),
            ask_timeout_secs: env::var("ASK_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_ASK_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_ASK_TIMEOUT_SECS),
        };

        Ok(config)
    }

    /// Fail fast on settings the service cannot run without.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.s3_bucket.as_deref().map_or(true, |b| b.is_empty()) {
            return Err(anyhow::anyhow!(
                "S3_BUCKET must be set. Uploads have nowhere to go without a bucket."
            ));
        }
        if self.s3_endpoint.is_none() && self.s3_region.as_deref().map_or(true, |r| r.is_empty()) {
            return Err(anyhow::anyhow!(
                "S3_REGION must be set when no custom S3_ENDPOINT is configured."
            ));
        }
        if self
            .huggingface_api_token
            .as_deref()
            .map_or(true, |t| t.is_empty())
        {
            return Err(anyhow::anyhow!(
                "HUGGINGFACE_API_TOKEN must be set for the ask endpoint."
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.allowed_extensions.is_empty() || self.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS and ALLOWED_CONTENT_TYPES must not be empty"
            ));
        }
        if self.min_question_length > self.max_question_length {
            return Err(anyhow::anyhow!(
                "MAX_QUESTION_LENGTH must be at least {}",
                self.min_question_length
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> VqaServiceConfig {
        VqaServiceConfig {
            server_port: 8000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            s3_bucket: Some("vqa-bucket".to_string()),
            s3_region: Some("us-east-1".to_string()),
            s3_endpoint: None,
            upload_key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_extensions: vec!["jpg".to_string(), "pdf".to_string()],
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "application/pdf".to_string(),
            ],
            huggingface_api_token: Some("hf_test".to_string()),
            huggingface_model_url: DEFAULT_MODEL_URL.to_string(),
            max_question_length: DEFAULT_MAX_QUESTION_LENGTH,
            min_question_length: DEFAULT_MIN_QUESTION_LENGTH,
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            ask_timeout_secs: DEFAULT_ASK_TIMEOUT_SECS,
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_bucket() {
        let mut config = base_config();
        config.s3_bucket = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_region_without_endpoint() {
        let mut config = base_config();
        config.s3_region = None;
        assert!(config.validate().is_err());

        config.s3_endpoint = Some("http://localhost:9000".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_token() {
        let mut config = base_config();
        config.huggingface_api_token = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn is_production_matches_both_spellings() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(Config(Box::new(config.clone())).is_production());
        config.environment = "PROD".to_string();
        assert!(Config(Box::new(config.clone())).is_production());
        config.environment = "development".to_string();
        assert!(!Config(Box::new(config)).is_production());
    }
}
