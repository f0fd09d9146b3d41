mod credentials;


pub use credentials::{
    CredentialProvider, Credentials, EnvCredentials, StaticCredentials, PASSWORD_ENV, USERNAME_ENV,
};

use crate::api::DEFAULT_BASE_URL;
use crate::uploader::{DEFAULT_BACKOFF_SECS, DEFAULT_BATCH_SIZE, DEFAULT_RETRY_CEILING};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Everything a run needs to talk to the API. Built once in `main` and
/// handed to the client and uploader.
pub struct ApiConfig {
    pub endpoint_url: String,
    pub credential_provider: Box<dyn CredentialProvider>,
    pub batch_size: usize,
    pub retry_ceiling: u32,
    pub default_backoff_seconds: u64,
    /// Per-request timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("batch_size", &self.batch_size)
            .field("retry_ceiling", &self.retry_ceiling)
            .field("default_backoff_seconds", &self.default_backoff_seconds)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }
}

/// Builder for [`ApiConfig`]
pub struct ApiConfigBuilder {
    endpoint_url: String,
    credential_provider: Box<dyn CredentialProvider>,
    batch_size: usize,
    retry_ceiling: u32,
    default_backoff_seconds: u64,
    timeout: Option<Duration>,
}

impl ApiConfigBuilder {
    /// Defaults: public US platform, credentials from the environment,
    /// 1000 names per batch, 5 attempts, 10 second backoff.
    pub fn new() -> Self {
        Self {
            endpoint_url: DEFAULT_BASE_URL.to_string(),
            credential_provider: Box::new(EnvCredentials::default()),
            batch_size: DEFAULT_BATCH_SIZE,
            retry_ceiling: DEFAULT_RETRY_CEILING,
            default_backoff_seconds: DEFAULT_BACKOFF_SECS,
            timeout: None,
        }
    }

    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credential_provider = Box::new(provider);
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn retry_ceiling(mut self, attempts: u32) -> Self {
        self.retry_ceiling = attempts;
        self
    }

    pub fn default_backoff_seconds(mut self, secs: u64) -> Self {
        self.default_backoff_seconds = secs;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let endpoint_url = self.endpoint_url.trim().trim_end_matches('/').to_string();
        if !(endpoint_url.starts_with("https://") || endpoint_url.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint_url));
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.retry_ceiling == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_ceiling",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(ApiConfig {
            endpoint_url,
            credential_provider: self.credential_provider,
            batch_size: self.batch_size,
            retry_ceiling: self.retry_ceiling,
            default_backoff_seconds: self.default_backoff_seconds,
            timeout: self.timeout,
        })
    }
}

impl Default for ApiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
