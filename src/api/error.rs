use crate::config::ConfigError;
use crate::parser::XmlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Asset group {0} not found; check the asset group ID and your permissions")]
    AssetGroupNotFound(String),

    #[error("Endpoint not found: {0}; check the API base URL")]
    EndpointNotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to parse response XML: {0}")]
    Xml(#[from] XmlError),

    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),
}
