// Public API exports
pub mod api;
pub mod commands;
pub mod config;
pub mod export;
pub mod input;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod security;
pub mod uploader;

// Re-export main types for convenience
pub use api::{ApiError, QualysClient};
pub use config::{ApiConfig, ApiConfigBuilder, ConfigError, CredentialProvider, Credentials};
pub use config::{EnvCredentials, StaticCredentials};

pub use uploader::{
    Batcher, BatchRecord, BatchStatus, BatchSubmitter, BatchUploader, HaltReason, RunOutcome,
    Sleeper, SubmitStatus, ThreadSleeper, UploadError, UploadReport,
};

pub use parser::{AssetSet, OptionProfile, ProfileScan, XmlError};
pub use input::{read_hostnames, InputError};
pub use export::{ExportError, ProfileWriter};
pub use security::FilenameSanitizer;
