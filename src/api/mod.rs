mod client;
mod error;
mod response;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{QualysClient, ASSET_GROUP_PATH, OPTION_PROFILE_PATH};
pub use error::ApiError;
pub use response::{classify_edit_response, parse_wait_seconds, RATE_LIMIT_WAIT_HEADER};

/// Default platform URL; other Qualys platforms use their own host
pub const DEFAULT_BASE_URL: &str = "https://qualysapi.qualys.com";
