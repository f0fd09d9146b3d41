use super::UploadReport;
use crate::api::ApiError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Retry ceiling must be at least 1 attempt")]
    InvalidRetryCeiling,

    /// `report` holds every batch recorded before the failure
    #[error("Batch {batch} attempt {attempt} could not reach the server: {source}")]
    Transport {
        batch: usize,
        attempt: u32,
        #[source]
        source: ApiError,
        report: Box<UploadReport>,
    },
}

impl UploadError {
    /// Batches already sent when the run broke off, if any were attempted
    pub fn partial_report(&self) -> Option<&UploadReport> {
        match self {
            UploadError::Transport { report, .. } => Some(&**report),
            _ => None,
        }
    }
}

/// Why a run stopped before its last batch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HaltReason {
    #[error("server rejected the batch with status {status}: {detail}")]
    RemoteRejected { status: u16, detail: String },

    #[error("still rate limited after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}
