use crate::api::ApiError;

/// Expected outcome of one submission attempt.
///
/// Hard failures (network unreachable, unreadable body) are not statuses;
/// they travel on the `Err` side of [`BatchSubmitter::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// The batch was accepted
    Success,
    /// HTTP 429; the server may say how long to wait
    RateLimited { retry_after_secs: Option<u64> },
    /// Any other response; terminal for the run
    Failed { status: u16, detail: String },
}

/// Sends one batch of items to the remote service for a target.
pub trait BatchSubmitter {
    fn submit(&mut self, target_id: &str, batch: &[String]) -> Result<SubmitStatus, ApiError>;
}

impl<F> BatchSubmitter for F
where
    F: FnMut(&str, &[String]) -> Result<SubmitStatus, ApiError>,
{
    fn submit(&mut self, target_id: &str, batch: &[String]) -> Result<SubmitStatus, ApiError> {
        self(target_id, batch)
    }
}
