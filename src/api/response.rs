use crate::uploader::SubmitStatus;

/// Header carrying the server's suggested wait after a 429
pub const RATE_LIMIT_WAIT_HEADER: &str = "X-RateLimit-ToWait-Sec";

/// Map an `action=edit` response onto a submission status.
///
/// Only 200 counts as success. A 429 is retryable; its wait header is
/// optional and ignored when it is not a whole number of seconds.
pub fn classify_edit_response(status: u16, wait_header: Option<&str>, body: String) -> SubmitStatus {
    match status {
        200 => SubmitStatus::Success,
        429 => SubmitStatus::RateLimited {
            retry_after_secs: wait_header.and_then(parse_wait_seconds),
        },
        _ => SubmitStatus::Failed {
            status,
            detail: body,
        },
    }
}

pub fn parse_wait_seconds(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
