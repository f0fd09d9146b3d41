mod batcher;
mod error;
mod report;
mod sleeper;
mod status;


pub use batcher::Batcher;
pub use error::{HaltReason, UploadError};
pub use report::{BatchRecord, BatchStatus, RunOutcome, UploadReport};
pub use sleeper::{Sleeper, ThreadSleeper};
pub use status::{BatchSubmitter, SubmitStatus};

use crate::config::ApiConfig;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default items per request; keeps `add_dns_names` well under the
/// ~20,000 character limit the server enforces.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Attempts per batch before a rate-limited batch halts the run
pub const DEFAULT_RETRY_CEILING: u32 = 5;

/// Wait used when a 429 carries no usable wait header
pub const DEFAULT_BACKOFF_SECS: u64 = 10;

/// Hard failure inside one batch, before the run report is attached
struct Unreachable {
    attempt: u32,
    source: crate::api::ApiError,
}

/// Sequential batch submitter with a bounded per-batch retry on rate limiting.
///
/// Batches go out one at a time in input order. A rate-limited batch is
/// retried after the server's suggested wait (or the default backoff) until
/// the retry ceiling is reached. Any other failure stops the whole run.
pub struct BatchUploader<S: Sleeper = ThreadSleeper> {
    batcher: Batcher,
    retry_ceiling: u32,
    default_backoff: Duration,
    sleeper: S,
}

impl BatchUploader<ThreadSleeper> {
    pub fn new(
        batch_size: usize,
        retry_ceiling: u32,
        default_backoff: Duration,
    ) -> Result<Self, UploadError> {
        if retry_ceiling == 0 {
            return Err(UploadError::InvalidRetryCeiling);
        }

        Ok(Self {
            batcher: Batcher::new(batch_size)?,
            retry_ceiling,
            default_backoff,
            sleeper: ThreadSleeper,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, UploadError> {
        Self::new(
            config.batch_size,
            config.retry_ceiling,
            Duration::from_secs(config.default_backoff_seconds),
        )
    }
}

impl Default for BatchUploader<ThreadSleeper> {
    fn default() -> Self {
        Self {
            batcher: Batcher::default(),
            retry_ceiling: DEFAULT_RETRY_CEILING,
            default_backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
            sleeper: ThreadSleeper,
        }
    }
}

impl<S: Sleeper> BatchUploader<S> {
    /// Swap the backoff implementation
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> BatchUploader<T> {
        BatchUploader {
            batcher: self.batcher,
            retry_ceiling: self.retry_ceiling,
            default_backoff: self.default_backoff,
            sleeper,
        }
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn batch_size(&self) -> usize {
        self.batcher.batch_size()
    }

    pub fn retry_ceiling(&self) -> u32 {
        self.retry_ceiling
    }

    /// Submit `items` for `target_id` in order, stopping at the first batch
    /// that cannot be delivered.
    ///
    /// A halted run is still `Ok`; inspect [`UploadReport::outcome`]. `Err`
    /// means a hard failure while talking to the server.
    pub fn upload<B>(
        &mut self,
        target_id: &str,
        items: &[String],
        submitter: &mut B,
    ) -> Result<UploadReport, UploadError>
    where
        B: BatchSubmitter + ?Sized,
    {
        let batches = self.batcher.split(items);
        let mut report = UploadReport::new(target_id, items.len(), batches.len());

        info!(
            run_id = %report.run_id,
            target_id,
            items = items.len(),
            batches = batches.len(),
            batch_size = self.batcher.batch_size(),
            "Starting batch upload"
        );

        for (index, batch) in batches.into_iter().enumerate() {
            let record = match self.submit_batch(target_id, index, batch, submitter) {
                Ok(record) => record,
                Err(Unreachable { attempt, source }) => {
                    report.abort(index, attempt, source.to_string());
                    report.finish();
                    warn!(
                        run_id = %report.run_id,
                        batch = index + 1,
                        attempt,
                        accepted = report.succeeded_batches(),
                        error = %source,
                        "Upload aborted"
                    );
                    return Err(UploadError::Transport {
                        batch: index + 1,
                        attempt,
                        source,
                        report: Box::new(report),
                    });
                }
            };
            let halted = record.halt_reason().is_some();
            report.record(record);

            if halted {
                break;
            }
        }

        report.finish();

        match &report.outcome {
            RunOutcome::Completed => info!(
                run_id = %report.run_id,
                batches = report.total_batches,
                attempts = report.total_attempts(),
                "Upload completed"
            ),
            RunOutcome::Halted { batch, reason } => warn!(
                run_id = %report.run_id,
                batch = batch + 1,
                remaining = report.total_batches - batch - 1,
                %reason,
                "Upload halted"
            ),
            RunOutcome::Aborted { .. } => {}
        }

        Ok(report)
    }

    fn submit_batch<B>(
        &mut self,
        target_id: &str,
        index: usize,
        batch: &[String],
        submitter: &mut B,
    ) -> Result<BatchRecord, Unreachable>
    where
        B: BatchSubmitter + ?Sized,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(batch = index + 1, attempt, items = batch.len(), "Submitting batch");

            let status = submitter
                .submit(target_id, batch)
                .map_err(|source| Unreachable { attempt, source })?;

            match status {
                SubmitStatus::Success => {
                    info!(batch = index + 1, attempt, items = batch.len(), "Batch accepted");
                    return Ok(BatchRecord::succeeded(index, batch.len(), attempt));
                }
                SubmitStatus::RateLimited { retry_after_secs } => {
                    if attempt >= self.retry_ceiling {
                        warn!(batch = index + 1, attempt, "Rate limited on final attempt");
                        return Ok(BatchRecord::halted(
                            index,
                            batch.len(),
                            attempt,
                            HaltReason::RetriesExhausted { attempts: attempt },
                        ));
                    }

                    let wait = retry_after_secs
                        .map(Duration::from_secs)
                        .unwrap_or(self.default_backoff);
                    warn!(
                        batch = index + 1,
                        attempt,
                        retry_after_secs = wait.as_secs(),
                        "Rate limit exceeded, backing off"
                    );
                    self.sleeper.sleep(wait);
                }
                SubmitStatus::Failed { status, detail } => {
                    warn!(batch = index + 1, attempt, status, %detail, "Batch rejected");
                    return Ok(BatchRecord::halted(
                        index,
                        batch.len(),
                        attempt,
                        HaltReason::RemoteRejected { status, detail },
                    ));
                }
            }
        }
    }
}
