use super::HaltReason;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Final state of a single attempted batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BatchStatus {
    Succeeded,
    Halted { reason: HaltReason },
}

/// What happened to one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    /// Zero-based position in the batch list
    pub index: usize,
    /// Number of items in the batch
    pub items: usize,
    /// Submission attempts made, including rate-limited ones
    pub attempts: u32,
    pub status: BatchStatus,
}

impl BatchRecord {
    pub fn succeeded(index: usize, items: usize, attempts: u32) -> Self {
        Self {
            index,
            items,
            attempts,
            status: BatchStatus::Succeeded,
        }
    }

    pub fn halted(index: usize, items: usize, attempts: u32, reason: HaltReason) -> Self {
        Self {
            index,
            items,
            attempts,
            status: BatchStatus::Halted { reason },
        }
    }

    /// One-based batch number, as shown to users
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn halt_reason(&self) -> Option<&HaltReason> {
        match &self.status {
            BatchStatus::Succeeded => None,
            BatchStatus::Halted { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    /// `batch` is the zero-based index of the batch that stopped the run
    Halted { batch: usize, reason: HaltReason },
    /// The server stopped answering during `batch`; whether that batch was
    /// applied is unknown
    Aborted {
        batch: usize,
        attempt: u32,
        error: String,
    },
}

/// Structured result of one upload run
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub run_id: Uuid,
    pub target_id: String,
    pub total_items: usize,
    pub total_batches: usize,
    pub batches: Vec<BatchRecord>,
    pub outcome: RunOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl UploadReport {
    pub(crate) fn new(target_id: &str, total_items: usize, total_batches: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            target_id: target_id.to_string(),
            total_items,
            total_batches,
            batches: Vec::with_capacity(total_batches),
            outcome: RunOutcome::Completed,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub(crate) fn record(&mut self, record: BatchRecord) {
        if let Some(reason) = record.halt_reason() {
            self.outcome = RunOutcome::Halted {
                batch: record.index,
                reason: reason.clone(),
            };
        }
        self.batches.push(record);
    }

    pub(crate) fn abort(&mut self, index: usize, attempt: u32, error: String) {
        self.outcome = RunOutcome::Aborted {
            batch: index,
            attempt,
            error,
        };
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    /// Total attempts across all batches, i.e. requests put on the wire
    pub fn total_attempts(&self) -> u32 {
        self.batches.iter().map(|b| b.attempts).sum()
    }

    pub fn succeeded_batches(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| b.status == BatchStatus::Succeeded)
            .count()
    }

    /// Items the server accepted before the run ended
    pub fn submitted_items(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| b.status == BatchStatus::Succeeded)
            .map(|b| b.items)
            .sum()
    }
}
