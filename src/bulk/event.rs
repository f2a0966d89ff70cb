//! Events published by the bulk runner.

use crate::bulk::batch::Batch;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEventKind {
    Started,
    JobStarted { index: usize },
    JobCompleted { index: usize },
    JobFailed { index: usize, error: String },
    Finished { cancelled: bool },
}

/// One published state change, with the full batch as it stands afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEvent {
    pub seq: u64,
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    pub kind: BatchEventKind,
    pub snapshot: Arc<Batch>,
    /// False only on `Finished`
    pub processing: bool,
}

impl BatchEvent {
    pub fn new(seq: u64, kind: BatchEventKind, snapshot: Arc<Batch>) -> Self {
        let processing = !matches!(kind, BatchEventKind::Finished { .. });
        Self {
            seq,
            ts: chrono::Utc::now().timestamp_millis(),
            kind,
            snapshot,
            processing,
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.processing
    }
}
