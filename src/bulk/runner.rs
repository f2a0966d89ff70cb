//! Sequential bulk runner.
//!
//! Jobs run strictly one after another in input order. Every transition
//! produces a new [`Batch`] snapshot, published as a [`BatchEvent`] to an
//! optional observer channel.

use crate::bulk::batch::{Batch, BatchStats};
use crate::bulk::event::{BatchEvent, BatchEventKind};
use crate::error::ApiError;
use crate::generation::EmailGenerator;
use crate::types::{Lead, SenderStrategy};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const CANCELLED_MESSAGE: &str = "Cancelled";
pub const CANCELLED_BEFORE_START_MESSAGE: &str = "Cancelled before generation";

/// Final state of a bulk run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub batch: Arc<Batch>,
    pub cancelled: bool,
    pub events_published: u64,
    pub duration: Duration,
}

impl BatchReport {
    pub fn stats(&self) -> BatchStats {
        self.batch.stats()
    }
}

struct Publisher<'a> {
    events: Option<&'a UnboundedSender<BatchEvent>>,
    seq: u64,
    observer_gone: bool,
}

impl Publisher<'_> {
    /// Best effort: a dropped observer never stops the run.
    fn publish(&mut self, kind: BatchEventKind, snapshot: &Arc<Batch>) {
        self.seq += 1;
        let Some(events) = self.events else {
            return;
        };
        if events
            .send(BatchEvent::new(self.seq, kind, Arc::clone(snapshot)))
            .is_err()
            && !self.observer_gone
        {
            self.observer_gone = true;
            debug!("Batch observer dropped; continuing without events");
        }
    }
}

pub struct BulkJobRunner {
    generator: Arc<dyn EmailGenerator>,
    events: Option<UnboundedSender<BatchEvent>>,
    delay: Option<Duration>,
}

impl BulkJobRunner {
    pub fn new(
        generator: Arc<dyn EmailGenerator>,
        events: Option<UnboundedSender<BatchEvent>>,
    ) -> Self {
        Self {
            generator,
            events,
            delay: None,
        }
    }

    /// Pause between consecutive generation calls.
    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay.filter(|d| !d.is_zero());
        self
    }

    /// Run every lead once, never cancelled.
    pub async fn run_to_completion(
        &self,
        strategy: &SenderStrategy,
        leads: Vec<Lead>,
    ) -> Result<BatchReport, ApiError> {
        self.run(strategy, leads, CancellationToken::new()).await
    }

    /// Run the batch. On cancellation the in-flight job and all pending jobs end
    /// as errors, so the final snapshot is always fully terminal.
    pub async fn run(
        &self,
        strategy: &SenderStrategy,
        leads: Vec<Lead>,
        cancel: CancellationToken,
    ) -> Result<BatchReport, ApiError> {
        strategy.validate()?;

        let started_at = Instant::now();
        let mut publisher = Publisher {
            events: self.events.as_ref(),
            seq: 0,
            observer_gone: false,
        };
        let mut batch = Arc::new(Batch::from_leads(leads));
        let total = batch.len();
        info!(total, "Bulk run started");
        publisher.publish(BatchEventKind::Started, &batch);

        let mut cancelled = false;
        for index in 0..total {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            if index > 0 {
                if let Some(delay) = self.delay {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            cancelled = true;
                            break;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            let Some(job) = batch.get(index) else {
                break;
            };
            let processing = job.start()?;
            let request = strategy.pitch_for(&processing.lead);
            let lead_id = processing.lead.id.clone();
            batch = Arc::new(batch.with_job(index, processing.clone()));
            publisher.publish(BatchEventKind::JobStarted { index }, &batch);

            let call_started = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.generator.generate(&request) => Some(result),
            };
            let duration_ms = call_started.elapsed().as_millis() as u64;

            match outcome {
                Some(Ok(email)) => {
                    batch = Arc::new(batch.with_job(index, processing.complete(email)?));
                    info!(index, lead_id = %lead_id, duration_ms, "Job completed");
                    publisher.publish(BatchEventKind::JobCompleted { index }, &batch);
                }
                Some(Err(err)) => {
                    let message = err.message().to_string();
                    batch = Arc::new(batch.with_job(index, processing.fail(message.clone())?));
                    warn!(index, lead_id = %lead_id, duration_ms, "Job failed");
                    publisher.publish(
                        BatchEventKind::JobFailed {
                            index,
                            error: message,
                        },
                        &batch,
                    );
                }
                None => {
                    batch = Arc::new(batch.with_job(index, processing.cancel(CANCELLED_MESSAGE)?));
                    warn!(index, lead_id = %lead_id, "Job cancelled in flight");
                    publisher.publish(
                        BatchEventKind::JobFailed {
                            index,
                            error: CANCELLED_MESSAGE.to_string(),
                        },
                        &batch,
                    );
                    cancelled = true;
                    break;
                }
            }
        }

        if cancelled {
            batch = Arc::new(cancel_pending(&batch)?);
        }

        let stats = batch.stats();
        info!(
            total = stats.total,
            completed = stats.completed,
            failed = stats.failed,
            cancelled,
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Bulk run finished"
        );
        publisher.publish(BatchEventKind::Finished { cancelled }, &batch);

        Ok(BatchReport {
            batch,
            cancelled,
            events_published: publisher.seq,
            duration: started_at.elapsed(),
        })
    }
}

fn cancel_pending(batch: &Batch) -> Result<Batch, ApiError> {
    let mut next = batch.clone();
    for (index, job) in batch.jobs().iter().enumerate() {
        if !job.status.is_terminal() {
            next = next.with_job(index, job.cancel(CANCELLED_BEFORE_START_MESSAGE)?);
        }
    }
    Ok(next)
}
