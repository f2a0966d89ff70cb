//! Batch: an immutable, ordered snapshot of every job in a bulk run.

use crate::bulk::job::{Job, JobStatus};
use crate::types::Lead;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    jobs: Vec<Job>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl Batch {
    pub fn from_leads(leads: Vec<Lead>) -> Self {
        Self {
            jobs: leads.into_iter().map(Job::pending).collect(),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// A new batch with the job at `index` replaced. Out-of-range indices leave it unchanged.
    pub fn with_job(&self, index: usize, job: Job) -> Batch {
        let mut jobs = self.jobs.clone();
        if let Some(slot) = jobs.get_mut(index) {
            *slot = job;
        }
        Batch { jobs }
    }

    pub fn stats(&self) -> BatchStats {
        self.jobs.iter().fold(
            BatchStats {
                total: self.jobs.len(),
                ..BatchStats::default()
            },
            |mut stats, job| {
                match job.status {
                    JobStatus::Pending => stats.pending += 1,
                    JobStatus::Processing => stats.processing += 1,
                    JobStatus::Completed => stats.completed += 1,
                    JobStatus::Error => stats.failed += 1,
                }
                stats
            },
        )
    }

    pub fn completed_count(&self) -> usize {
        self.stats().completed
    }

    /// Share of completed jobs, 0.0 to 100.0. An empty batch reports 0.
    pub fn progress_percent(&self) -> f64 {
        if self.jobs.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.jobs.len() as f64 * 100.0
    }

    pub fn processing_index(&self) -> Option<usize> {
        self.jobs
            .iter()
            .position(|job| job.status == JobStatus::Processing)
    }

    pub fn is_finished(&self) -> bool {
        self.jobs.iter().all(|job| job.status.is_terminal())
    }
}
