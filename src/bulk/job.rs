//! Job: one lead plus its generation outcome.

use crate::error::TransitionError;
use crate::mailto::mailto_uri;
use crate::types::{GeneratedEmail, Lead};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `result` is set only when completed, `error` only on error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub lead: Lead,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GeneratedEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn pending(lead: Lead) -> Self {
        Self {
            lead,
            status: JobStatus::Pending,
            result: None,
            error: None,
        }
    }

    pub fn start(&self) -> Result<Job, TransitionError> {
        self.transition(JobStatus::Processing, &[JobStatus::Pending])
    }

    pub fn complete(&self, email: GeneratedEmail) -> Result<Job, TransitionError> {
        let mut job = self.transition(JobStatus::Completed, &[JobStatus::Processing])?;
        job.result = Some(email);
        Ok(job)
    }

    pub fn fail(&self, message: impl Into<String>) -> Result<Job, TransitionError> {
        let mut job = self.transition(JobStatus::Error, &[JobStatus::Processing])?;
        job.error = Some(message.into());
        Ok(job)
    }

    /// Cancellation may also close a job that never started.
    pub fn cancel(&self, message: impl Into<String>) -> Result<Job, TransitionError> {
        let mut job =
            self.transition(JobStatus::Error, &[JobStatus::Pending, JobStatus::Processing])?;
        job.error = Some(message.into());
        Ok(job)
    }

    pub fn mail_uri(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|email| mailto_uri(self.lead.recipient_email.as_deref(), email))
    }

    fn transition(&self, to: JobStatus, allowed_from: &[JobStatus]) -> Result<Job, TransitionError> {
        if !allowed_from.contains(&self.status) {
            return Err(TransitionError {
                lead_id: self.lead.id.clone(),
                from: self.status,
                to,
            });
        }
        Ok(Job {
            lead: self.lead.clone(),
            status: to,
            result: None,
            error: None,
        })
    }
}
