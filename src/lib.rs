//! Outreach: Cold-Outreach Email Drafting
//!
//! Turns a recipient's name, company, and a few sender preferences into an
//! email draft by delegating the writing to an LLM provider. Drafts are made one
//! at a time, or in bulk from a spreadsheet of leads processed strictly in order.

pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingest;
pub mod logging;
pub mod mailto;
pub mod provider;
pub mod single;
pub mod types;

pub use bulk::{Batch, BatchEvent, BatchReport, BulkJobRunner, Job, JobStatus};
pub use error::{ApiError, GenerationError, ParseError};
pub use generation::{EmailGenerator, GenerationClient};
pub use ingest::SpreadsheetIngestor;
pub use single::{SingleOrchestrator, SingleState};
pub use types::{GeneratedEmail, Lead, PitchRequest, SenderStrategy, Tone};
