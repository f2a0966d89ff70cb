//! Bulk Job Runner
//!
//! Produces one draft per lead, strictly sequentially, publishing immutable
//! batch snapshots as it goes.

pub mod batch;
pub mod event;
pub mod export;
pub mod job;
pub mod runner;

pub use batch::{Batch, BatchStats};
pub use event::{BatchEvent, BatchEventKind};
pub use export::write_results_csv;
pub use job::{Job, JobStatus};
pub use runner::{BatchReport, BulkJobRunner, CANCELLED_BEFORE_START_MESSAGE, CANCELLED_MESSAGE};
