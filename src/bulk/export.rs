//! CSV export of bulk results.

use crate::bulk::batch::Batch;
use crate::error::ApiError;
use std::io::Write;
use std::path::Path;

pub const EXPORT_HEADERS: [&str; 9] = [
    "Recipient Name",
    "Recipient Email",
    "Company Name",
    "Website URL",
    "Status",
    "Subject",
    "Body",
    "Error",
    "Mailto",
];

/// One row per job, in batch order.
pub fn write_results<W: Write>(writer: W, batch: &Batch) -> Result<(), ApiError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADERS)?;
    for job in batch.jobs() {
        let mail_uri = job.mail_uri().unwrap_or_default();
        let (subject, body) = job
            .result
            .as_ref()
            .map(|email| (email.subject.as_str(), email.body.as_str()))
            .unwrap_or(("", ""));
        csv.write_record([
            job.lead.recipient_name.as_str(),
            job.lead.recipient_email.as_deref().unwrap_or(""),
            job.lead.recipient_company.as_str(),
            job.lead.recipient_website.as_deref().unwrap_or(""),
            job.status.as_str(),
            subject,
            body,
            job.error.as_deref().unwrap_or(""),
            mail_uri.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_results_csv(path: &Path, batch: &Batch) -> Result<(), ApiError> {
    let file = std::fs::File::create(path)?;
    write_results(file, batch)?;
    tracing::info!(path = %path.display(), rows = batch.len(), "Exported bulk results");
    Ok(())
}
