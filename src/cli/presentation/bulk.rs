//! Bulk run presentation: live progress lines and the final summary.

use crate::bulk::{BatchEvent, BatchEventKind, BatchReport, JobStatus};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// One line per published event.
pub fn format_batch_event_line(event: &BatchEvent) -> String {
    let batch = &event.snapshot;
    let total = batch.len();
    let label = |index: usize| {
        batch
            .get(index)
            .map(|job| {
                format!(
                    "{} ({})",
                    job.lead.recipient_name, job.lead.recipient_company
                )
            })
            .unwrap_or_default()
    };

    match &event.kind {
        BatchEventKind::Started => format!("Starting bulk run: {} lead(s)", total),
        BatchEventKind::JobStarted { index } => {
            format!("[{}/{}] {} {}", index + 1, total, "drafting".cyan(), label(*index))
        }
        BatchEventKind::JobCompleted { index } => format!(
            "[{}/{}] {} {}  ({:.0}%)",
            index + 1,
            total,
            "done".green(),
            label(*index),
            batch.progress_percent()
        ),
        BatchEventKind::JobFailed { index, error } => format!(
            "[{}/{}] {} {}: {}",
            index + 1,
            total,
            "failed".red(),
            label(*index),
            error
        ),
        BatchEventKind::Finished { cancelled: true } => format!(
            "{} {} / {} completed",
            "Cancelled.".yellow(),
            batch.completed_count(),
            total
        ),
        BatchEventKind::Finished { cancelled: false } => {
            format!("Finished: {} / {} completed", batch.completed_count(), total)
        }
    }
}

pub fn format_bulk_report_text(report: &BatchReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Company", "Status", "Subject / Error"]);
    for (index, job) in report.batch.jobs().iter().enumerate() {
        let detail = match job.status {
            JobStatus::Completed => job
                .result
                .as_ref()
                .map(|email| email.subject.clone())
                .unwrap_or_default(),
            _ => job.error.clone().unwrap_or_default(),
        };
        table.add_row(vec![
            (index + 1).to_string(),
            job.lead.recipient_name.clone(),
            job.lead.recipient_company.clone(),
            job.status.to_string(),
            detail,
        ]);
    }

    let stats = report.stats();
    let mut output = format!(
        "{}\n\n{} / {} Completed, {} failed",
        table, stats.completed, stats.total, stats.failed
    );
    if report.cancelled {
        output.push_str(" (run cancelled)");
    }
    output
}

pub fn format_bulk_report_json(report: &BatchReport) -> String {
    let jobs: Vec<_> = report
        .batch
        .jobs()
        .iter()
        .map(|job| {
            json!({
                "lead": job.lead,
                "status": job.status,
                "result": job.result,
                "error": job.error,
                "mailto": job.mail_uri(),
            })
        })
        .collect();
    let out = json!({
        "jobs": jobs,
        "stats": report.stats(),
        "cancelled": report.cancelled,
        "duration_ms": report.duration.as_millis() as u64,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
