//! Integration tests for the sequential bulk runner

use super::{lead, strategy, ScriptedGenerator};
use outreach::bulk::{
    write_results_csv, BatchEvent, BatchEventKind, BulkJobRunner, JobStatus,
    CANCELLED_BEFORE_START_MESSAGE,
};
use outreach::error::GENERATION_FAILED_MESSAGE;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn three_leads() -> Vec<outreach::types::Lead> {
    vec![
        lead(1, "John Doe", "Acme"),
        lead(2, "Jane Roe", "Beta"),
        lead(3, "Sam Smith", "Globex"),
    ]
}

fn drain(rx: &mut mpsc::UnboundedReceiver<BatchEvent>) -> Vec<BatchEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_middle_failure_does_not_stop_the_batch() {
    let generator = ScriptedGenerator::new(&["Beta"]);
    let runner = BulkJobRunner::new(generator.clone(), None);

    let report = runner.run_to_completion(&strategy(), three_leads()).await.unwrap();

    let statuses: Vec<_> = report.batch.jobs().iter().map(|j| j.status).collect();
    assert_eq!(
        statuses,
        vec![JobStatus::Completed, JobStatus::Error, JobStatus::Completed]
    );
    assert_eq!(
        report.batch.jobs()[1].error.as_deref(),
        Some(GENERATION_FAILED_MESSAGE)
    );
    assert!(report.batch.jobs()[1].result.is_none());
    assert!(!report.cancelled);

    let stats = report.stats();
    assert_eq!((stats.completed, stats.failed, stats.pending), (2, 1, 0));
}

#[tokio::test]
async fn test_requests_are_issued_in_input_order_with_shared_strategy() {
    let generator = ScriptedGenerator::new(&[]);
    let runner = BulkJobRunner::new(generator.clone(), None);
    runner.run_to_completion(&strategy(), three_leads()).await.unwrap();

    let requests = generator.requests();
    let companies: Vec<_> = requests.iter().map(|r| r.recipient_company.as_str()).collect();
    assert_eq!(companies, vec!["Acme", "Beta", "Globex"]);
    assert!(requests
        .iter()
        .all(|r| r.sender_name == "Alex Builder" && r.specific_focus == strategy().specific_focus));
}

#[tokio::test]
async fn test_observer_sees_every_transition_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = BulkJobRunner::new(ScriptedGenerator::new(&["Beta"]), Some(tx));

    let report = runner.run_to_completion(&strategy(), three_leads()).await.unwrap();
    drop(runner);
    let events = drain(&mut rx);

    assert_eq!(events.len() as u64, report.events_published);
    let kinds: Vec<_> = events.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            BatchEventKind::Started,
            BatchEventKind::JobStarted { index: 0 },
            BatchEventKind::JobCompleted { index: 0 },
            BatchEventKind::JobStarted { index: 1 },
            BatchEventKind::JobFailed {
                index: 1,
                error: GENERATION_FAILED_MESSAGE.to_string()
            },
            BatchEventKind::JobStarted { index: 2 },
            BatchEventKind::JobCompleted { index: 2 },
            BatchEventKind::Finished { cancelled: false },
        ]
    );

    for window in events.windows(2) {
        assert!(window[0].seq < window[1].seq);
    }
    for event in &events {
        let processing = event
            .snapshot
            .jobs()
            .iter()
            .filter(|j| j.status == JobStatus::Processing)
            .count();
        assert!(processing <= 1);
    }
    assert_eq!(events.iter().filter(|e| e.is_finished()).count(), 1);
    assert!(events.last().unwrap().snapshot.is_finished());
}

#[tokio::test]
async fn test_snapshots_are_not_mutated_by_later_progress() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = BulkJobRunner::new(ScriptedGenerator::new(&[]), Some(tx));
    runner.run_to_completion(&strategy(), three_leads()).await.unwrap();
    let events = drain(&mut rx);

    let first = Arc::clone(&events[0].snapshot);
    assert!(first.jobs().iter().all(|j| j.status == JobStatus::Pending));
    assert_eq!(first.progress_percent(), 0.0);
    assert_eq!(events.last().unwrap().snapshot.progress_percent(), 100.0);
}

#[tokio::test]
async fn test_cancelled_token_leaves_every_job_terminal() {
    let token = CancellationToken::new();
    token.cancel();
    let runner = BulkJobRunner::new(ScriptedGenerator::new(&[]), None);

    let report = runner.run(&strategy(), three_leads(), token).await.unwrap();

    assert!(report.cancelled);
    assert!(report.batch.is_finished());
    for job in report.batch.jobs() {
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.error.as_deref(), Some(CANCELLED_BEFORE_START_MESSAGE));
    }
}

#[tokio::test]
async fn test_export_writes_every_job() {
    let runner = BulkJobRunner::new(ScriptedGenerator::new(&["Beta"]), None);
    let report = runner.run_to_completion(&strategy(), three_leads()).await.unwrap();

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("results.csv");
    write_results_csv(&path, &report.batch).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(&rows[0][2], "Acme");
    assert_eq!(&rows[0][4], "completed");
    assert_eq!(&rows[0][5], "An idea for Acme");
    assert!(rows[0][8].starts_with("mailto:john.doe@example.com?subject="));

    assert_eq!(&rows[1][4], "error");
    assert_eq!(&rows[1][5], "");
    assert_eq!(&rows[1][7], GENERATION_FAILED_MESSAGE);
    assert_eq!(&rows[1][8], "");
}
