//! Properties of batch runs over arbitrary failure patterns

use async_trait::async_trait;
use outreach::bulk::{BatchEvent, BatchEventKind, BulkJobRunner, JobStatus};
use outreach::error::GenerationError;
use outreach::generation::EmailGenerator;
use outreach::types::{GeneratedEmail, Lead, PitchRequest, SenderStrategy, Tone};
use proptest::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Fails for every company whose name starts with "fail".
struct PatternGenerator;

#[async_trait]
impl EmailGenerator for PatternGenerator {
    async fn generate(&self, request: &PitchRequest) -> Result<GeneratedEmail, GenerationError> {
        if request.recipient_company.starts_with("fail") {
            Err(GenerationError::failed())
        } else {
            Ok(GeneratedEmail {
                subject: format!("Hello {}", request.recipient_company),
                body: "Body".to_string(),
            })
        }
    }
}

fn leads(pattern: &[bool]) -> Vec<Lead> {
    pattern
        .iter()
        .enumerate()
        .map(|(i, fails)| Lead {
            id: format!("lead-{}-0", i + 1),
            recipient_name: format!("Person {}", i),
            recipient_company: if *fails {
                format!("fail-{}", i)
            } else {
                format!("ok-{}", i)
            },
            recipient_email: None,
            recipient_website: None,
        })
        .collect()
}

fn strategy() -> SenderStrategy {
    SenderStrategy {
        sender_name: "Alex".to_string(),
        sender_portfolio: None,
        tone: Tone::Casual,
        specific_focus: "Chatbots".to_string(),
    }
}

/// Final statuses mirror the failure pattern and every snapshot holds at most one processing job
#[test]
fn test_run_outcome_follows_failure_pattern() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runner
        .run(&prop::collection::vec(any::<bool>(), 0..12), |pattern| {
            let (tx, mut rx) = mpsc::unbounded_channel::<BatchEvent>();
            let bulk = BulkJobRunner::new(Arc::new(PatternGenerator), Some(tx));
            let report = rt
                .block_on(bulk.run_to_completion(&strategy(), leads(&pattern)))
                .unwrap();
            drop(bulk);

            let expected: Vec<JobStatus> = pattern
                .iter()
                .map(|f| if *f { JobStatus::Error } else { JobStatus::Completed })
                .collect();
            let actual: Vec<JobStatus> = report.batch.jobs().iter().map(|j| j.status).collect();
            prop_assert_eq!(actual, expected);

            let stats = report.stats();
            prop_assert_eq!(stats.completed + stats.failed, pattern.len());

            let mut events = Vec::new();
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
            prop_assert_eq!(events.len(), 2 + 2 * pattern.len());
            prop_assert_eq!(events.first().map(|e| e.kind.clone()), Some(BatchEventKind::Started));
            prop_assert_eq!(
                events.last().map(|e| e.kind.clone()),
                Some(BatchEventKind::Finished { cancelled: false })
            );
            for event in &events {
                let processing = event
                    .snapshot
                    .jobs()
                    .iter()
                    .filter(|j| j.status == JobStatus::Processing)
                    .count();
                prop_assert!(processing <= 1);
            }
            Ok(())
        })
        .unwrap();
}
