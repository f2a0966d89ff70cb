//! Properties of row-to-lead mapping

use outreach::ingest::leads_from_rows_at;
use proptest::prelude::*;
use std::collections::HashSet;

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z][A-Za-z .,@-]{0,12}",
    ]
}

fn row() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cell(), 0..6)
}

/// Every data row with a non-blank name and company becomes exactly one lead
#[test]
fn test_lead_count_matches_complete_rows() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(row(), prop::collection::vec(row(), 0..20)),
            |(header, data)| {
                let mut rows = vec![header];
                rows.extend(data.iter().cloned());

                let expected = data
                    .iter()
                    .filter(|r| {
                        let filled = |i: usize| r.get(i).is_some_and(|c| !c.trim().is_empty());
                        filled(0) && filled(2)
                    })
                    .count();

                let leads = leads_from_rows_at(&rows, 7);
                prop_assert_eq!(leads.len(), expected);
                Ok(())
            },
        )
        .unwrap();
}

/// Leads keep input order, carry unique ids, and never hold blank fields
#[test]
fn test_leads_are_ordered_unique_and_trimmed() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(row(), 1..20), |rows| {
            let leads = leads_from_rows_at(&rows, 1_700_000_000_000);

            let ids: HashSet<_> = leads.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(ids.len(), leads.len());

            let indices: Vec<usize> = leads
                .iter()
                .map(|l| l.id.split('-').nth(1).unwrap().parse().unwrap())
                .collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(indices.iter().all(|&i| i >= 1));

            for lead in &leads {
                prop_assert!(!lead.recipient_name.is_empty());
                prop_assert_eq!(lead.recipient_name.trim(), lead.recipient_name.as_str());
                prop_assert_eq!(lead.recipient_company.trim(), lead.recipient_company.as_str());
                if let Some(email) = &lead.recipient_email {
                    prop_assert!(!email.trim().is_empty());
                }
            }
            Ok(())
        })
        .unwrap();
}
