//! Integration tests for spreadsheet ingestion

use outreach::error::ParseError;
use outreach::ingest::{template_csv, write_template, SpreadsheetFormat, SpreadsheetIngestor};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_csv_file_with_mixed_rows() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("leads.csv");
    fs::write(
        &path,
        "Recipient Name,Recipient Email,Company Name,Website URL\n\
         John Doe,john@example.com,Acme,acme.com\n\
         ,x@y.com,Beta,\n\
         Jane Roe,,Globex\n\
         \"Smith, Sam\",sam@initech.test,Initech,\n",
    )
    .unwrap();

    let leads = SpreadsheetIngestor::ingest_path(&path).unwrap();
    let names: Vec<_> = leads.iter().map(|l| l.recipient_name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Roe", "Smith, Sam"]);

    assert_eq!(leads[1].recipient_email, None);
    assert_eq!(leads[1].recipient_website, None);
    assert!(leads[0].id.starts_with("lead-1-"));
    assert!(leads[1].id.starts_with("lead-3-"));
}

#[test]
fn test_header_only_file_has_no_leads() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.csv");
    fs::write(&path, "Recipient Name,Recipient Email,Company Name,Website URL\n").unwrap();
    assert!(SpreadsheetIngestor::ingest_path(&path).unwrap().is_empty());
}

#[test]
fn test_template_round_trips_to_one_lead() {
    let temp = TempDir::new().unwrap();
    let path = write_template(temp.path()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), template_csv());

    let leads = SpreadsheetIngestor::ingest_path(&path).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].recipient_name, "John Doe");
    assert_eq!(leads[0].recipient_email.as_deref(), Some("john@example.com"));
    assert_eq!(leads[0].recipient_company, "Acme Corp");
}

#[test]
fn test_unsupported_extension_is_rejected_before_reading() {
    let temp = TempDir::new().unwrap();
    let err = SpreadsheetIngestor::ingest_path(&temp.path().join("leads.txt")).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    assert!(err.to_string().starts_with("Please upload a valid spreadsheet"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = SpreadsheetIngestor::ingest_path(&temp.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn test_corrupt_workbook_is_a_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("leads.xlsx");
    fs::write(&path, b"PK\x03\x04 not really a workbook").unwrap();
    let err = SpreadsheetIngestor::ingest_path(&path).unwrap_err();
    assert!(matches!(err, ParseError::Decode(_)));
    assert!(err
        .to_string()
        .starts_with("Failed to parse spreadsheet file."));
}

#[test]
fn test_ingest_bytes_matches_ingest_path() {
    let temp = TempDir::new().unwrap();
    let path = write_template(&temp.path().join("t.csv")).unwrap();
    let from_path = SpreadsheetIngestor::ingest_path(&path).unwrap();
    let from_bytes =
        SpreadsheetIngestor::ingest_bytes(template_csv().as_bytes(), SpreadsheetFormat::Csv)
            .unwrap();
    assert_eq!(from_path.len(), from_bytes.len());
    assert_eq!(from_path[0].recipient_company, from_bytes[0].recipient_company);
}

#[test]
fn test_windows_encoded_csv_keeps_every_lead() {
    let leads = SpreadsheetIngestor::ingest_bytes(
        b"Recipient Name,Recipient Email,Company Name,Website URL\n\
          Jos\xE9 Ruiz,jose@x.com,Acme,\n\
          John Doe,john@x.com,Beta,\n",
        SpreadsheetFormat::Csv,
    )
    .unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].recipient_name, "Jos\u{e9} Ruiz");
    assert_eq!(leads[1].recipient_company, "Beta");
}

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn assert_fixture_leads(name: &str) {
    let leads = SpreadsheetIngestor::ingest_path(&fixture(name)).unwrap();

    // Three data rows; the one without a name is skipped.
    assert_eq!(leads.len(), 2, "{}", name);

    assert_eq!(leads[0].recipient_name, "John Doe");
    assert_eq!(leads[0].recipient_email.as_deref(), Some("john@example.com"));
    assert_eq!(leads[0].recipient_company, "Acme Corp");
    assert_eq!(leads[0].recipient_website.as_deref(), Some("www.acmecorp.com"));
    assert!(leads[0].id.starts_with("lead-1-"));

    assert_eq!(leads[1].recipient_name, "Jane Roe");
    assert_eq!(leads[1].recipient_email, None);
    assert_eq!(leads[1].recipient_company, "Globex");
    assert!(leads[1].id.starts_with("lead-3-"));
}

#[test]
fn test_xlsx_workbook_decodes_first_sheet() {
    assert_fixture_leads("leads.xlsx");
}

#[test]
fn test_xlsx_table_starting_at_b2_keeps_column_order() {
    assert_fixture_leads("leads_offset.xlsx");
}

#[test]
fn test_ods_workbook_decodes_first_sheet() {
    assert_fixture_leads("leads.ods");
}

#[test]
fn test_ods_table_starting_in_column_b_keeps_column_order() {
    assert_fixture_leads("leads_offset.ods");
}
