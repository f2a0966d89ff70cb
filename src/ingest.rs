//! Spreadsheet Ingestor
//!
//! Turns a CSV or workbook file into an ordered list of [`Lead`]s. Row 0 is
//! always treated as the header. Columns are positional: name, email, company,
//! website. Rows lacking a name or company are skipped silently.

mod decode;
pub mod template;

pub use decode::{decode_rows, SpreadsheetFormat};
pub use template::{template_csv, write_template, DEFAULT_TEMPLATE_NAME, SHEET_HEADERS};

use crate::error::ParseError;
use crate::types::{non_blank, Lead};
use std::path::Path;
use tracing::{debug, info};

const NAME_COLUMN: usize = 0;
const EMAIL_COLUMN: usize = 1;
const COMPANY_COLUMN: usize = 2;
const WEBSITE_COLUMN: usize = 3;

/// Map decoded rows to leads. Fewer than two rows yields no leads.
pub fn leads_from_rows(rows: &[Vec<String>]) -> Vec<Lead> {
    leads_from_rows_at(rows, chrono::Utc::now().timestamp_millis())
}

/// As [`leads_from_rows`], with the id timestamp fixed by the caller.
pub fn leads_from_rows_at(rows: &[Vec<String>], millis: i64) -> Vec<Lead> {
    if rows.len() < 2 {
        return Vec::new();
    }

    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| {
            let cell = |column: usize| non_blank(row.get(column).map(String::as_str));
            let recipient_name = cell(NAME_COLUMN)?;
            let recipient_company = cell(COMPANY_COLUMN)?;
            Some(Lead {
                id: format!("lead-{}-{}", index, millis),
                recipient_name,
                recipient_company,
                recipient_email: cell(EMAIL_COLUMN),
                recipient_website: cell(WEBSITE_COLUMN),
            })
        })
        .collect()
}

pub struct SpreadsheetIngestor;

impl SpreadsheetIngestor {
    pub fn ingest_path(path: &Path) -> Result<Vec<Lead>, ParseError> {
        let format = SpreadsheetFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), ?format, bytes = bytes.len(), "Reading spreadsheet");
        Self::ingest_bytes(&bytes, format)
    }

    pub fn ingest_bytes(bytes: &[u8], format: SpreadsheetFormat) -> Result<Vec<Lead>, ParseError> {
        let rows = decode_rows(bytes, format)?;
        let leads = leads_from_rows(&rows);
        info!(
            rows = rows.len(),
            leads = leads.len(),
            skipped = rows.len().saturating_sub(1).saturating_sub(leads.len()),
            "Parsed spreadsheet"
        );
        Ok(leads)
    }
}
