//! Downloadable lead template.

use crate::error::ParseError;
use std::path::Path;

/// Column headers in the order the ingestor reads them.
pub const SHEET_HEADERS: [&str; 4] = [
    "Recipient Name",
    "Recipient Email",
    "Company Name",
    "Website URL",
];

pub const DEFAULT_TEMPLATE_NAME: &str = "leads_template.csv";

const EXAMPLE_ROW: &str = "John Doe,john@example.com,Acme Corp,www.acmecorp.com";

pub fn template_csv() -> String {
    format!("{}\n{}\n", SHEET_HEADERS.join(","), EXAMPLE_ROW)
}

/// Write the template; a directory target gets the default file name.
pub fn write_template(path: &Path) -> Result<std::path::PathBuf, ParseError> {
    let target = if path.is_dir() {
        path.join(DEFAULT_TEMPLATE_NAME)
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, template_csv())?;
    Ok(target)
}
