//! Spreadsheet decoding: raw bytes to rows of text cells.

use crate::error::ParseError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

/// Input formats accepted by the ingestor, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Csv,
    Xlsx,
    Xlsm,
    Xls,
    Ods,
}

impl SpreadsheetFormat {
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(SpreadsheetFormat::Csv),
            "xlsx" => Ok(SpreadsheetFormat::Xlsx),
            "xlsm" => Ok(SpreadsheetFormat::Xlsm),
            "xls" => Ok(SpreadsheetFormat::Xls),
            "ods" => Ok(SpreadsheetFormat::Ods),
            _ => Err(ParseError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn is_workbook(&self) -> bool {
        !matches!(self, SpreadsheetFormat::Csv)
    }
}

/// Decode file content into rows. Cells are returned untrimmed.
pub fn decode_rows(bytes: &[u8], format: SpreadsheetFormat) -> Result<Vec<Vec<String>>, ParseError> {
    if format.is_workbook() {
        decode_workbook(bytes)
    } else {
        decode_csv(bytes)
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    reader
        .byte_records()
        .map(|record| {
            record
                .map(|r| r.iter().map(field_text).collect())
                .map_err(|e| ParseError::Decode(e.to_string()))
        })
        .collect()
}

/// UTF-8 when valid, otherwise Latin-1 (legacy Windows "CSV" exports).
fn field_text(field: &[u8]) -> String {
    match std::str::from_utf8(field) {
        Ok(text) => text.to_string(),
        Err(_) => field.iter().map(|&b| char::from(b)).collect(),
    }
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Decode(e.to_string()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::NoWorksheet)?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| ParseError::Decode(e.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok(anchor_table(rows))
}

/// Drop blank rows above the table and blank columns left of it, so the header
/// is row 0 and the name column is index 0 wherever the table sits on the sheet.
fn anchor_table(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let is_blank = |cell: &String| cell.trim().is_empty();

    let top = rows
        .iter()
        .position(|row| !row.iter().all(is_blank))
        .unwrap_or(rows.len());
    rows.drain(..top);

    let left = rows
        .iter()
        .filter_map(|row| row.iter().position(|cell| !is_blank(cell)))
        .min()
        .unwrap_or(0);
    for row in &mut rows {
        row.drain(..left.min(row.len()));
    }
    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
