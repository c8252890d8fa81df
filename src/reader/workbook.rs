use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use super::cell::{RawCell, SheetGrid};
use crate::error::{BudgetError, Result};

/// Input container formats understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Any workbook calamine detects from content (xlsx, xls, xlsb, ods).
    Workbook,
    /// Delimited text; exposed as a single sheet.
    Csv,
}

impl SourceFormat {
    /// Pick the format from a file extension. Anything that is not `.csv`
    /// goes through workbook detection.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceFormat::Csv,
            _ => SourceFormat::Workbook,
        }
    }
}

/// Read every sheet of a spreadsheet file into raw grids.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<SheetGrid>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    match SourceFormat::from_path(path) {
        SourceFormat::Csv => {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("csv");
            read_csv_bytes(&bytes, name)
        }
        SourceFormat::Workbook => read_workbook_bytes(&bytes),
    }
}

/// Read an in-memory workbook. Sheets come back in file order.
///
/// Grids keep absolute positions: if the used range starts at C4, the
/// grid still starts at A1 with blank leading rows and columns.
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Vec<SheetGrid>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(BudgetError::UnreadableFile(
            "workbook contains no sheets".to_string(),
        ));
    }

    let mut grids = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| {
                BudgetError::UnreadableFile(format!("sheet '{}': {}", sheet_name, e))
            })?;

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<RawCell>> = vec![Vec::new(); start_row as usize];

        for row in range.rows() {
            let mut cells = vec![RawCell::Empty; start_col as usize];
            cells.extend(row.iter().map(convert_cell));
            rows.push(cells);
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "read sheet");
        grids.push(SheetGrid::new(sheet_name.clone(), rows));
    }

    Ok(grids)
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(n) => RawCell::Number(*n),
        Data::Int(n) => RawCell::Number(*n as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        // Dates are kept as their serial number
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Empty,
    }
}

/// Read delimited text as a single sheet named `sheet_name`.
///
/// The delimiter is `;` when the first non-blank line has more semicolons
/// than commas, `,` otherwise.
pub fn read_csv_bytes(bytes: &[u8], sheet_name: &str) -> Result<Vec<SheetGrid>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| BudgetError::UnreadableFile(format!("not valid UTF-8: {}", e)))?;
    let delimiter = sniff_delimiter(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(vec![SheetGrid::new(sheet_name, rows)])
}

fn sniff_delimiter(text: &str) -> u8 {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = first.matches(';').count();
    let commas = first.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// CSV fields stay text; numeric columns are parsed later by `as_number`.
fn text_cell(field: &str) -> RawCell {
    if field.trim().is_empty() {
        RawCell::Empty
    } else {
        RawCell::Text(field.to_string())
    }
}
