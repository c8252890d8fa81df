use std::collections::HashSet;

use tracing::debug;

use crate::error::{BudgetError, Result};
use crate::reader::{RawCell, SheetGrid};

/// Bounds of the header search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    /// Leading rows of each sheet to inspect.
    pub max_rows: usize,
    /// Sheets to inspect, in file order. `None` means all of them.
    pub max_sheets: Option<usize>,
}

/// Where the header row was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLocation {
    pub sheet_index: usize,
    pub sheet_name: String,
    pub row: usize,
}

/// Required names absent from the normalized cells of `row`.
///
/// Order does not matter and extra columns are allowed.
fn missing_in_row<S: AsRef<str>>(row: &[RawCell], required: &[S]) -> Vec<String> {
    let present: HashSet<String> = row.iter().map(RawCell::normalized).collect();
    required
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !present.contains(*name))
        .map(str::to_string)
        .collect()
}

/// Find the first row carrying every required column name.
///
/// Sheets are scanned in file order and rows top to bottom within
/// `window.max_rows`; the first hit wins.
///
/// On failure, reports `MissingColumns` for the scanned row that came
/// closest (at least one required name present, earliest row on ties),
/// or `NoHeaderFound` when no scanned row had any required name.
pub fn locate_header<S: AsRef<str>>(
    grids: &[SheetGrid],
    required: &[S],
    window: ScanWindow,
) -> Result<HeaderLocation> {
    let sheet_limit = window.max_sheets.unwrap_or(grids.len());
    let mut closest: Option<(String, Vec<String>)> = None;

    for (sheet_index, grid) in grids.iter().enumerate().take(sheet_limit) {
        for (row_idx, row) in grid.rows.iter().enumerate().take(window.max_rows) {
            let missing = missing_in_row(row, required);

            if missing.is_empty() {
                debug!(sheet = %grid.name, row = row_idx, "header located");
                return Ok(HeaderLocation {
                    sheet_index,
                    sheet_name: grid.name.clone(),
                    row: row_idx,
                });
            }

            let is_partial = missing.len() < required.len();
            let is_closer = closest
                .as_ref()
                .is_none_or(|(_, best)| missing.len() < best.len());
            if is_partial && is_closer {
                closest = Some((grid.name.clone(), missing));
            }
        }
    }

    match closest {
        Some((sheet, missing)) => Err(BudgetError::MissingColumns { sheet, missing }),
        None => Err(BudgetError::NoHeaderFound {
            expected: required.iter().map(|s| s.as_ref().to_string()).collect(),
        }),
    }
}
