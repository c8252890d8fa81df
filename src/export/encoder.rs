use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use tracing::info;

use crate::error::{BudgetError, Result};
use crate::models::LedgerSnapshot;
use crate::reader::SourceFormat;

/// Column headers of the exported table.
pub const EXPORT_HEADERS: [&str; 5] = ["item", "un", "valor_unitario", "quantidade", "total_linha"];

const MONEY_FORMAT: &str = "#,##0.00";

/// One flat row of the export. The trailing total row leaves `unit`,
/// `unit_price` and `quantity` blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub item: String,
    pub unit: String,
    pub unit_price: Option<f64>,
    pub quantity: Option<f64>,
    pub line_total: f64,
}

/// Flatten the ledger into export rows, ending with exactly one total row
/// labelled `total_label`.
pub fn export_rows(snapshot: &LedgerSnapshot, total_label: &str) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = snapshot
        .lines
        .iter()
        .map(|line| ExportRow {
            item: line.item_ref().unwrap_or_default().to_string(),
            unit: line.unit().to_string(),
            unit_price: Some(line.unit_price()),
            quantity: Some(line.quantity()),
            line_total: line.line_total(),
        })
        .collect();

    rows.push(ExportRow {
        item: total_label.to_string(),
        unit: String::new(),
        unit_price: None,
        quantity: None,
        line_total: snapshot.grand_total,
    });

    rows
}

/// Encode rows as an xlsx workbook with a single sheet.
pub fn encode_xlsx(rows: &[ExportRow], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format(MONEY_FORMAT);
    let total_format = Format::new().set_bold().set_num_format(MONEY_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let last = rows.len().saturating_sub(1);
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let is_total = i == last;

        if is_total {
            worksheet.write_string_with_format(r, 0, &row.item, &header_format)?;
        } else if !row.item.is_empty() {
            worksheet.write_string(r, 0, &row.item)?;
        }
        if !row.unit.is_empty() {
            worksheet.write_string(r, 1, &row.unit)?;
        }
        if let Some(price) = row.unit_price {
            worksheet.write_number_with_format(r, 2, price, &money_format)?;
        }
        if let Some(quantity) = row.quantity {
            worksheet.write_number(r, 3, quantity)?;
        }
        let format = if is_total { &total_format } else { &money_format };
        worksheet.write_number_with_format(r, 4, row.line_total, format)?;
    }

    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(2, 16)?;
    worksheet.set_column_width(4, 16)?;

    Ok(workbook.save_to_buffer()?)
}

/// Encode rows as comma-separated text with a header line.
pub fn encode_csv(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;

    for row in rows {
        wtr.write_record([
            row.item.clone(),
            row.unit.clone(),
            row.unit_price.map(|v| v.to_string()).unwrap_or_default(),
            row.quantity.map(|v| v.to_string()).unwrap_or_default(),
            row.line_total.to_string(),
        ])?;
    }

    wtr.flush()?;
    wtr.into_inner().map_err(|e| BudgetError::Io(e.into_error()))
}

/// Encode for `path` (csv by extension, xlsx otherwise) and write it.
pub fn write_export<P: AsRef<Path>>(path: P, rows: &[ExportRow], sheet_name: &str) -> Result<()> {
    let path = path.as_ref();
    let bytes = match SourceFormat::from_path(path) {
        SourceFormat::Csv => encode_csv(rows)?,
        SourceFormat::Workbook => encode_xlsx(rows, sheet_name)?,
    };
    fs::write(path, &bytes)?;
    info!(path = %path.display(), rows = rows.len(), "budget exported");
    Ok(())
}
