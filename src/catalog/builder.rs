use tracing::{debug, trace};

use crate::catalog::table::HeaderedTable;
use crate::config::ColumnNames;
use crate::error::{BudgetError, Result};
use crate::models::{Catalog, CatalogItem};
use crate::reader::RawCell;

/// Row accounting from a catalog build, for logging and user feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub rows_scanned: usize,
    /// Item, quantity total, or value total missing or non-numeric.
    pub dropped_missing: usize,
    /// Quantity total of zero, or a quotient that is not finite.
    pub dropped_unpriced: usize,
    /// Rows whose item name was already in the catalog.
    pub duplicates_ignored: usize,
}

impl BuildReport {
    pub fn accepted(&self) -> usize {
        self.rows_scanned - self.dropped_missing - self.dropped_unpriced - self.duplicates_ignored
    }
}

struct ColumnPositions {
    item: usize,
    unit: usize,
    quantity_total: usize,
    value_total: usize,
}

impl ColumnPositions {
    fn resolve(table: &HeaderedTable, names: &ColumnNames, sheet: &str) -> Result<Self> {
        let lookup = |name: &str| table.column_index(name);

        match (
            lookup(names.item.as_str()),
            lookup(names.unit.as_str()),
            lookup(names.quantity_total.as_str()),
            lookup(names.value_total.as_str()),
        ) {
            (Some(item), Some(unit), Some(quantity_total), Some(value_total)) => Ok(Self {
                item,
                unit,
                quantity_total,
                value_total,
            }),
            _ => Err(BudgetError::MissingColumns {
                sheet: sheet.to_string(),
                missing: names
                    .required()
                    .into_iter()
                    .filter(|n| lookup(n.as_str()).is_none())
                    .collect(),
            }),
        }
    }
}

/// Build a priced catalog from a headered table.
///
/// Rows missing the item, quantity total, or value total are skipped, as
/// are rows whose unit price is undefined. When an item name repeats, the
/// first row wins.
pub fn build_catalog(
    table: &HeaderedTable,
    names: &ColumnNames,
    sheet: &str,
) -> Result<(Catalog, BuildReport)> {
    let cols = ColumnPositions::resolve(table, names, sheet)?;
    let mut catalog = Catalog::new(sheet);
    let mut report = BuildReport::default();

    for row in 0..table.len() {
        report.rows_scanned += 1;

        let item_cell = table.value(row, cols.item);
        let quantity = table.value(row, cols.quantity_total).as_number();
        let value = table.value(row, cols.value_total).as_number();

        let (Some(quantity), Some(value)) = (quantity, value) else {
            report.dropped_missing += 1;
            continue;
        };
        if item_cell.is_missing() {
            report.dropped_missing += 1;
            continue;
        }

        let name = item_name(item_cell);
        let unit = table.value(row, cols.unit).normalized();

        let Some(item) = CatalogItem::priced(name, unit, quantity, value) else {
            trace!(row, "dropping row without a defined unit price");
            report.dropped_unpriced += 1;
            continue;
        };

        if !catalog.insert(item) {
            report.duplicates_ignored += 1;
        }
    }

    debug!(
        sheet,
        scanned = report.rows_scanned,
        accepted = report.accepted(),
        dropped_missing = report.dropped_missing,
        dropped_unpriced = report.dropped_unpriced,
        duplicates = report.duplicates_ignored,
        "catalog built"
    );

    Ok((catalog, report))
}

/// Text items keep their exact source string; other cells use their
/// display form.
fn item_name(cell: &RawCell) -> String {
    match cell {
        RawCell::Text(s) => s.clone(),
        other => other.normalized(),
    }
}
