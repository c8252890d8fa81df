use std::path::Path;

use tracing::info;

use crate::catalog::builder::{build_catalog, BuildReport};
use crate::catalog::header::{locate_header, HeaderLocation, ScanWindow};
use crate::catalog::table::HeaderedTable;
use crate::config::Settings;
use crate::error::Result;
use crate::models::Catalog;
use crate::reader::{read_csv_bytes, read_path, read_workbook_bytes, SheetGrid, SourceFormat};

/// A catalog together with where it came from and how its rows fared.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub header: HeaderLocation,
    pub report: BuildReport,
}

/// Locate the header across `grids` and build the catalog from that sheet.
pub fn load_catalog(grids: &[SheetGrid], settings: &Settings) -> Result<LoadedCatalog> {
    let window = ScanWindow {
        max_rows: settings.header_scan_rows,
        max_sheets: settings.max_sheets,
    };
    let header = locate_header(grids, &settings.columns.required(), window)?;

    let grid = &grids[header.sheet_index];
    let table = HeaderedTable::from_grid(grid, header.row);
    let (catalog, report) = build_catalog(&table, &settings.columns, &header.sheet_name)?;

    info!(
        sheet = %header.sheet_name,
        header_row = header.row,
        items = catalog.len(),
        "catalog loaded"
    );

    Ok(LoadedCatalog {
        catalog,
        header,
        report,
    })
}

/// Load a catalog from in-memory file contents.
pub fn load_catalog_bytes(
    bytes: &[u8],
    format: SourceFormat,
    settings: &Settings,
) -> Result<LoadedCatalog> {
    let grids = match format {
        SourceFormat::Workbook => read_workbook_bytes(bytes)?,
        SourceFormat::Csv => read_csv_bytes(bytes, "csv")?,
    };
    load_catalog(&grids, settings)
}

/// Load a catalog from a file on disk.
pub fn load_catalog_path<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<LoadedCatalog> {
    let grids = read_path(path)?;
    load_catalog(&grids, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BudgetError;
    use crate::reader::RawCell;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn test_load_catalog_from_fifth_row_header() {
        let mut rows = vec![vec![text("Planilha Spark")]; 5];
        rows.push(vec![
            text("Item"),
            text("un"),
            text("Quantidade Total"),
            text("Valor Total"),
        ]);
        rows.push(vec![
            text("Cimento"),
            text("sc"),
            RawCell::Number(10.0),
            RawCell::Number(250.0),
        ]);
        let grids = vec![SheetGrid::new("Orçamento", rows)];

        let loaded = load_catalog(&grids, &Settings::default()).unwrap();
        assert_eq!(loaded.header.row, 5);
        assert_eq!(loaded.catalog.source_sheet(), "Orçamento");
        assert_eq!(loaded.catalog.get("Cimento").unwrap().unit_price, 25.0);
        assert_eq!(loaded.report.accepted(), 1);
    }

    #[test]
    fn test_load_catalog_bytes_csv() {
        let data = "Item,un,Quantidade Total,Valor Total\nAreia,m3,4,200\nPedra,m3,0,50\n";
        let loaded =
            load_catalog_bytes(data.as_bytes(), SourceFormat::Csv, &Settings::default()).unwrap();
        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.catalog.get("Areia").unwrap().unit_price, 50.0);
    }

    #[test]
    fn test_unreadable_bytes() {
        let err = load_catalog_bytes(b"\x00\x01garbage", SourceFormat::Workbook, &Settings::default())
            .unwrap_err();
        assert_eq!(err.reason(), "unreadable file");
    }

    #[test]
    fn test_no_header_reason() {
        let grids = vec![SheetGrid::new("S", vec![vec![text("nada")]])];
        let err = load_catalog(&grids, &Settings::default()).unwrap_err();
        assert!(matches!(err, BudgetError::NoHeaderFound { .. }));
        assert_eq!(err.reason(), "no header found");
    }
}
