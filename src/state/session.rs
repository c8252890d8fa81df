use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{load_catalog_bytes, load_catalog_path, BuildReport, LoadedCatalog};
use crate::config::Settings;
use crate::error::{BudgetError, Result};
use crate::export::{encode_csv, encode_xlsx, export_rows, write_export, ExportRow};
use crate::models::{Catalog, LedgerSnapshot};
use crate::reader::SourceFormat;
use crate::state::ledger::BudgetLedger;

/// Feedback from a successful catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub sheet: String,
    pub header_row: usize,
    pub items: usize,
    pub report: BuildReport,
    /// Budget lines unbound because their item is not in the new catalog.
    pub lines_unbound: usize,
}

/// One user's working state: the current catalog and the budget ledger.
///
/// A failed load leaves both untouched. A successful load replaces the
/// catalog wholesale but keeps the ledger; lines pointing at items that
/// disappeared fall back to unbound.
#[derive(Debug, Clone, Default)]
pub struct Session {
    settings: Settings,
    catalog: Option<Catalog>,
    ledger: BudgetLedger,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            catalog: None,
            ledger: BudgetLedger::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub fn load_catalog_path<P: AsRef<Path>>(&mut self, path: P) -> Result<CatalogSummary> {
        let path = path.as_ref();
        match load_catalog_path(path, &self.settings) {
            Ok(loaded) => Ok(self.install(loaded)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "catalog load failed");
                Err(e)
            }
        }
    }

    pub fn load_catalog_bytes(&mut self, bytes: &[u8], format: SourceFormat) -> Result<CatalogSummary> {
        match load_catalog_bytes(bytes, format, &self.settings) {
            Ok(loaded) => Ok(self.install(loaded)),
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                Err(e)
            }
        }
    }

    fn install(&mut self, loaded: LoadedCatalog) -> CatalogSummary {
        let LoadedCatalog {
            catalog,
            header,
            report,
        } = loaded;

        let lines_unbound = self.ledger.reconcile(&catalog);
        if lines_unbound > 0 {
            info!(lines = lines_unbound, "budget lines unbound after catalog reload");
        }

        let summary = CatalogSummary {
            sheet: header.sheet_name,
            header_row: header.row,
            items: catalog.len(),
            report,
            lines_unbound,
        };
        self.catalog = Some(catalog);
        summary
    }

    /// Begin a new budget. Requires a loaded catalog.
    pub fn start_budget(&mut self) -> Result<()> {
        if self.catalog.is_none() {
            return Err(BudgetError::NoCatalogLoaded);
        }
        self.ledger.reset();
        Ok(())
    }

    pub fn add_line(&mut self) -> Result<usize> {
        self.ledger.add_line()
    }

    pub fn set_line_item(&mut self, index: usize, name: Option<&str>) -> Result<()> {
        let empty = Catalog::default();
        let catalog = self.catalog.as_ref().unwrap_or(&empty);
        self.ledger.set_line_item(index, name, catalog)
    }

    pub fn set_line_quantity(&mut self, index: usize, quantity: f64) -> Result<()> {
        self.ledger.set_line_quantity(index, quantity)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        export_rows(&self.ledger.snapshot(), &self.settings.total_label)
    }

    pub fn export_bytes(&self, format: SourceFormat) -> Result<Vec<u8>> {
        let rows = self.export_rows();
        match format {
            SourceFormat::Workbook => encode_xlsx(&rows, &self.settings.export_sheet_name),
            SourceFormat::Csv => encode_csv(&rows),
        }
    }

    pub fn export_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_export(path, &self.export_rows(), &self.settings.export_sheet_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_CSV: &str = "Item,un,Quantidade Total,Valor Total\n\
                            Cimento,sc,10,250\n\
                            Areia,m3,2,80\n";

    fn loaded_session() -> Session {
        let mut session = Session::new(Settings::default());
        session
            .load_catalog_bytes(BASE_CSV.as_bytes(), SourceFormat::Csv)
            .unwrap();
        session
    }

    #[test]
    fn test_start_requires_catalog() {
        let mut session = Session::new(Settings::default());
        assert!(matches!(
            session.start_budget(),
            Err(BudgetError::NoCatalogLoaded)
        ));
    }

    #[test]
    fn test_failed_load_keeps_previous_catalog() {
        let mut session = loaded_session();
        session.start_budget().unwrap();
        session.add_line().unwrap();
        session.set_line_item(0, Some("Cimento")).unwrap();

        let err = session
            .load_catalog_bytes(b"nothing useful here", SourceFormat::Csv)
            .unwrap_err();
        assert_eq!(err.reason(), "no header found");
        assert_eq!(session.catalog().unwrap().len(), 2);
        assert_eq!(session.ledger().line(0).unwrap().item_ref(), Some("Cimento"));
    }

    #[test]
    fn test_reload_keeps_ledger() {
        let mut session = loaded_session();
        session.start_budget().unwrap();
        session.add_line().unwrap();
        session.set_line_item(0, Some("Cimento")).unwrap();
        session.set_line_quantity(0, 2.0).unwrap();
        session.add_line().unwrap();
        session.set_line_item(1, Some("Areia")).unwrap();

        let other = "Item,un,Quantidade Total,Valor Total\nAreia,m3,1,30\n";
        let summary = session
            .load_catalog_bytes(other.as_bytes(), SourceFormat::Csv)
            .unwrap();

        assert_eq!(summary.items, 1);
        assert_eq!(summary.lines_unbound, 1);
        assert_eq!(session.ledger().len(), 2);
        assert!(session.ledger().is_active());
        assert!(!session.ledger().line(0).unwrap().is_bound());
    }

    #[test]
    fn test_export_bytes_csv() {
        let mut session = loaded_session();
        session.start_budget().unwrap();
        session.add_line().unwrap();
        session.set_line_item(0, Some("Areia")).unwrap();
        session.set_line_quantity(0, 1.5).unwrap();

        let text = String::from_utf8(session.export_bytes(SourceFormat::Csv).unwrap()).unwrap();
        assert!(text.ends_with("TOTAL GERAL,,,,60\n"));
    }
}
