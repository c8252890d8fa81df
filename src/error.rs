use thiserror::Error;

#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Unreadable file: {0}")]
    UnreadableFile(String),

    #[error("No header row with columns {expected:?} found")]
    NoHeaderFound { expected: Vec<String> },

    #[error("Sheet '{sheet}' is missing columns: {}", missing.join(", "))]
    MissingColumns { sheet: String, missing: Vec<String> },

    #[error("Invalid line: {index} (budget has {len} lines)")]
    InvalidLine { index: usize, len: usize },

    #[error("Budget not started")]
    BudgetNotStarted,

    #[error("No catalog loaded")]
    NoCatalogLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BudgetError {
    /// Short reason shown to the user when a catalog fails to load.
    pub fn reason(&self) -> &'static str {
        match self {
            BudgetError::MissingColumns { .. } => "missing columns",
            BudgetError::NoHeaderFound { .. } => "no header found",
            BudgetError::UnreadableFile(_)
            | BudgetError::Io(_)
            | BudgetError::Csv(_)
            | BudgetError::Spreadsheet(_) => "unreadable file",
            _ => "unexpected error",
        }
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_reasons() {
        let missing = BudgetError::MissingColumns {
            sheet: "Base".to_string(),
            missing: vec!["un".to_string()],
        };
        assert_eq!(missing.reason(), "missing columns");
        assert_eq!(
            BudgetError::NoHeaderFound { expected: vec![] }.reason(),
            "no header found"
        );
        assert_eq!(
            BudgetError::UnreadableFile("bad zip".to_string()).reason(),
            "unreadable file"
        );
    }

    #[test]
    fn test_missing_columns_message() {
        let err = BudgetError::MissingColumns {
            sheet: "Base".to_string(),
            missing: vec!["un".to_string(), "Valor Total".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Sheet 'Base' is missing columns: un, Valor Total"
        );
    }
}
