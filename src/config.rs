use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::constants::{
    COL_ITEM, COL_QUANTITY_TOTAL, COL_UNIT, COL_VALUE_TOTAL, CURRENCY_SYMBOL, EXPORT_SHEET_NAME,
    HEADER_SCAN_ROWS, TOTAL_ROW_LABEL,
};
use crate::error::{BudgetError, Result};

/// Header names of the four catalog columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub item: String,
    pub unit: String,
    pub quantity_total: String,
    pub value_total: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            item: COL_ITEM.to_string(),
            unit: COL_UNIT.to_string(),
            quantity_total: COL_QUANTITY_TOTAL.to_string(),
            value_total: COL_VALUE_TOTAL.to_string(),
        }
    }
}

impl ColumnNames {
    /// All four names, in the order the header locator reports them.
    pub fn required(&self) -> Vec<String> {
        vec![
            self.item.clone(),
            self.unit.clone(),
            self.quantity_total.clone(),
            self.value_total.clone(),
        ]
    }
}

/// Runtime settings for catalog loading and export.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Header names the locator must find in a single row.
    pub columns: ColumnNames,

    /// Leading rows of each sheet searched for the header.
    pub header_scan_rows: usize,

    /// Upper bound on sheets searched. `None` searches every sheet.
    pub max_sheets: Option<usize>,

    /// Label of the trailing export row.
    pub total_label: String,

    /// Worksheet name for xlsx exports.
    pub export_sheet_name: String,

    /// Currency symbol for terminal display.
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            header_scan_rows: HEADER_SCAN_ROWS,
            max_sheets: None,
            total_label: TOTAL_ROW_LABEL.to_string(),
            export_sheet_name: EXPORT_SHEET_NAME.to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = self.columns.required();
        if required.iter().any(|c| c.trim().is_empty()) {
            return Err(BudgetError::InvalidInput(
                "column names must not be blank".to_string(),
            ));
        }
        if required.iter().any(|c| c.trim() != c) {
            return Err(BudgetError::InvalidInput(
                "column names must not have surrounding whitespace".to_string(),
            ));
        }
        if self.header_scan_rows == 0 {
            return Err(BudgetError::InvalidInput(
                "header_scan_rows must be at least 1".to_string(),
            ));
        }
        if self.max_sheets == Some(0) {
            return Err(BudgetError::InvalidInput(
                "max_sheets must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
