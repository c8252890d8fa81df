/// Column holding the item identifier.
pub const COL_ITEM: &str = "Item";

/// Column holding the display unit label.
pub const COL_UNIT: &str = "un";

/// Column holding the total quantity for the row.
pub const COL_QUANTITY_TOTAL: &str = "Quantidade Total";

/// Column holding the total value for the row.
pub const COL_VALUE_TOTAL: &str = "Valor Total";

/// Columns every catalog sheet must carry in its header row.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_ITEM, COL_UNIT, COL_QUANTITY_TOTAL, COL_VALUE_TOTAL];

/// Leading rows of each sheet searched for the header.
pub const HEADER_SCAN_ROWS: usize = 10;

/// Label of the synthetic row appended to every export.
pub const TOTAL_ROW_LABEL: &str = "TOTAL GERAL";

/// Worksheet name used for xlsx exports.
pub const EXPORT_SHEET_NAME: &str = "Orcamento_CO";

/// Currency symbol used by the display formatter.
pub const CURRENCY_SYMBOL: &str = "R$";
