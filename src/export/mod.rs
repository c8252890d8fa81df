pub mod encoder;
pub mod format;

pub use encoder::{encode_csv, encode_xlsx, export_rows, write_export, ExportRow, EXPORT_HEADERS};
pub use format::{format_brl, format_currency, format_number_br, format_quantity};
