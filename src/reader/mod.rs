mod cell;
mod workbook;

pub use cell::{RawCell, SheetGrid};
pub use workbook::{read_csv_bytes, read_path, read_workbook_bytes, SourceFormat};
