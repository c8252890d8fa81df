pub mod builder;
pub mod constants;
pub mod header;
pub mod loader;
pub mod table;

pub use builder::{build_catalog, BuildReport};
pub use header::{locate_header, HeaderLocation, ScanWindow};
pub use loader::{load_catalog, load_catalog_bytes, load_catalog_path, LoadedCatalog};
pub use table::HeaderedTable;
