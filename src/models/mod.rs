mod budget;
mod catalog;

pub use budget::{BudgetLine, LedgerSnapshot};
pub use catalog::{Catalog, CatalogItem};
