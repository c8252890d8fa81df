pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interface;
pub mod logging;
pub mod models;
pub mod reader;
pub mod state;

pub use config::Settings;
pub use error::{BudgetError, Result};
pub use models::{BudgetLine, Catalog, CatalogItem, LedgerSnapshot};
pub use state::{BudgetLedger, Session};
