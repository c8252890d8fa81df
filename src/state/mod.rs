mod ledger;
mod session;

pub use ledger::{BudgetLedger, LedgerState};
pub use session::{CatalogSummary, Session};
