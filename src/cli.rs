use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::error::{BudgetError, Result};
use crate::interface::parse_quantity;

/// budget_builder: price catalog items from a spreadsheet and assemble budgets.
#[derive(Parser, Debug)]
#[command(name = "budget_builder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON settings file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a catalog spreadsheet and list its priced items.
    Catalog {
        /// Base spreadsheet (.xlsx, .xls, .ods or .csv).
        file: PathBuf,

        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Assemble a budget interactively.
    Build {
        /// Base spreadsheet (.xlsx, .xls, .ods or .csv).
        file: PathBuf,
    },

    /// Assemble a budget from command-line lines.
    Quote {
        /// Base spreadsheet (.xlsx, .xls, .ods or .csv).
        file: PathBuf,

        /// A budget line as ITEM=QUANTITY. Repeat for more lines.
        #[arg(short, long = "line", value_name = "ITEM=QTY")]
        lines: Vec<String>,

        /// Write the budget to this file (.xlsx or .csv).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the budget as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Split an `ITEM=QTY` argument. The last `=` separates the quantity, so
/// item names may contain `=`.
pub fn parse_line_spec(spec: &str) -> Result<(String, f64)> {
    let (item, qty) = spec
        .rsplit_once('=')
        .ok_or_else(|| BudgetError::InvalidInput(format!("expected ITEM=QTY, got '{}'", spec)))?;

    if item.is_empty() {
        return Err(BudgetError::InvalidInput(format!("missing item in '{}'", spec)));
    }

    let quantity = parse_quantity(qty)
        .ok_or_else(|| BudgetError::InvalidInput(format!("invalid quantity in '{}'", spec)))?;

    Ok((item.to_string(), quantity))
}
