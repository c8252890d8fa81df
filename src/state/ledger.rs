use tracing::debug;

use crate::error::{BudgetError, Result};
use crate::models::{BudgetLine, Catalog, LedgerSnapshot};

/// Lifecycle of a ledger. There is no terminal state: `reset` always
/// re-enters `Active` with no lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerState {
    #[default]
    Uninitialized,
    Active,
}

/// The budget being assembled: ordered lines plus their grand total.
///
/// Totals are recomputed after every mutation, so `grand_total` and each
/// line's `line_total` are never stale.
#[derive(Debug, Clone, Default)]
pub struct BudgetLedger {
    state: LedgerState,
    lines: Vec<BudgetLine>,
    grand_total: f64,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LedgerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LedgerState::Active
    }

    /// Drop every line and mark the ledger active.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.state = LedgerState::Active;
        self.compute_totals();
    }

    /// Append a placeholder line and return its index.
    pub fn add_line(&mut self) -> Result<usize> {
        if !self.is_active() {
            return Err(BudgetError::BudgetNotStarted);
        }
        self.lines.push(BudgetLine::unbound());
        self.compute_totals();
        Ok(self.lines.len() - 1)
    }

    /// Bind line `index` to the catalog item `name`, or unbind it with `None`.
    ///
    /// A name the catalog does not know leaves the line unbound rather than
    /// failing.
    pub fn set_line_item(&mut self, index: usize, name: Option<&str>, catalog: &Catalog) -> Result<()> {
        let line = self.line_mut(index)?;

        match name.and_then(|n| catalog.get(n)) {
            Some(item) => line.bind(item),
            None => {
                if let Some(n) = name {
                    debug!(line = index, item = n, "item not in catalog, line left unbound");
                }
                line.unbind();
            }
        }

        self.compute_totals();
        Ok(())
    }

    /// Set the quantity of line `index`. Negative and non-finite values are
    /// stored as 0.
    pub fn set_line_quantity(&mut self, index: usize, quantity: f64) -> Result<()> {
        self.line_mut(index)?.set_quantity(quantity);
        self.compute_totals();
        Ok(())
    }

    /// Recompute every line total and the grand total, in ledger order.
    pub fn compute_totals(&mut self) -> f64 {
        self.grand_total = self.lines.iter_mut().map(BudgetLine::recompute).sum();
        self.grand_total
    }

    /// Unbind lines whose item is missing from `catalog`.
    ///
    /// Lines still present keep their snapshot; quantities are untouched.
    /// Returns how many lines were unbound.
    pub fn reconcile(&mut self, catalog: &Catalog) -> usize {
        let mut unbound = 0;
        for line in &mut self.lines {
            let stale = line.item_ref().is_some_and(|name| !catalog.contains(name));
            if stale {
                line.unbind();
                unbound += 1;
            }
        }
        if unbound > 0 {
            self.compute_totals();
        }
        unbound
    }

    pub fn lines(&self) -> &[BudgetLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&BudgetLine> {
        self.lines.get(index)
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            lines: self.lines.clone(),
            grand_total: self.grand_total,
        }
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut BudgetLine> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(BudgetError::InvalidLine { index, len })
    }
}
