use serde::Serialize;

use crate::models::CatalogItem;

/// One row of the budget being assembled.
///
/// `unit` and `unit_price` are snapshots taken when the line is bound to a
/// catalog item. `line_total` is derived and only written by [`recompute`].
///
/// [`recompute`]: BudgetLine::recompute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    item_ref: Option<String>,
    unit: String,
    unit_price: f64,
    quantity: f64,
    line_total: f64,
}

impl Default for BudgetLine {
    fn default() -> Self {
        Self::unbound()
    }
}

impl BudgetLine {
    /// A placeholder line with no item and zero quantity.
    pub fn unbound() -> Self {
        Self {
            item_ref: None,
            unit: String::new(),
            unit_price: 0.0,
            quantity: 0.0,
            line_total: 0.0,
        }
    }

    pub fn item_ref(&self) -> Option<&str> {
        self.item_ref.as_deref()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn line_total(&self) -> f64 {
        self.line_total
    }

    pub fn is_bound(&self) -> bool {
        self.item_ref.is_some()
    }

    /// Point the line at `item`, snapshotting its unit and price.
    pub(crate) fn bind(&mut self, item: &CatalogItem) {
        self.item_ref = Some(item.name.clone());
        self.unit = item.unit.clone();
        self.unit_price = item.unit_price;
    }

    pub(crate) fn unbind(&mut self) {
        self.item_ref = None;
        self.unit.clear();
        self.unit_price = 0.0;
    }

    /// Store a quantity, clamping negative and non-finite values to 0.
    pub(crate) fn set_quantity(&mut self, quantity: f64) {
        self.quantity = clamp_quantity(quantity);
    }

    pub(crate) fn recompute(&mut self) -> f64 {
        self.line_total = self.unit_price * self.quantity;
        self.line_total
    }
}

/// Coerce a user-supplied quantity into the valid range `[0, +inf)`.
pub fn clamp_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Read-only view of the ledger for rendering and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub lines: Vec<BudgetLine>,
    pub grand_total: f64,
}
