use std::collections::HashMap;

use serde::Serialize;

/// A priced item derived from one row of the base spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    /// Item identifier, exactly as it appears in the source.
    pub name: String,

    /// Display unit label (may be empty).
    pub unit: String,

    /// `total_value / total_quantity`.
    pub unit_price: f64,

    pub total_quantity: f64,

    pub total_value: f64,
}

impl CatalogItem {
    /// Build an item, deriving its unit price.
    ///
    /// Returns `None` when the price is undefined: zero quantity or a
    /// non-finite quotient.
    pub fn priced(
        name: impl Into<String>,
        unit: impl Into<String>,
        total_quantity: f64,
        total_value: f64,
    ) -> Option<Self> {
        if total_quantity == 0.0 {
            return None;
        }
        let unit_price = total_value / total_quantity;
        if !unit_price.is_finite() {
            return None;
        }
        Some(Self {
            name: name.into(),
            unit: unit.into(),
            unit_price,
            total_quantity,
            total_value,
        })
    }
}

/// Priced items keyed by name, in source row order.
///
/// The first item inserted under a name wins; later duplicates are ignored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    source_sheet: String,
    items: Vec<CatalogItem>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(source_sheet: impl Into<String>) -> Self {
        Self {
            source_sheet: source_sheet.into(),
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert an item unless its name is already present.
    ///
    /// Returns `false` when the item was a duplicate and was dropped.
    pub fn insert(&mut self, item: CatalogItem) -> bool {
        if self.index.contains_key(&item.name) {
            return false;
        }
        self.index.insert(item.name.clone(), self.items.len());
        self.items.push(item);
        true
    }

    /// Look up an item by its exact name.
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Items in source row order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    /// Name of the sheet the catalog was read from.
    pub fn source_sheet(&self) -> &str {
        &self.source_sheet
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
