use crate::export::{format_currency, format_quantity};
use crate::models::{Catalog, LedgerSnapshot};
use crate::state::CatalogSummary;

/// Print feedback after a catalog load.
pub fn display_load_summary(summary: &CatalogSummary) {
    println!(
        "Catalog loaded from sheet '{}' (header on row {}): {} items",
        summary.sheet,
        summary.header_row + 1,
        summary.items
    );

    let skipped = summary.report.dropped_missing + summary.report.dropped_unpriced;
    if skipped > 0 {
        println!("  {} rows skipped (missing values or zero quantity)", skipped);
    }
    if summary.report.duplicates_ignored > 0 {
        println!(
            "  {} duplicate items ignored (first occurrence kept)",
            summary.report.duplicates_ignored
        );
    }
    if summary.lines_unbound > 0 {
        println!(
            "  {} budget lines cleared: their item is not in this catalog",
            summary.lines_unbound
        );
    }
}

/// Display the catalog as an aligned table.
pub fn display_catalog(catalog: &Catalog, currency: &str) {
    if catalog.is_empty() {
        println!("Catalog is empty.");
        return;
    }

    println!();
    println!("=== Catalog: {} ({} items) ===", catalog.source_sheet(), catalog.len());
    println!();

    let name_width = catalog.items().iter().map(|i| i.name.chars().count()).max().unwrap_or(10);

    for item in catalog.items() {
        println!(
            "  {:<width$}  {:>5}  {:>16}",
            item.name,
            item.unit,
            format_currency(item.unit_price, currency),
            width = name_width
        );
    }

    println!();
}

/// Display the budget lines and grand total.
pub fn display_budget(snapshot: &LedgerSnapshot, currency: &str) {
    println!();
    println!("=== Budget ===");
    println!();

    if snapshot.lines.is_empty() {
        println!("  (no lines yet)");
    }

    let name_width = snapshot
        .lines
        .iter()
        .filter_map(|l| l.item_ref())
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(16);

    for (i, line) in snapshot.lines.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {:>5}  {:>16} x {:>8} = {:>16}",
            i + 1,
            line.item_ref().unwrap_or("(no item)"),
            line.unit(),
            format_currency(line.unit_price(), currency),
            format_quantity(line.quantity()),
            format_currency(line.line_total(), currency),
            width = name_width
        );
    }

    println!();
    println!("--- Total ---");
    println!("Lines: {}", snapshot.lines.len());
    println!("Grand total: {}", format_currency(snapshot.grand_total, currency));
    println!();
}
