#[macro_use]
extern crate assert_float_eq;

use budget_builder_rs::reader::SourceFormat;
use budget_builder_rs::state::LedgerState;
use budget_builder_rs::{BudgetError, BudgetLedger, Catalog, CatalogItem, Session, Settings};

const BASE_CSV: &str = "Orçamento base;;;\n\
                        Item;un;Quantidade Total;Valor Total\n\
                        Cimento;sc;10;250\n\
                        Areia;m3;3;100\n\
                        Brita;m3;4;\"1.234,5\"\n";

fn catalog() -> Catalog {
    let mut catalog = Catalog::new("Base");
    catalog.insert(CatalogItem::priced("Cimento", "sc", 10.0, 250.0).unwrap());
    catalog.insert(CatalogItem::priced("Areia", "m3", 3.0, 100.0).unwrap());
    catalog.insert(CatalogItem::priced("Tijolo", "mil", 2.0, 1500.0).unwrap());
    catalog
}

fn session() -> Session {
    let mut session = Session::new(Settings::default());
    session
        .load_catalog_bytes(BASE_CSV.as_bytes(), SourceFormat::Csv)
        .unwrap();
    session.start_budget().unwrap();
    session
}

fn sum_of_lines(ledger: &BudgetLedger) -> f64 {
    ledger.lines().iter().map(|l| l.line_total()).sum()
}

#[test]
fn test_grand_total_tracks_every_mutation() {
    let catalog = catalog();
    let mut ledger = BudgetLedger::new();
    ledger.reset();

    let steps: [(usize, Option<&str>, f64); 6] = [
        (0, Some("Cimento"), 4.0),
        (1, Some("Areia"), 1.5),
        (2, Some("Inexistente"), 9.0),
        (1, None, 1.5),
        (0, Some("Tijolo"), 0.5),
        (2, Some("Cimento"), -3.0),
    ];

    for _ in 0..3 {
        ledger.add_line().unwrap();
    }

    for (index, item, quantity) in steps {
        ledger.set_line_item(index, item, &catalog).unwrap();
        ledger.set_line_quantity(index, quantity).unwrap();

        assert_eq!(ledger.grand_total(), sum_of_lines(&ledger));
        for line in ledger.lines() {
            assert_eq!(line.line_total(), line.unit_price() * line.quantity());
            assert!(line.quantity() >= 0.0);
            if !line.is_bound() {
                assert_eq!(line.unit_price(), 0.0);
                assert_eq!(line.unit(), "");
                assert_eq!(line.line_total(), 0.0);
            }
        }
    }

    assert_float_absolute_eq!(ledger.grand_total(), 375.0, 1e-9);
}

#[test]
fn test_lines_before_start_are_rejected() {
    let mut ledger = BudgetLedger::new();
    assert_eq!(ledger.state(), LedgerState::Uninitialized);
    assert!(matches!(ledger.add_line(), Err(BudgetError::BudgetNotStarted)));

    ledger.reset();
    assert_eq!(ledger.state(), LedgerState::Active);
    assert_eq!(ledger.add_line().unwrap(), 0);
}

#[test]
fn test_reset_twice_matches_reset_once() {
    let catalog = catalog();
    let mut ledger = BudgetLedger::new();
    ledger.reset();
    ledger.add_line().unwrap();
    ledger.set_line_item(0, Some("Cimento"), &catalog).unwrap();
    ledger.set_line_quantity(0, 2.0).unwrap();

    ledger.reset();
    let once = ledger.snapshot();
    ledger.reset();
    let twice = ledger.snapshot();

    assert_eq!(once, twice);
    assert!(twice.lines.is_empty());
    assert_eq!(twice.grand_total, 0.0);
}

#[test]
fn test_invalid_index_changes_nothing() {
    let catalog = catalog();
    let mut ledger = BudgetLedger::new();
    ledger.reset();
    ledger.add_line().unwrap();
    ledger.set_line_item(0, Some("Areia"), &catalog).unwrap();
    ledger.set_line_quantity(0, 3.0).unwrap();
    let before = ledger.snapshot();

    assert!(matches!(
        ledger.set_line_quantity(5, 1.0),
        Err(BudgetError::InvalidLine { index: 5, len: 1 })
    ));
    assert!(ledger.set_line_item(1, Some("Cimento"), &catalog).is_err());
    assert_eq!(ledger.snapshot(), before);
}

#[test]
fn test_non_finite_quantity_is_zero() {
    let mut ledger = BudgetLedger::new();
    ledger.reset();
    ledger.add_line().unwrap();

    ledger.set_line_quantity(0, f64::NAN).unwrap();
    assert_eq!(ledger.line(0).unwrap().quantity(), 0.0);
    ledger.set_line_quantity(0, f64::INFINITY).unwrap();
    assert_eq!(ledger.line(0).unwrap().quantity(), 0.0);
}

#[test]
fn test_session_prices_from_loaded_sheet() {
    let mut session = session();
    for (item, quantity) in [("Cimento", 2.0), ("Brita", 1.0)] {
        let index = session.add_line().unwrap();
        session.set_line_item(index, Some(item)).unwrap();
        session.set_line_quantity(index, quantity).unwrap();
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.lines[0].line_total(), 50.0);
    assert_float_absolute_eq!(snapshot.lines[1].unit_price(), 308.625, 1e-9);
    assert_float_absolute_eq!(snapshot.grand_total, 358.625, 1e-9);
}

#[test]
fn test_reload_keeps_surviving_snapshots() {
    let mut session = session();
    for item in ["Cimento", "Areia"] {
        let index = session.add_line().unwrap();
        session.set_line_item(index, Some(item)).unwrap();
        session.set_line_quantity(index, 2.0).unwrap();
    }

    let repriced = "Item,un,Quantidade Total,Valor Total\nCimento,sc,1,999\n";
    let summary = session
        .load_catalog_bytes(repriced.as_bytes(), SourceFormat::Csv)
        .unwrap();
    assert_eq!(summary.lines_unbound, 1);

    let cimento = session.ledger().line(0).unwrap();
    assert_eq!(cimento.item_ref(), Some("Cimento"));
    assert_eq!(cimento.unit_price(), 25.0);

    let areia = session.ledger().line(1).unwrap();
    assert!(!areia.is_bound());
    assert_eq!(areia.quantity(), 2.0);
    assert_eq!(session.ledger().grand_total(), 50.0);

    // Rebinding picks up the new price.
    session.set_line_item(0, Some("Cimento")).unwrap();
    assert_eq!(session.ledger().grand_total(), 1998.0);
}

#[test]
fn test_failed_reload_keeps_everything() {
    let mut session = session();
    let index = session.add_line().unwrap();
    session.set_line_item(index, Some("Areia")).unwrap();
    let before = session.snapshot();

    let broken = "Item;un;Valor Total\nAreia;m3;10\n";
    let err = session
        .load_catalog_bytes(broken.as_bytes(), SourceFormat::Csv)
        .unwrap_err();

    assert_eq!(err.reason(), "missing columns");
    assert_eq!(session.catalog().unwrap().len(), 3);
    assert_eq!(session.snapshot(), before);
}
