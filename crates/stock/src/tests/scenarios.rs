//! Ingestion-to-store properties on real files.

use crate::{IngestError, QuantityLookup, StockStore, StockValue, StoreState, UpdateOutcome};
use crate::{ID_COLUMN, STOCK_COLUMN};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn count(store: &StockStore, id: &str) -> Option<i64> {
    store.get_quantity(id).quantity().and_then(StockValue::as_count)
}

#[test]
fn test_missing_stock_column_defaults_every_row_to_zero() {
    let file = csv_file(
        "Unique Entry ID,Product Name,Color\nFNxEraBTeWRiCvtFu,3D Glasses,black\nQ9,Remote,grey\nZ7,Mount,white\n",
    );
    let store = StockStore::open(file.path());
    let records = store.snapshot().unwrap();

    assert_eq!(records.len(), 3);
    for row in 0..records.len() {
        assert_eq!(records.value(row, STOCK_COLUMN), Some("0"));
    }
}

#[test]
fn test_existing_stock_values_are_not_altered() {
    let file = csv_file("Unique Entry ID,Stock\nA1,5\nB2,17\nC3,0\n");
    let store = StockStore::open(file.path());

    assert_eq!(count(&store, "A1"), Some(5));
    assert_eq!(count(&store, "B2"), Some(17));
    assert_eq!(count(&store, "C3"), Some(0));
}

#[test]
fn test_partial_stock_scenario() {
    // B2 has no stock value in the source
    let file = csv_file("Unique Entry ID,Stock\nA1,5\nB2,\n");
    let mut store = StockStore::open(file.path());

    assert_eq!(count(&store, "A1"), Some(5));
    assert_eq!(count(&store, "B2"), Some(0));

    assert_eq!(store.set_quantity("A1", 45), UpdateOutcome::Updated { matched: 1 });
    assert_eq!(count(&store, "A1"), Some(45));
}

#[test]
fn test_round_trip_for_many_quantities() {
    let file = csv_file("Unique Entry ID,Name\nA1,Glasses\nB2,Cable\n");
    let mut store = StockStore::open(file.path());

    for quantity in [0, 1, 45, -7, i64::MAX, i64::MIN] {
        assert!(store.set_quantity("B2", quantity).is_updated());
        assert_eq!(count(&store, "B2"), Some(quantity));
    }
    assert_eq!(count(&store, "A1"), Some(0));
}

#[test]
fn test_absent_id_is_a_no_op() {
    let file = csv_file("Unique Entry ID,Stock\nA1,5\nB2,3\n");
    let mut store = StockStore::open(file.path());
    let before = store.snapshot().cloned().unwrap();

    assert_eq!(store.get_quantity("ZZZ"), QuantityLookup::NotFound);
    assert_eq!(store.set_quantity("ZZZ", 10), UpdateOutcome::NotFound);
    assert_eq!(store.get_quantity("ZZZ"), QuantityLookup::NotFound);

    let after = store.snapshot().unwrap();
    assert_eq!(after.len(), before.len());
    assert_eq!(after, &before);
}

#[test]
fn test_nonexistent_path_yields_unavailable_store() {
    let dir = TempDir::new().unwrap();
    let mut store = StockStore::open(dir.path().join("missing.csv"));

    assert!(matches!(
        store.state(),
        StoreState::Unavailable(IngestError::SourceNotFound { .. })
    ));
    assert!(store.snapshot().is_none());
    assert_eq!(store.set_quantity("A1", 45), UpdateOutcome::StoreUnavailable);
    assert_eq!(store.get_quantity("A1").quantity(), None);
}

#[test]
fn test_empty_file_yields_unavailable_store() {
    let file = csv_file("");
    let store = StockStore::open(file.path());

    assert!(matches!(
        store.state(),
        StoreState::Unavailable(IngestError::SourceEmpty { .. })
    ));
    assert_eq!(store.len(), 0);
}

#[test]
fn test_store_without_id_column_finds_nothing() {
    let file = csv_file("SKU,Stock\nA1,5\n");
    let mut store = StockStore::open(file.path());

    assert!(store.snapshot().is_some_and(|records| !records.has_column(ID_COLUMN)));
    assert_eq!(store.get_quantity("A1").quantity(), None);
    assert_eq!(store.set_quantity("A1", 1), UpdateOutcome::ColumnMissing);
}
