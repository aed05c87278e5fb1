//! Stock record store: get/set quantity by product ID.
//!
//! Every operation runs inside a `tracing` span, so entry, exit and elapsed
//! time are logged on every return path. No operation returns an error: each
//! failure is logged and reported through an explicit outcome variant.

use crate::error::IngestError;
use crate::ingest::CsvLoader;
use crate::record::{RecordSet, StockValue, ID_COLUMN, STOCK_COLUMN};
use serde::Serialize;
use std::path::Path;

/// Whether the store has a record set to work on.
#[derive(Debug, Clone)]
pub enum StoreState {
    Loaded(RecordSet),
    /// Ingestion failed; the cause is kept so callers can report it.
    Unavailable(IngestError),
}

/// Result of [`StockStore::set_quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Every row with the ID was updated.
    Updated { matched: usize },
    NotFound,
    /// The identity column is not in the record set.
    ColumnMissing,
    StoreUnavailable,
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Result of [`StockStore::get_quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuantityLookup {
    /// Stock of the first matching row; `matches` counts all rows with the ID.
    Found { quantity: StockValue, matches: usize },
    NotFound,
    ColumnMissing,
    StoreUnavailable,
}

impl QuantityLookup {
    /// Sentinel view: the quantity, or `None` for every failure.
    pub fn quantity(&self) -> Option<&StockValue> {
        match self {
            Self::Found { quantity, .. } => Some(quantity),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Owns the in-memory record set for the life of the process.
#[derive(Debug, Clone)]
pub struct StockStore {
    state: StoreState,
}

impl StockStore {
    /// Wrap a loaded record set. The stock column is guaranteed afterwards.
    pub fn new(mut records: RecordSet) -> Self {
        records.ensure_stock_column();
        tracing::info!("Stock store initialized with {} records", records.len());
        Self {
            state: StoreState::Loaded(records),
        }
    }

    /// A store whose ingestion failed; every operation reports `StoreUnavailable`.
    pub fn unavailable(error: IngestError) -> Self {
        tracing::warn!(kind = error.kind(), "Stock store has no data: {}", error);
        Self {
            state: StoreState::Unavailable(error),
        }
    }

    pub fn from_ingest(result: Result<RecordSet, IngestError>) -> Self {
        match result {
            Ok(records) => Self::new(records),
            Err(error) => Self::unavailable(error),
        }
    }

    /// Ingest `path` and wrap the outcome.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::from_ingest(CsvLoader::new(path.as_ref()).load())
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, StoreState::Loaded(_))
    }

    /// Number of records; zero when unavailable.
    pub fn len(&self) -> usize {
        match &self.state {
            StoreState::Loaded(records) => records.len(),
            StoreState::Unavailable(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the stock of every row whose `Unique Entry ID` equals `id`.
    ///
    /// The quantity is stored as given; no range check is applied.
    #[tracing::instrument(skip(self))]
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> UpdateOutcome {
        let records = match &mut self.state {
            StoreState::Loaded(records) => records,
            StoreState::Unavailable(error) => {
                tracing::error!("Cannot update stock, inventory not loaded: {}", error);
                return UpdateOutcome::StoreUnavailable;
            }
        };

        let Some(id_index) = records.column_index(ID_COLUMN) else {
            tracing::error!("Column '{}' not found in inventory", ID_COLUMN);
            return UpdateOutcome::ColumnMissing;
        };

        let rows = records.matching_rows(id_index, id);
        if rows.is_empty() {
            tracing::warn!("Product with ID {} not found", id);
            return UpdateOutcome::NotFound;
        }

        // Present after construction; `new` ensures the column.
        let Some(stock_index) = records.column_index(STOCK_COLUMN) else {
            tracing::error!("Column '{}' not found in inventory", STOCK_COLUMN);
            return UpdateOutcome::ColumnMissing;
        };

        for &row in &rows {
            records.set_cell(row, stock_index, quantity.to_string());
        }

        if rows.len() > 1 {
            tracing::warn!("Product ID {} matched {} rows, all updated", id, rows.len());
        }
        tracing::info!(
            "Stock updated for product with ID {}. New quantity: {}",
            id,
            quantity
        );

        UpdateOutcome::Updated {
            matched: rows.len(),
        }
    }

    /// Stock of the first row whose `Unique Entry ID` equals `id`.
    #[tracing::instrument(skip(self))]
    pub fn get_quantity(&self, id: &str) -> QuantityLookup {
        let records = match &self.state {
            StoreState::Loaded(records) => records,
            StoreState::Unavailable(error) => {
                tracing::error!("Cannot read stock, inventory not loaded: {}", error);
                return QuantityLookup::StoreUnavailable;
            }
        };

        let Some(id_index) = records.column_index(ID_COLUMN) else {
            tracing::error!("Column '{}' not found in inventory", ID_COLUMN);
            return QuantityLookup::ColumnMissing;
        };

        let rows = records.matching_rows(id_index, id);
        let Some(&first) = rows.first() else {
            tracing::warn!("Product with ID {} not found", id);
            return QuantityLookup::NotFound;
        };

        let raw = records.value(first, STOCK_COLUMN).unwrap_or_default();
        let quantity = StockValue::parse(raw);

        if rows.len() > 1 {
            tracing::warn!(
                "Product ID {} matched {} rows, returning the first",
                id,
                rows.len()
            );
        }
        tracing::info!(
            "Stock checked for product with ID {}. Result: {} units",
            id,
            quantity
        );

        QuantityLookup::Found {
            quantity,
            matches: rows.len(),
        }
    }

    /// The live record set, `None` when the inventory is unavailable.
    #[tracing::instrument(skip(self))]
    pub fn snapshot(&self) -> Option<&RecordSet> {
        match &self.state {
            StoreState::Loaded(records) => {
                tracing::info!("Inventory snapshot returned ({} records)", records.len());
                Some(records)
            }
            StoreState::Unavailable(error) => {
                tracing::warn!("No inventory snapshot available: {}", error);
                None
            }
        }
    }
}
