//! Inventory stock store.
//!
//! Loads product rows from a CSV file into an in-memory [`RecordSet`] and
//! exposes get/set of the `Stock` quantity keyed on `Unique Entry ID`.
//!
//! # Example
//! ```no_run
//! use inventory_stock::StockStore;
//!
//! let mut store = StockStore::open("data/raw_data/accessories.csv");
//! store.set_quantity("FNxEraBTeWRiCvtFu", 45);
//! if let Some(quantity) = store.get_quantity("FNxEraBTeWRiCvtFu").quantity() {
//!     println!("{} units", quantity);
//! }
//! ```

pub mod error;
pub mod ingest;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use error::IngestError;
pub use ingest::CsvLoader;
pub use record::{Record, RecordSet, StockColumn, StockValue, ID_COLUMN, STOCK_COLUMN};
pub use store::{QuantityLookup, StockStore, StoreState, UpdateOutcome};
