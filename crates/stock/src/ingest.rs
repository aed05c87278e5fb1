//! Tabular ingestion: CSV file to [`RecordSet`].
//!
//! The loader owns every failure mode of reading the source. Each one is
//! logged here and handed back as an [`IngestError`] value, so callers can
//! build an explicitly unavailable store instead of crashing.

use crate::error::IngestError;
use crate::record::{RecordSet, StockColumn, STOCK_COLUMN};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Label used for record sets parsed from an in-memory reader.
const READER_LABEL: &str = "<reader>";

/// Loads an inventory CSV (header row plus data rows, comma-delimited).
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, synthesizing the stock column if needed.
    #[tracing::instrument(name = "ingest", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<RecordSet, IngestError> {
        tracing::info!("Loading inventory from {}", self.path.display());

        let file = match self.open() {
            Ok(file) => file,
            Err(error) => {
                tracing::error!(kind = error.kind(), "{}", error);
                return Err(error);
            }
        };

        self.load_reader(file)
    }

    /// Parse inventory rows from any reader, attributing errors to this
    /// loader's path.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<RecordSet, IngestError> {
        let start = Instant::now();

        let result = parse(reader).map_err(|e| IngestError::Unexpected {
            path: self.path.clone(),
            reason: e.to_string(),
        });

        let mut records = match result {
            Ok(Some(records)) => records,
            Ok(None) => {
                let error = IngestError::SourceEmpty {
                    path: self.path.clone(),
                };
                tracing::error!(kind = error.kind(), "{}", error);
                return Err(error);
            }
            Err(error) => {
                tracing::error!(kind = error.kind(), "{}", error);
                return Err(error);
            }
        };

        match records.ensure_stock_column() {
            StockColumn::Synthesized => {
                tracing::debug!("No '{}' column in source, initialized to 0", STOCK_COLUMN)
            }
            StockColumn::Existing { filled } if filled > 0 => {
                tracing::debug!("Filled {} empty '{}' cells with 0", filled, STOCK_COLUMN)
            }
            StockColumn::Existing { .. } => {}
        }

        let duplicates = records.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                "{} product IDs appear on more than one row (first: {}); updates apply to every match, lookups return the first",
                duplicates.len(),
                duplicates[0]
            );
        }

        tracing::info!(
            "Inventory loaded in {:.2} seconds ({} rows)",
            start.elapsed().as_secs_f64(),
            records.len()
        );
        tracing::info!("Inventory columns: {:?}", records.columns());

        Ok(records)
    }

    fn open(&self) -> Result<File, IngestError> {
        if !self.path.is_file() {
            return Err(IngestError::SourceNotFound {
                path: self.path.clone(),
            });
        }

        File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => IngestError::SourceNotFound {
                path: self.path.clone(),
            },
            _ => IngestError::Unexpected {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })
    }
}

impl RecordSet {
    /// Parse inventory rows from an in-memory reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        CsvLoader::new(READER_LABEL).load_reader(reader)
    }
}

/// `Ok(None)` when the input has no header row.
fn parse<R: Read>(reader: R) -> Result<Option<RecordSet>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Ok(None);
    }

    let columns = headers.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Some(RecordSet::new(columns, rows)))
}
