//! Ingestion failures.

use std::path::PathBuf;
use thiserror::Error;

/// Why an inventory file could not be turned into a record set.
///
/// These never escape as panics: the loader logs them and the store keeps
/// them as its `Unavailable` state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The path does not resolve to a readable file.
    #[error("inventory file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// The file has no header row.
    #[error("inventory file is empty: {}", .path.display())]
    SourceEmpty { path: PathBuf },

    /// Any other read or parse failure.
    #[error("unexpected error reading {}: {reason}", .path.display())]
    Unexpected { path: PathBuf, reason: String },
}

impl IngestError {
    /// Short machine-friendly name, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "source_not_found",
            Self::SourceEmpty { .. } => "source_empty",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}
