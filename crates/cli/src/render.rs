//! User-facing messages and tables.

use crate::form::InputError;
use inventory_core::AppError;
use inventory_stock::{QuantityLookup, RecordSet, UpdateOutcome};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome shown to the user: success or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Warning(String),
}

impl Feedback {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Warning(message) => message,
        }
    }

    pub fn lookup(id: &str, lookup: &QuantityLookup) -> Self {
        match lookup {
            QuantityLookup::Found { quantity, .. } => Self::Success(format!(
                "Product with ID {} has {} units in stock.",
                id, quantity
            )),
            QuantityLookup::NotFound | QuantityLookup::ColumnMissing => {
                Self::Warning(format!("No product found with ID {}.", id))
            }
            QuantityLookup::StoreUnavailable => {
                Self::Warning("Inventory is not loaded; stock cannot be checked.".to_string())
            }
        }
    }

    pub fn update(id: &str, quantity: i64, outcome: &UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Updated { .. } => Self::Success(format!(
                "Stock for product with ID {} updated to {} units.",
                id, quantity
            )),
            UpdateOutcome::NotFound | UpdateOutcome::ColumnMissing => {
                Self::Warning(format!("No product found with ID {}; nothing updated.", id))
            }
            UpdateOutcome::StoreUnavailable => {
                Self::Warning("Inventory is not loaded; stock cannot be updated.".to_string())
            }
        }
    }

    /// A failed bridge call is a warning, never a crash.
    pub fn answer(result: Result<&str, &AppError>) -> Self {
        match result {
            Ok(answer) => Self::Success(format!("LLM answer: {}", answer)),
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                Self::Warning("No answer was obtained. Try asking another question.".to_string())
            }
        }
    }

    pub fn invalid(error: &InputError) -> Self {
        Self::Warning(error.to_string())
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(message) => write!(f, "[ok] {}", message),
            Self::Warning(message) => write!(f, "[warning] {}", message),
        }
    }
}

/// The first `limit` records as an aligned text table, header first.
pub fn table(records: &RecordSet, limit: usize) -> String {
    let rows: Vec<&[String]> = records
        .records()
        .iter()
        .take(limit)
        .map(|record| record.cells())
        .collect();

    let mut widths: Vec<usize> = records.columns().iter().map(|c| c.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(records.columns()));
    lines.extend(rows.into_iter().map(format_line));
    lines.join("\n")
}

/// The first `limit` records as JSON objects keyed by column name.
pub fn records_json(records: &RecordSet, limit: usize) -> Value {
    let rows = records
        .records()
        .iter()
        .take(limit)
        .map(|record| {
            let object: Map<String, Value> = records
                .fields(record)
                .map(|(column, value)| (column.to_string(), Value::String(value.to_string())))
                .collect();
            Value::Object(object)
        })
        .collect();

    Value::Array(rows)
}
