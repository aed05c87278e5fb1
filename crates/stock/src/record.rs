//! In-memory inventory rows.

use serde::Serialize;
use std::fmt;

/// Identity column every stock operation keys on.
pub const ID_COLUMN: &str = "Unique Entry ID";

/// Quantity-on-hand column, synthesized at ingestion when absent.
pub const STOCK_COLUMN: &str = "Stock";

/// Value written into missing stock cells.
pub const DEFAULT_STOCK: &str = "0";

/// A stock cell as read back from the record set.
///
/// Source values are not validated, so a cell that does not parse as an
/// integer is surfaced verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StockValue {
    Count(i64),
    Verbatim(String),
}

impl StockValue {
    /// Interpret a raw cell.
    pub fn parse(cell: &str) -> Self {
        match cell.trim().parse::<i64>() {
            Ok(count) => Self::Count(count),
            Err(_) => Self::Verbatim(cell.to_string()),
        }
    }

    /// The integer quantity, if the cell held one.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Verbatim(_) => None,
        }
    }
}

impl fmt::Display for StockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{}", count),
            Self::Verbatim(raw) => write!(f, "{}", raw),
        }
    }
}

/// One inventory row; cells are aligned with the owning set's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    cells: Vec<String>,
}

impl Record {
    /// Cell at a column position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// All cells in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// What [`RecordSet::ensure_stock_column`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockColumn {
    /// The column was missing and has been added with `0` everywhere.
    Synthesized,
    /// The column existed; `filled` empty cells were set to `0`.
    Existing { filled: usize },
}

/// Ordered rows sharing one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Build a record set; rows are padded with empty cells or truncated to
    /// the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let records = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                Record { cells }
            })
            .collect();

        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell lookup by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.records.get(row)?.get(index)
    }

    /// `(column, value)` pairs for one row.
    pub fn fields<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(record.cells.iter().map(String::as_str))
    }

    /// Row positions whose cell in `column` equals `value`, in insertion order.
    pub fn matching_rows(&self, column: usize, value: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.get(column) == Some(value))
            .map(|(row, _)| row)
            .collect()
    }

    /// Identity values that occur on more than one row, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let Some(index) = self.column_index(ID_COLUMN) else {
            return Vec::new();
        };

        let mut seen = std::collections::HashMap::new();
        let mut order = Vec::new();
        for record in &self.records {
            let id = record.get(index).unwrap_or_default();
            let count = seen.entry(id).or_insert(0usize);
            *count += 1;
            if *count == 2 {
                order.push(id.to_string());
            }
        }

        order
    }

    /// Guarantee every row carries a stock cell.
    pub fn ensure_stock_column(&mut self) -> StockColumn {
        match self.column_index(STOCK_COLUMN) {
            None => {
                self.columns.push(STOCK_COLUMN.to_string());
                for record in &mut self.records {
                    record.cells.push(DEFAULT_STOCK.to_string());
                }
                StockColumn::Synthesized
            }
            Some(index) => {
                let mut filled = 0;
                for record in &mut self.records {
                    if record.cells[index].trim().is_empty() {
                        record.cells[index] = DEFAULT_STOCK.to_string();
                        filled += 1;
                    }
                }
                StockColumn::Existing { filled }
            }
        }
    }

    pub(crate) fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self
            .records
            .get_mut(row)
            .and_then(|record| record.cells.get_mut(column))
        {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_rows_are_aligned_to_header() {
        let set = RecordSet::new(
            strings(&["Unique Entry ID", "Name", "Color"]),
            vec![strings(&["A1"]), strings(&["B2", "Glasses", "black", "extra"])],
        );

        assert_eq!(set.records()[0].cells(), strings(&["A1", "", ""]).as_slice());
        assert_eq!(set.records()[1].cells().len(), 3);
        assert_eq!(set.value(1, "Color"), Some("black"));
        assert_eq!(set.value(0, "Missing"), None);
    }

    #[test]
    fn test_stock_value_parse() {
        assert_eq!(StockValue::parse("12"), StockValue::Count(12));
        assert_eq!(StockValue::parse(" -3 "), StockValue::Count(-3));
        assert_eq!(
            StockValue::parse("twelve"),
            StockValue::Verbatim("twelve".to_string())
        );
        assert_eq!(StockValue::parse("4.5").as_count(), None);
        assert_eq!(StockValue::Count(7).to_string(), "7");
    }

    #[test]
    fn test_ensure_stock_column_synthesizes() {
        let mut set = RecordSet::new(
            strings(&["Unique Entry ID"]),
            vec![strings(&["A1"]), strings(&["B2"])],
        );

        assert_eq!(set.ensure_stock_column(), StockColumn::Synthesized);
        assert_eq!(set.columns().last().map(String::as_str), Some(STOCK_COLUMN));
        assert_eq!(set.value(0, STOCK_COLUMN), Some("0"));
        assert_eq!(set.value(1, STOCK_COLUMN), Some("0"));
    }

    #[test]
    fn test_ensure_stock_column_fills_only_empty_cells() {
        let mut set = RecordSet::new(
            strings(&["Unique Entry ID", "Stock"]),
            vec![strings(&["A1", "5"]), strings(&["B2", ""]), strings(&["C3", "n/a"])],
        );

        assert_eq!(set.ensure_stock_column(), StockColumn::Existing { filled: 1 });
        assert_eq!(set.value(0, STOCK_COLUMN), Some("5"));
        assert_eq!(set.value(1, STOCK_COLUMN), Some("0"));
        assert_eq!(set.value(2, STOCK_COLUMN), Some("n/a"));
    }

    #[test]
    fn test_matching_rows_and_duplicates() {
        let set = RecordSet::new(
            strings(&["Unique Entry ID", "Stock"]),
            vec![
                strings(&["A1", "1"]),
                strings(&["B2", "2"]),
                strings(&["A1", "3"]),
                strings(&["A1", "4"]),
            ],
        );

        assert_eq!(set.matching_rows(0, "A1"), vec![0, 2, 3]);
        assert!(set.matching_rows(0, "a1").is_empty());
        assert_eq!(set.duplicate_ids(), vec!["A1".to_string()]);
    }

    #[test]
    fn test_fields_pairs_columns_with_cells() {
        let set = RecordSet::new(
            strings(&["Unique Entry ID", "Name"]),
            vec![strings(&["A1", "Cable"])],
        );

        let fields: Vec<_> = set.fields(&set.records()[0]).collect();
        assert_eq!(fields, vec![("Unique Entry ID", "A1"), ("Name", "Cable")]);
    }
}
