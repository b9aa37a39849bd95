//! Observation table for gridded, time-binned telemetry.
//!
//! Rows are keyed by `(cell_id, time_bin)` and carry the named numeric
//! columns produced by the upstream aggregation (congestion counts, velocity
//! statistics, cyclical hour encodings, ...). The table is the only input
//! format the windowing layer understands; how it was read from disk is not
//! this crate's concern.

use crate::error::{GridcastError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One aggregated observation for a grid cell at a time bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Discrete spatial grouping key (grid square).
    pub cell_id: String,
    /// Time bin at fixed granularity, unique within a cell.
    pub time_bin: DateTime<Utc>,
    /// Numeric values aligned with the table's column names.
    values: Vec<f64>,
}

impl Record {
    /// Create a record. Value count is validated by the owning table on insert.
    pub fn new(cell_id: impl Into<String>, time_bin: DateTime<Utc>, values: Vec<f64>) -> Self {
        Self {
            cell_id: cell_id.into(),
            time_bin,
            values,
        }
    }

    /// Numeric values in table column order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a column index.
    pub fn value(&self, column: usize) -> Result<f64> {
        self.values
            .get(column)
            .copied()
            .ok_or(GridcastError::IndexOutOfBounds {
                index: column,
                size: self.values.len(),
            })
    }
}

/// A column-named table of observations across many cells.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl ObservationTable {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, validating its width against the column names.
    pub fn push(&mut self, record: Record) -> Result<()> {
        if record.values.len() != self.columns.len() {
            return Err(GridcastError::DimensionMismatch {
                expected: self.columns.len(),
                got: record.values.len(),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    /// Append a row from its parts.
    pub fn push_row(
        &mut self,
        cell_id: impl Into<String>,
        time_bin: DateTime<Utc>,
        values: Vec<f64>,
    ) -> Result<()> {
        self.push(Record::new(cell_id, time_bin, values))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a named column, or a schema error naming the offender.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| GridcastError::MissingColumn(name.to_string()))
    }

    /// All values of a named column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Return a copy with one column rewritten through `f`.
    ///
    /// Used by the preparation pipeline to move the target column into
    /// scaled space without touching any other column.
    pub fn map_column(&self, name: &str, f: impl Fn(f64) -> f64) -> Result<ObservationTable> {
        let idx = self.require_column(name)?;
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut values = r.values.clone();
                values[idx] = f(values[idx]);
                Record::new(r.cell_id.clone(), r.time_bin, values)
            })
            .collect();
        Ok(ObservationTable {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Partition rows by cell id, preserving first-appearance cell order and
    /// within-cell insertion order.
    ///
    /// First-appearance order keeps dataset construction deterministic, which
    /// the idempotence guarantee of the window builder relies on.
    pub fn partition_by_cell(&self) -> Vec<(String, Vec<&Record>)> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<&Record>> = HashMap::new();
        for row in &self.rows {
            let entry = groups.entry(row.cell_id.clone()).or_insert_with(|| {
                order.push(row.cell_id.clone());
                Vec::new()
            });
            entry.push(row);
        }
        order
            .into_iter()
            .map(|cell| {
                let rows = groups.remove(&cell).unwrap_or_default();
                (cell, rows)
            })
            .collect()
    }
}
