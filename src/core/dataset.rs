//! Window, target and dataset structures produced by the window builder.

use crate::error::{GridcastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing the shape of a windowed dataset.
///
/// Persisted as JSON next to the arrays so that inference-time consumers can
/// validate predictor compatibility before loading any weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Number of past time steps fed as model input.
    pub lookback: usize,
    /// Number of future steps a single predictor call outputs.
    pub horizon: usize,
    /// Number of feature columns per time step.
    pub n_features: usize,
    /// Ordered feature column names.
    pub feature_columns: Vec<String>,
    /// Name of the forecast target column.
    pub target_column: String,
}

/// A `(lookback, n_features)` matrix copied out of one cell's contiguous
/// records. Each window exclusively owns its slice; nothing is aliased
/// between windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    rows: Vec<Vec<f64>>,
}

impl Window {
    /// Create a window from row-major data, validating rectangularity.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(GridcastError::EmptyData);
        }
        let width = rows[0].len();
        for row in &rows {
            if row.len() != width {
                return Err(GridcastError::DimensionMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of time steps in the window.
    pub fn lookback(&self) -> usize {
        self.rows.len()
    }

    /// Number of feature columns per time step.
    pub fn n_features(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Rows in chronological order, oldest first.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// A single row.
    pub fn row(&self, index: usize) -> Result<&[f64]> {
        self.rows
            .get(index)
            .map(|r| r.as_slice())
            .ok_or(GridcastError::IndexOutOfBounds {
                index,
                size: self.rows.len(),
            })
    }

    /// The most recent row.
    pub fn last_row(&self) -> &[f64] {
        // Constructor guarantees at least one row.
        self.rows.last().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Check that this window has the given shape.
    pub fn check_shape(&self, lookback: usize, n_features: usize) -> Result<()> {
        if self.lookback() != lookback || self.n_features() != n_features {
            return Err(GridcastError::ShapeMismatch {
                expected_rows: lookback,
                expected_cols: n_features,
                rows: self.lookback(),
                cols: self.n_features(),
            });
        }
        Ok(())
    }
}

/// An ordered collection of (window, target) pairs with shared metadata.
///
/// Per-cell chronological order is preserved; there is no ordering guarantee
/// across cells. Each window also carries the `time_bin` of its last observed
/// row, which the global-time split strategy cuts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSet {
    meta: DatasetMeta,
    windows: Vec<Window>,
    targets: Vec<Vec<f64>>,
    window_ends: Vec<DateTime<Utc>>,
}

impl WindowSet {
    /// Create an empty set with the given metadata.
    pub fn new(meta: DatasetMeta) -> Self {
        Self {
            meta,
            windows: Vec::new(),
            targets: Vec::new(),
            window_ends: Vec::new(),
        }
    }

    /// Append a (window, target) pair.
    ///
    /// Shapes are validated against the metadata so a malformed pair can
    /// never enter the dataset.
    pub fn push(&mut self, window: Window, target: Vec<f64>, end: DateTime<Utc>) -> Result<()> {
        window.check_shape(self.meta.lookback, self.meta.n_features)?;
        if target.len() != self.meta.horizon {
            return Err(GridcastError::DimensionMismatch {
                expected: self.meta.horizon,
                got: target.len(),
            });
        }
        self.windows.push(window);
        self.targets.push(target);
        self.window_ends.push(end);
        Ok(())
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Check if the set has no samples.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Dataset metadata.
    pub fn meta(&self) -> &DatasetMeta {
        &self.meta
    }

    /// All windows in dataset order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// All targets in dataset order.
    pub fn targets(&self) -> &[Vec<f64>] {
        &self.targets
    }

    /// Last observed time bin of each window, in dataset order.
    pub fn window_ends(&self) -> &[DateTime<Utc>] {
        &self.window_ends
    }

    /// Window at an index.
    pub fn window(&self, index: usize) -> Result<&Window> {
        self.windows.get(index).ok_or(GridcastError::IndexOutOfBounds {
            index,
            size: self.windows.len(),
        })
    }

    /// Target at an index.
    pub fn target(&self, index: usize) -> Result<&[f64]> {
        self.targets
            .get(index)
            .map(|t| t.as_slice())
            .ok_or(GridcastError::IndexOutOfBounds {
                index,
                size: self.targets.len(),
            })
    }

    /// The last window in the set, typically used as a rolling-forecast seed.
    pub fn last_window(&self) -> Option<&Window> {
        self.windows.last()
    }

    /// Split off the tail at `index`, leaving `[0, index)` in `self`.
    ///
    /// Both halves keep a copy of the metadata.
    pub fn split_off(&mut self, index: usize) -> Result<WindowSet> {
        if index > self.len() {
            return Err(GridcastError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(WindowSet {
            meta: self.meta.clone(),
            windows: self.windows.split_off(index),
            targets: self.targets.split_off(index),
            window_ends: self.window_ends.split_off(index),
        })
    }
}
