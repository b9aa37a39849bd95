//! Error types for the gridcast library.

use thiserror::Error;

/// Result type alias for gridcast operations.
pub type Result<T> = std::result::Result<T, GridcastError>;

/// Errors that can occur during dataset construction and forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridcastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// A required column is absent from the input table.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A matrix does not match the expected (rows, columns) shape.
    #[error("shape mismatch: expected ({expected_rows}, {expected_cols}), got ({rows}, {cols})")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// The sequence predictor reported a failure of its own.
    #[error("predictor error: {0}")]
    PredictorError(String),

    /// Filesystem error while reading or writing an artifact.
    #[error("io error: {0}")]
    Io(String),

    /// Artifact serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serde(String),
}
