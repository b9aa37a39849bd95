//! JSON persistence for windowed datasets, metadata, scalers and forecasts.
//!
//! The physical layout is deliberately simple: self-describing JSON files.
//! Readers for columnar formats and remote storage live upstream of this
//! crate; everything here is plain local file I/O performed strictly before
//! or after the windowing and forecasting algorithms run.

use crate::core::{DatasetMeta, WindowSet};
use crate::error::{GridcastError, Result};
use crate::transform::StandardScaler;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| GridcastError::Serde(e.to_string()))?;
    fs::write(path, json).map_err(|e| GridcastError::Io(e.to_string()))?;
    info!(path = %path.display(), "wrote artifact");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|e| GridcastError::Io(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| GridcastError::Serde(e.to_string()))
}

/// Persist a windowed dataset (windows, targets, end bins, metadata).
pub fn save_window_set(path: impl AsRef<Path>, dataset: &WindowSet) -> Result<()> {
    write_json(path.as_ref(), dataset)
}

/// Load a windowed dataset.
pub fn load_window_set(path: impl AsRef<Path>) -> Result<WindowSet> {
    read_json(path.as_ref())
}

/// Persist dataset metadata on its own, for inference-time shape checks.
pub fn save_meta(path: impl AsRef<Path>, meta: &DatasetMeta) -> Result<()> {
    write_json(path.as_ref(), meta)
}

/// Load dataset metadata.
pub fn load_meta(path: impl AsRef<Path>) -> Result<DatasetMeta> {
    read_json(path.as_ref())
}

/// Persist a fitted scaler.
pub fn save_scaler(path: impl AsRef<Path>, scaler: &StandardScaler) -> Result<()> {
    write_json(path.as_ref(), scaler)
}

/// Load a fitted scaler.
pub fn load_scaler(path: impl AsRef<Path>) -> Result<StandardScaler> {
    read_json(path.as_ref())
}

/// Persist a forecast vector in original units.
pub fn save_forecast(path: impl AsRef<Path>, values: &[f64]) -> Result<()> {
    write_json(path.as_ref(), &values)
}

/// Load a forecast vector.
pub fn load_forecast(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    read_json(path.as_ref())
}
