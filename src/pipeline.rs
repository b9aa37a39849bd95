//! End-to-end dataset preparation: scale, window, split.
//!
//! Mirrors the offline preparation flow: fit the target scaler once on the
//! raw table, rewrite the target column into scaled space, build windows per
//! cell, then cut train/validation chronologically. The scaler returned here
//! is the exact state later used to rescale rolling forecasts; it is never
//! refit downstream.

use crate::core::ObservationTable;
use crate::error::{GridcastError, Result};
use crate::tracking::RunLogger;
use crate::transform::StandardScaler;
use crate::window::{split_windows, BuildReport, SplitStrategy, WindowBuilder, WindowConfig};
use crate::WindowSet;
use tracing::info;

/// Full configuration for dataset preparation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Windowing parameters.
    pub window: WindowConfig,
    /// Validation share of the window set, strictly inside (0, 1).
    pub test_fraction: f64,
    /// How the train/validation boundary is drawn.
    pub strategy: SplitStrategy,
}

impl PipelineConfig {
    pub fn new(window: WindowConfig, test_fraction: f64) -> Self {
        Self {
            window,
            test_fraction,
            strategy: SplitStrategy::Positional,
        }
    }

    pub fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate every parameter before any data is touched.
    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(GridcastError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

/// Output of dataset preparation.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Training partition, windows in scaled target space.
    pub train: WindowSet,
    /// Validation partition.
    pub validation: WindowSet,
    /// Scaler fitted on the raw target column; reuse for forecast rescaling.
    pub scaler: StandardScaler,
    /// Windowing diagnostics.
    pub report: BuildReport,
}

/// Prepare a windowed dataset from an observation table.
///
/// The configuration and summary metrics are recorded through the injected
/// run logger.
pub fn prepare_dataset(
    table: &ObservationTable,
    config: &PipelineConfig,
    logger: &mut dyn RunLogger,
) -> Result<PreparedDataset> {
    config.validate()?;

    logger.log_param("lookback", &config.window.lookback.to_string());
    logger.log_param("horizon", &config.window.horizon.to_string());
    logger.log_param("feature_columns", &config.window.feature_columns.join(","));
    logger.log_param("target_column", &config.window.target_column);
    logger.log_param("test_fraction", &config.test_fraction.to_string());
    logger.log_param("split_strategy", &format!("{:?}", config.strategy));

    // Fit once on the raw target column, then move that column into scaled
    // space for windowing. Other columns are assumed already scaled upstream.
    let target_values = table.column_values(&config.window.target_column)?;
    let scaler = StandardScaler::fit(&target_values)?;
    let scaled_table = table.map_column(&config.window.target_column, |x| scaler.scale(x))?;

    let builder = WindowBuilder::new(config.window.clone())?;
    let (dataset, report) = builder.build(&scaled_table)?;
    let (train, validation) = split_windows(dataset, config.test_fraction, config.strategy)?;

    logger.log_metric("scaler_mean", scaler.mean());
    logger.log_metric("scaler_std", scaler.std());
    logger.log_metric("cells_total", report.cells_total as f64);
    logger.log_metric("cells_skipped", report.cells_skipped as f64);
    logger.log_metric("rows_dropped", report.rows_dropped as f64);
    logger.log_metric("n_train", train.len() as f64);
    logger.log_metric("n_validation", validation.len() as f64);

    info!(
        run_id = logger.run_id(),
        n_train = train.len(),
        n_validation = validation.len(),
        cells_skipped = report.cells_skipped,
        "prepared dataset"
    );

    Ok(PreparedDataset {
        train,
        validation,
        scaler,
        report,
    })
}
