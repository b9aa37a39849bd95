//! Fixed-length window construction from grouped, time-binned telemetry.
//!
//! Each grid cell's series is windowed independently, so no window ever
//! mixes rows from two cells and no target ever reaches back into another
//! group's history.

use crate::core::{DatasetMeta, ObservationTable, Record, Window, WindowSet};
use crate::error::{GridcastError, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

/// Configuration for window construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Number of past time steps per window.
    pub lookback: usize,
    /// Number of future target steps per window.
    pub horizon: usize,
    /// Ordered feature column names. The target column may appear here too;
    /// windows are restricted to exactly these columns.
    pub feature_columns: Vec<String>,
    /// Name of the forecast target column.
    pub target_column: String,
}

impl WindowConfig {
    pub fn new(
        lookback: usize,
        horizon: usize,
        feature_columns: Vec<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            lookback,
            horizon,
            feature_columns,
            target_column: target_column.into(),
        }
    }

    /// Validate the configuration before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if self.lookback == 0 {
            return Err(GridcastError::InvalidParameter(
                "lookback must be positive".to_string(),
            ));
        }
        if self.horizon == 0 {
            return Err(GridcastError::InvalidParameter(
                "horizon must be positive".to_string(),
            ));
        }
        if self.feature_columns.is_empty() {
            return Err(GridcastError::InvalidParameter(
                "feature_columns must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregate diagnostics from one build run.
///
/// Cells without enough history are excluded silently; the counts here are
/// the only trace they leave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Distinct cells seen in the input.
    pub cells_total: usize,
    /// Cells that produced at least one window.
    pub cells_used: usize,
    /// Cells skipped for insufficient history.
    pub cells_skipped: usize,
    /// Rows dropped for missing values in a required column.
    pub rows_dropped: usize,
}

/// Builds fixed-length (window, target) pairs from an observation table.
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    config: WindowConfig,
}

/// Windowed output of one cell, kept in build order until concatenation.
struct CellWindows {
    samples: Vec<(Window, Vec<f64>, DateTime<Utc>)>,
    rows_dropped: usize,
}

impl WindowBuilder {
    /// Create a builder, validating the configuration up front.
    pub fn new(config: WindowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Build all valid (window, target) pairs from the table.
    ///
    /// Schema errors abort the whole run before any cell is processed. Cells
    /// are windowed in parallel; the concatenation order is deterministic:
    /// first-appearance cell order, chronological within each cell.
    pub fn build(&self, table: &ObservationTable) -> Result<(WindowSet, BuildReport)> {
        // Resolve column indices once; a missing column is fatal for the run.
        let feature_indices: Vec<usize> = self
            .config
            .feature_columns
            .iter()
            .map(|name| table.require_column(name))
            .collect::<Result<_>>()?;
        let target_index = table.require_column(&self.config.target_column)?;

        let meta = DatasetMeta {
            lookback: self.config.lookback,
            horizon: self.config.horizon,
            n_features: feature_indices.len(),
            feature_columns: self.config.feature_columns.clone(),
            target_column: self.config.target_column.clone(),
        };

        let partitions = table.partition_by_cell();
        let cells_total = partitions.len();

        let per_cell: Vec<CellWindows> = partitions
            .into_par_iter()
            .map(|(cell, rows)| {
                let out = self.window_cell(rows, &feature_indices, target_index);
                debug!(
                    cell = cell.as_str(),
                    windows = out.samples.len(),
                    rows_dropped = out.rows_dropped,
                    "windowed cell"
                );
                out
            })
            .collect();

        let mut dataset = WindowSet::new(meta);
        let mut report = BuildReport {
            cells_total,
            ..BuildReport::default()
        };

        for cell in per_cell {
            report.rows_dropped += cell.rows_dropped;
            if cell.samples.is_empty() {
                report.cells_skipped += 1;
                continue;
            }
            report.cells_used += 1;
            for (window, target, end) in cell.samples {
                dataset.push(window, target, end)?;
            }
        }

        debug!(
            windows = dataset.len(),
            cells_used = report.cells_used,
            cells_skipped = report.cells_skipped,
            "window build complete"
        );
        Ok((dataset, report))
    }

    /// Window a single cell's rows. Sorts by time bin, drops rows with
    /// missing values, then slides the (lookback, horizon) frame.
    fn window_cell(
        &self,
        mut rows: Vec<&Record>,
        feature_indices: &[usize],
        target_index: usize,
    ) -> CellWindows {
        rows.sort_by_key(|r| r.time_bin);

        let before = rows.len();
        rows.retain(|r| {
            feature_indices
                .iter()
                .chain(std::iter::once(&target_index))
                .all(|&idx| r.values()[idx].is_finite())
        });
        let rows_dropped = before - rows.len();

        let lookback = self.config.lookback;
        let horizon = self.config.horizon;

        if rows.len() < lookback + horizon {
            return CellWindows {
                samples: Vec::new(),
                rows_dropped,
            };
        }

        let n_windows = rows.len() - lookback - horizon + 1;
        let mut samples = Vec::with_capacity(n_windows);

        for start in 0..n_windows {
            let window_rows: Vec<Vec<f64>> = rows[start..start + lookback]
                .iter()
                .map(|r| feature_indices.iter().map(|&idx| r.values()[idx]).collect())
                .collect();
            let target: Vec<f64> = rows[start + lookback..start + lookback + horizon]
                .iter()
                .map(|r| r.values()[target_index])
                .collect();
            let end = rows[start + lookback - 1].time_bin;

            // Rectangularity holds by construction.
            let window = Window::new(window_rows).expect("window rows are rectangular");
            samples.push((window, target, end));
        }

        CellWindows {
            samples,
            rows_dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bin(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()
    }

    fn config(lookback: usize, horizon: usize) -> WindowConfig {
        WindowConfig::new(
            lookback,
            horizon,
            vec!["congestion_count".to_string(), "hour_sin".to_string()],
            "congestion_count",
        )
    }

    /// One cell, target values 1..=n at hourly bins.
    fn single_cell_table(n: usize) -> ObservationTable {
        let mut table = ObservationTable::new(vec![
            "congestion_count".to_string(),
            "hour_sin".to_string(),
        ]);
        for i in 0..n {
            table
                .push_row("A", bin(i as u32), vec![(i + 1) as f64, 0.5])
                .unwrap();
        }
        table
    }

    #[test]
    fn five_rows_lookback_two_horizon_one_yields_three_windows() {
        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, report) = builder.build(&single_cell_table(5)).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.target(0).unwrap(), &[3.0]);
        assert_eq!(dataset.target(1).unwrap(), &[4.0]);
        assert_eq!(dataset.target(2).unwrap(), &[5.0]);

        // First window covers rows t=0,1 with both feature columns
        let first = dataset.window(0).unwrap();
        assert_eq!(first.rows(), &[vec![1.0, 0.5], vec![2.0, 0.5]]);
        assert_eq!(dataset.window_ends()[0], bin(1));

        assert_eq!(report.cells_total, 1);
        assert_eq!(report.cells_used, 1);
        assert_eq!(report.cells_skipped, 0);
    }

    #[test]
    fn window_count_formula_holds() {
        for (len, lookback, horizon) in [(10, 3, 2), (7, 6, 1), (20, 4, 4)] {
            let builder = WindowBuilder::new(config(lookback, horizon)).unwrap();
            let (dataset, _) = builder.build(&single_cell_table(len)).unwrap();
            assert_eq!(dataset.len(), len - lookback - horizon + 1);
        }
    }

    #[test]
    fn exact_length_cell_yields_one_window() {
        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, _) = builder.build(&single_cell_table(3)).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn short_cells_are_skipped_and_counted() {
        let mut table = single_cell_table(5);
        // Cell B has only 2 rows, below lookback + horizon = 3
        table.push_row("B", bin(0), vec![9.0, 0.1]).unwrap();
        table.push_row("B", bin(1), vec![8.0, 0.1]).unwrap();

        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, report) = builder.build(&table).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(report.cells_total, 2);
        assert_eq!(report.cells_used, 1);
        assert_eq!(report.cells_skipped, 1);
    }

    #[test]
    fn windows_never_cross_cells() {
        let mut table = single_cell_table(4);
        for i in 0..4 {
            table
                .push_row("B", bin(i as u32), vec![(100 + i) as f64, 0.2])
                .unwrap();
        }

        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, _) = builder.build(&table).unwrap();

        // Each cell has 4 rows → 2 windows each
        assert_eq!(dataset.len(), 4);
        // Every window and its target come from exactly one cell's range
        for (window, target) in dataset.windows().iter().zip(dataset.targets()) {
            let in_b = window.rows()[0][0] >= 100.0;
            assert!(window.rows().iter().all(|r| (r[0] >= 100.0) == in_b));
            assert!((target[0] >= 100.0) == in_b);
        }
    }

    #[test]
    fn rows_out_of_order_are_sorted_before_windowing() {
        let mut table = ObservationTable::new(vec![
            "congestion_count".to_string(),
            "hour_sin".to_string(),
        ]);
        for h in [2u32, 0, 4, 1, 3] {
            table
                .push_row("A", bin(h), vec![(h + 1) as f64, 0.5])
                .unwrap();
        }

        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, _) = builder.build(&table).unwrap();
        assert_eq!(dataset.target(0).unwrap(), &[3.0]);
        assert_eq!(dataset.target(2).unwrap(), &[5.0]);
    }

    #[test]
    fn missing_values_drop_rows_and_are_counted() {
        let mut table = single_cell_table(5);
        table.push_row("A", bin(5), vec![f64::NAN, 0.5]).unwrap();
        table.push_row("A", bin(6), vec![7.0, 0.5]).unwrap();

        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, report) = builder.build(&table).unwrap();

        assert_eq!(report.rows_dropped, 1);
        // 6 surviving rows → 4 windows; the NaN row simply vanishes
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.target(3).unwrap(), &[7.0]);
    }

    #[test]
    fn empty_table_yields_empty_dataset() {
        let table = ObservationTable::new(vec![
            "congestion_count".to_string(),
            "hour_sin".to_string(),
        ]);
        let builder = WindowBuilder::new(config(2, 1)).unwrap();
        let (dataset, report) = builder.build(&table).unwrap();

        assert!(dataset.is_empty());
        assert_eq!(report.cells_total, 0);
    }

    #[test]
    fn missing_feature_column_is_fatal() {
        let table = single_cell_table(5);
        let cfg = WindowConfig::new(
            2,
            1,
            vec!["congestion_count".to_string(), "mean_velocity".to_string()],
            "congestion_count",
        );
        let builder = WindowBuilder::new(cfg).unwrap();
        assert!(matches!(
            builder.build(&table),
            Err(GridcastError::MissingColumn(name)) if name == "mean_velocity"
        ));
    }

    #[test]
    fn missing_target_column_is_fatal() {
        let table = single_cell_table(5);
        let cfg = WindowConfig::new(
            2,
            1,
            vec!["congestion_count".to_string()],
            "n_callsigns",
        );
        let builder = WindowBuilder::new(cfg).unwrap();
        assert!(matches!(
            builder.build(&table),
            Err(GridcastError::MissingColumn(name)) if name == "n_callsigns"
        ));
    }

    #[test]
    fn invalid_config_rejected_before_data() {
        assert!(WindowBuilder::new(config(0, 1)).is_err());
        assert!(WindowBuilder::new(config(2, 0)).is_err());
        let cfg = WindowConfig::new(2, 1, vec![], "congestion_count");
        assert!(WindowBuilder::new(cfg).is_err());
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let mut table = single_cell_table(12);
        for i in 0..9 {
            table
                .push_row("B", bin(i as u32), vec![(50 + i) as f64, 0.3])
                .unwrap();
        }

        let builder = WindowBuilder::new(config(3, 2)).unwrap();
        let (first, _) = builder.build(&table).unwrap();
        let (second, _) = builder.build(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn target_column_need_not_be_a_feature() {
        let mut table = ObservationTable::new(vec![
            "mean_velocity".to_string(),
            "congestion_count".to_string(),
        ]);
        for i in 0..4 {
            table
                .push_row("A", bin(i as u32), vec![200.0 + i as f64, (i + 1) as f64])
                .unwrap();
        }

        let cfg = WindowConfig::new(2, 1, vec!["mean_velocity".to_string()], "congestion_count");
        let builder = WindowBuilder::new(cfg).unwrap();
        let (dataset, _) = builder.build(&table).unwrap();

        assert_eq!(dataset.meta().n_features, 1);
        assert_eq!(dataset.window(0).unwrap().rows(), &[vec![200.0], vec![201.0]]);
        assert_eq!(dataset.target(0).unwrap(), &[3.0]);
    }
}
