//! Quickstart: window a small telemetry table, split it, and roll a
//! forecast past the predictor's native horizon.
//!
//! Run with: cargo run --example quickstart

use chrono::{Duration, TimeZone, Utc};
use gridcast::prelude::*;

/// Stand-in for a trained network: repeats the last scaled target value.
struct LastValuePredictor {
    n_features: usize,
    horizon: usize,
}

impl SequencePredictor for LastValuePredictor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn horizon(&self) -> usize {
        self.horizon
    }

    fn predict(&self, window: &Window) -> gridcast::Result<Vec<f64>> {
        Ok(vec![window.last_row()[0]; self.horizon])
    }
}

fn main() -> gridcast::Result<()> {
    // Build a toy table: one grid cell, minute bins, a daily-ish cycle
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut table = ObservationTable::new(vec![
        "congestion_count".to_string(),
        "hour_sin".to_string(),
    ]);
    for i in 0..48 {
        let bin = base + Duration::minutes(i);
        let count = 10.0 + 5.0 * (i as f64 / 8.0).sin();
        table.push_row("12_-77", bin, vec![count, (i as f64 / 24.0).sin()])?;
    }

    // Prepare: fit scaler, window, split
    let window = WindowConfig::new(
        6,
        3,
        vec!["congestion_count".to_string(), "hour_sin".to_string()],
        "congestion_count",
    );
    let config = PipelineConfig::new(window, 0.2);
    let mut logger = MemoryRunLogger::new();
    let prepared = prepare_dataset(&table, &config, &mut logger)?;

    println!("run {}", logger.run_id());
    println!(
        "windows: {} train / {} validation ({} cells skipped)",
        prepared.train.len(),
        prepared.validation.len(),
        prepared.report.cells_skipped
    );

    // Roll a 10-step forecast from the last validation window
    let meta = prepared.validation.meta().clone();
    let seed = prepared.validation.last_window().unwrap().clone();
    let predictor = LastValuePredictor {
        n_features: meta.n_features,
        horizon: meta.horizon,
    };
    let forecaster = RollingForecaster::new(&predictor, meta, prepared.scaler)?;
    let forecast = forecaster.forecast(&seed, 10)?;

    println!("10-step forecast (original units): {forecast:?}");
    Ok(())
}
