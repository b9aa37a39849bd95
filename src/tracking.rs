//! Run tracking: configuration and metrics keyed by a run identifier.
//!
//! Experiment registries (MLflow and friends) live outside this crate. The
//! pipeline only needs somewhere to record what it did, so the logger is an
//! injected trait object rather than ambient global state.

use std::collections::BTreeMap;
use uuid::Uuid;

/// Sink for run parameters and metrics.
pub trait RunLogger {
    /// Identifier of the current run.
    fn run_id(&self) -> &str;

    /// Record a configuration parameter.
    fn log_param(&mut self, key: &str, value: &str);

    /// Record a numeric metric.
    fn log_metric(&mut self, key: &str, value: f64);
}

/// In-memory logger, useful for tests and for callers that forward the run
/// record to an external registry afterwards.
#[derive(Debug, Clone)]
pub struct MemoryRunLogger {
    run_id: String,
    params: BTreeMap<String, String>,
    metrics: BTreeMap<String, f64>,
}

impl MemoryRunLogger {
    /// Create a logger with a fresh v4 uuid run id.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
        }
    }

    /// Recorded parameters.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Recorded metrics (last value per key).
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
}

impl Default for MemoryRunLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLogger for MemoryRunLogger {
    fn run_id(&self) -> &str {
        &self.run_id
    }

    fn log_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    fn log_metric(&mut self, key: &str, value: f64) {
        self.metrics.insert(key.to_string(), value);
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Default)]
pub struct NoopRunLogger {
    run_id: String,
}

impl NoopRunLogger {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
        }
    }
}

impl RunLogger for NoopRunLogger {
    fn run_id(&self) -> &str {
        &self.run_id
    }

    fn log_param(&mut self, _key: &str, _value: &str) {}

    fn log_metric(&mut self, _key: &str, _value: f64) {}
}
