//! Rolling forecast: extending a predictor's native horizon.
//!
//! A trained predictor outputs `horizon` steps per call. To forecast further,
//! its predictions are fed back as the target feature of the next input
//! window while auxiliary features advance per a configurable policy. Each
//! run owns a private copy of the seed window; the caller's data is never
//! mutated.

use crate::core::{DatasetMeta, Window};
use crate::error::{GridcastError, Result};
use crate::forecast::SequencePredictor;
use crate::transform::StandardScaler;
use tracing::debug;

/// How auxiliary (non-target) features evolve under the rolling horizon.
pub enum AuxiliaryPolicy {
    /// Carry every auxiliary feature forward unchanged from the last
    /// observed row. Simple, but time-derived features (cyclical hour
    /// encodings) freeze instead of advancing.
    HoldLast,
    /// Advance auxiliary features explicitly. Called once per synthetic row
    /// with the 1-based future step index and the full feature row (target
    /// already written); the closure may rewrite any non-target entry.
    Advance(Box<dyn Fn(usize, &mut [f64]) + Send + Sync>),
}

impl std::fmt::Debug for AuxiliaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoldLast => f.write_str("HoldLast"),
            Self::Advance(_) => f.write_str("Advance(..)"),
        }
    }
}

/// Multi-step forecaster that rolls a trained predictor beyond its horizon.
pub struct RollingForecaster<'a, P: SequencePredictor + ?Sized> {
    predictor: &'a P,
    meta: DatasetMeta,
    scaler: StandardScaler,
    policy: AuxiliaryPolicy,
    target_index: usize,
}

impl<'a, P: SequencePredictor + ?Sized> RollingForecaster<'a, P> {
    /// Create a forecaster, asserting predictor/metadata shape compatibility
    /// before anything else can run.
    pub fn new(predictor: &'a P, meta: DatasetMeta, scaler: StandardScaler) -> Result<Self> {
        predictor.validate_meta(&meta)?;
        Ok(Self {
            predictor,
            meta,
            scaler,
            policy: AuxiliaryPolicy::HoldLast,
            target_index: 0,
        })
    }

    /// Replace the auxiliary feature policy (default: `HoldLast`).
    pub fn with_policy(mut self, policy: AuxiliaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the target feature's column index within a window row
    /// (default: 0, the conventional leading target column).
    pub fn with_target_index(mut self, index: usize) -> Result<Self> {
        if index >= self.meta.n_features {
            return Err(GridcastError::IndexOutOfBounds {
                index,
                size: self.meta.n_features,
            });
        }
        self.target_index = index;
        Ok(self)
    }

    /// Forecast `steps_ahead` target values in original (unscaled) units.
    ///
    /// Runs `ceil(steps_ahead / horizon)` predictor calls, feeding each
    /// prediction back into the sliding window, then truncates the surplus
    /// of the last call and inverse-transforms the target scaling.
    pub fn forecast(&self, seed: &Window, steps_ahead: usize) -> Result<Vec<f64>> {
        if steps_ahead == 0 {
            return Err(GridcastError::InvalidParameter(
                "steps_ahead must be positive".to_string(),
            ));
        }
        seed.check_shape(self.meta.lookback, self.meta.n_features)?;

        let horizon = self.predictor.horizon();
        let iterations = steps_ahead.div_ceil(horizon);

        // Private rolling state; discarded when the run completes.
        let mut rows: Vec<Vec<f64>> = seed.rows().to_vec();
        let mut predictions: Vec<f64> = Vec::with_capacity(iterations * horizon);
        let mut step = 0usize;

        for iteration in 0..iterations {
            let window = Window::new(rows.clone())?;
            let predicted = self.predictor.predict(&window)?;
            if predicted.len() != horizon {
                return Err(GridcastError::DimensionMismatch {
                    expected: horizon,
                    got: predicted.len(),
                });
            }

            debug!(iteration, produced = predicted.len(), "rolling iteration");

            for &value in &predicted {
                step += 1;
                let mut row = rows.last().expect("window is never empty").clone();
                row[self.target_index] = value;
                if let AuxiliaryPolicy::Advance(advance) = &self.policy {
                    advance(step, &mut row);
                }
                rows.remove(0);
                rows.push(row);
            }

            predictions.extend_from_slice(&predicted);
        }

        predictions.truncate(steps_ahead);
        Ok(self.scaler.inverse_transform(&predictions))
    }
}

impl<P: SequencePredictor + ?Sized> std::fmt::Debug for RollingForecaster<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollingForecaster")
            .field("meta", &self.meta)
            .field("policy", &self.policy)
            .field("target_index", &self.target_index)
            .finish()
    }
}
