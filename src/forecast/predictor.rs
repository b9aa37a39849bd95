//! Sequence predictor boundary.
//!
//! The trained model itself is an external collaborator. This crate only
//! requires its shape contract: `n_features` input columns per step and a
//! fixed `horizon` of output steps per call. The weights and the shape are
//! coupled, so implementations must be checked against the persisted dataset
//! metadata before any prediction runs.

use crate::core::{DatasetMeta, Window};
use crate::error::{GridcastError, Result};

/// A trained model mapping a `(lookback, n_features)` window to a
/// `(horizon,)` vector of scaled target predictions. Stateless per call.
///
/// This trait is object-safe and can be used with `Box<dyn SequencePredictor>`.
pub trait SequencePredictor {
    /// Number of feature columns the model expects per time step.
    fn n_features(&self) -> usize;

    /// Native output length of a single call.
    fn horizon(&self) -> usize;

    /// Predict the next `horizon` scaled target values.
    ///
    /// Runtime failures inside the model are surfaced unchanged; this layer
    /// never retries.
    fn predict(&self, window: &Window) -> Result<Vec<f64>>;

    /// Assert shape compatibility with persisted dataset metadata.
    fn validate_meta(&self, meta: &DatasetMeta) -> Result<()> {
        if self.n_features() != meta.n_features {
            return Err(GridcastError::DimensionMismatch {
                expected: meta.n_features,
                got: self.n_features(),
            });
        }
        if self.horizon() != meta.horizon {
            return Err(GridcastError::DimensionMismatch {
                expected: meta.horizon,
                got: self.horizon(),
            });
        }
        Ok(())
    }
}

/// Type alias for boxed predictor trait objects.
pub type BoxedPredictor = Box<dyn SequencePredictor>;

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedShape {
        n_features: usize,
        horizon: usize,
    }

    impl SequencePredictor for FixedShape {
        fn n_features(&self) -> usize {
            self.n_features
        }

        fn horizon(&self) -> usize {
            self.horizon
        }

        fn predict(&self, _window: &Window) -> Result<Vec<f64>> {
            Ok(vec![0.0; self.horizon])
        }
    }

    fn meta(n_features: usize, horizon: usize) -> DatasetMeta {
        DatasetMeta {
            lookback: 6,
            horizon,
            n_features,
            feature_columns: (0..n_features).map(|i| format!("f{i}")).collect(),
            target_column: "f0".to_string(),
        }
    }

    #[test]
    fn compatible_shapes_validate() {
        let predictor = FixedShape {
            n_features: 5,
            horizon: 3,
        };
        assert!(predictor.validate_meta(&meta(5, 3)).is_ok());
    }

    #[test]
    fn feature_mismatch_is_rejected() {
        let predictor = FixedShape {
            n_features: 4,
            horizon: 3,
        };
        assert!(matches!(
            predictor.validate_meta(&meta(5, 3)),
            Err(GridcastError::DimensionMismatch { expected: 5, got: 4 })
        ));
    }

    #[test]
    fn horizon_mismatch_is_rejected() {
        let predictor = FixedShape {
            n_features: 5,
            horizon: 6,
        };
        assert!(matches!(
            predictor.validate_meta(&meta(5, 3)),
            Err(GridcastError::DimensionMismatch { expected: 3, got: 6 })
        ));
    }

    #[test]
    fn boxed_predictor_is_usable() {
        let predictor: BoxedPredictor = Box::new(FixedShape {
            n_features: 2,
            horizon: 1,
        });
        assert_eq!(predictor.horizon(), 1);
    }
}
