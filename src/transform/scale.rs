//! Standardization of the forecast target column.
//!
//! The scaler is fitted exactly once during dataset preparation and reused
//! read-only by every later stage: windowing consumes the scaled column,
//! and the rolling forecaster inverts predictions back to original units.

use crate::error::{GridcastError, Result};
use serde::{Deserialize, Serialize};

/// Fitted linear standardization `(x - mean) / std` and its exact inverse.
///
/// Uses the population standard deviation. A zero-variance fit falls back to
/// a scale of 1.0 so transform and inverse stay well-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    std: f64,
}

impl StandardScaler {
    /// Fit on a reference column.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(GridcastError::EmptyData);
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        Ok(Self {
            mean,
            std: if std < 1e-10 { 1.0 } else { std },
        })
    }

    /// Reconstruct a scaler from persisted parameters.
    pub fn from_parameters(mean: f64, std: f64) -> Result<Self> {
        if !mean.is_finite() || !std.is_finite() || std <= 0.0 {
            return Err(GridcastError::InvalidParameter(format!(
                "scaler parameters must be finite with std > 0, got mean={mean}, std={std}"
            )));
        }
        Ok(Self { mean, std })
    }

    /// Fitted mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Fitted standard deviation.
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Map a single value into scaled space.
    pub fn scale(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }

    /// Map a single scaled value back to original units.
    pub fn unscale(&self, x: f64) -> f64 {
        x * self.std + self.mean
    }

    /// Transform a slice into scaled space.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.scale(x)).collect()
    }

    /// Inverse-transform a slice back to original units.
    pub fn inverse_transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.unscale(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_computes_population_moments() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let scaler = StandardScaler::fit(&values).unwrap();

        assert_relative_eq!(scaler.mean(), 3.0, epsilon = 1e-10);
        // Population std of 1..5 is sqrt(2)
        assert_relative_eq!(scaler.std(), 2.0_f64.sqrt(), epsilon = 1e-10);

        let scaled = scaler.transform(&values);
        let mean: f64 = scaled.iter().sum::<f64>() / scaled.len() as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn fit_rejects_empty_input() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(GridcastError::EmptyData)
        ));
    }

    #[test]
    fn constant_series_falls_back_to_unit_scale() {
        let scaler = StandardScaler::fit(&[7.0; 12]).unwrap();
        assert_relative_eq!(scaler.mean(), 7.0, epsilon = 1e-10);
        assert_relative_eq!(scaler.std(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(scaler.scale(7.0), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn transform_round_trips() {
        let values = vec![0.0, 12.5, -4.0, 100.0, 3.3];
        let scaler = StandardScaler::fit(&values).unwrap();

        let recovered = scaler.inverse_transform(&scaler.transform(&values));
        for (orig, rec) in values.iter().zip(recovered.iter()) {
            assert_relative_eq!(orig, rec, epsilon = 1e-9);
        }
    }

    #[test]
    fn unscale_applies_mean_and_std() {
        let scaler = StandardScaler::from_parameters(10.0, 2.0).unwrap();
        let rescaled = scaler.inverse_transform(&[0.5, 1.0]);
        assert_relative_eq!(rescaled[0], 11.0, epsilon = 1e-10);
        assert_relative_eq!(rescaled[1], 12.0, epsilon = 1e-10);
    }

    #[test]
    fn from_parameters_validates() {
        assert!(StandardScaler::from_parameters(0.0, 0.0).is_err());
        assert!(StandardScaler::from_parameters(f64::NAN, 1.0).is_err());
        assert!(StandardScaler::from_parameters(10.0, 2.0).is_ok());
    }
}
