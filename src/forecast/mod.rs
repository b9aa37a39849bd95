//! Predictor boundary and rolling multi-step forecasting.

mod predictor;
mod rolling;

pub use predictor::{BoxedPredictor, SequencePredictor};
pub use rolling::{AuxiliaryPolicy, RollingForecaster};
