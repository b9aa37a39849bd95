//! # gridcast
//!
//! Windowing and rolling-forecast core for gridded, time-binned air-traffic
//! congestion telemetry.
//!
//! Turns per-cell time series into fixed-shape `(lookback, n_features)`
//! training windows with `(horizon,)` targets, splits them chronologically,
//! and extends a trained sequence predictor beyond its native horizon by
//! feeding its own predictions back as future inputs. The predictor itself,
//! feature engineering, and storage plumbing are external collaborators
//! consumed only at their boundaries.

pub mod artifacts;
pub mod core;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod tracking;
pub mod transform;
pub mod window;

pub use crate::core::{DatasetMeta, ObservationTable, Record, Window, WindowSet};
pub use crate::error::{GridcastError, Result};

pub mod prelude {
    pub use crate::core::{DatasetMeta, ObservationTable, Record, Window, WindowSet};
    pub use crate::error::{GridcastError, Result};
    pub use crate::forecast::{AuxiliaryPolicy, RollingForecaster, SequencePredictor};
    pub use crate::pipeline::{prepare_dataset, PipelineConfig, PreparedDataset};
    pub use crate::tracking::{MemoryRunLogger, NoopRunLogger, RunLogger};
    pub use crate::transform::StandardScaler;
    pub use crate::window::{
        split_windows, BuildReport, SplitStrategy, WindowBuilder, WindowConfig,
    };
}
