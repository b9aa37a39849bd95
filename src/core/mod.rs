//! Core data structures for windowed air-traffic datasets.

mod dataset;
mod record;

pub use dataset::{DatasetMeta, Window, WindowSet};
pub use record::{ObservationTable, Record};
