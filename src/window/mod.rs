//! Window construction and chronological dataset splitting.

mod builder;
mod split;

pub use builder::{BuildReport, WindowBuilder, WindowConfig};
pub use split::{split_windows, SplitStrategy};
