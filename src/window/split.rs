//! Chronological train/validation splitting of a windowed dataset.
//!
//! The dataset order is per-cell chronological but carries no ordering
//! guarantee across cells, so a positional cut can let a training window in
//! one cell chronologically follow a validation window in another. That is
//! the historical behavior; the strategy is an explicit choice so callers
//! who need a leak-free boundary across cells can cut on global time.

use crate::core::WindowSet;
use crate::error::{GridcastError, Result};
use tracing::debug;

/// How the train/validation boundary is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Cut the concatenated sequence at position `floor(N * (1 - f))`.
    /// Exact sizes, no cross-cell time alignment.
    #[default]
    Positional,
    /// Cut on window end timestamps across all cells. Windows ending before
    /// the threshold train; ties go to validation, so sizes can deviate from
    /// the exact floor when end bins repeat across cells.
    GlobalTime,
}

/// Split a dataset into `(train, validation)` partitions.
///
/// `test_fraction` is the validation share and must lie strictly inside
/// `(0, 1)`. No shuffling is performed; an empty partition is valid output.
pub fn split_windows(
    mut dataset: WindowSet,
    test_fraction: f64,
    strategy: SplitStrategy,
) -> Result<(WindowSet, WindowSet)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(GridcastError::InvalidParameter(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = dataset.len();
    let cut = ((n as f64) * (1.0 - test_fraction)).floor() as usize;

    let validation = match strategy {
        SplitStrategy::Positional => dataset.split_off(cut)?,
        SplitStrategy::GlobalTime => {
            if n == 0 {
                dataset.split_off(0)?
            } else {
                let mut ends = dataset.window_ends().to_vec();
                ends.sort_unstable();
                let threshold = ends[cut.min(n - 1)];

                // Stable partition preserving dataset order in both halves.
                let meta = dataset.meta().clone();
                let mut train = WindowSet::new(meta.clone());
                let mut validation = WindowSet::new(meta);
                let tail = dataset.split_off(0)?;
                for i in 0..tail.len() {
                    let window = tail.window(i)?.clone();
                    let target = tail.target(i)?.to_vec();
                    let end = tail.window_ends()[i];
                    if end < threshold {
                        train.push(window, target, end)?;
                    } else {
                        validation.push(window, target, end)?;
                    }
                }
                dataset = train;
                validation
            }
        }
    };

    debug!(
        train = dataset.len(),
        validation = validation.len(),
        ?strategy,
        "split windows"
    );
    Ok((dataset, validation))
}
