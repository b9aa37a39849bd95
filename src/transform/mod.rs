//! Data transformations applied around windowing.
//!
//! # Example
//!
//! ```
//! use gridcast::transform::StandardScaler;
//!
//! let counts = vec![3.0, 5.0, 4.0, 8.0, 6.0];
//! let scaler = StandardScaler::fit(&counts).unwrap();
//! let scaled = scaler.transform(&counts);
//! let recovered = scaler.inverse_transform(&scaled);
//! assert!((recovered[3] - 8.0).abs() < 1e-9);
//! ```

mod scale;

pub use scale::StandardScaler;
