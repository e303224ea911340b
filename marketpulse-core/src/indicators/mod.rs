//! Indicator trait and concrete implementations.
//!
//! Indicators are pure functions: a numeric input series in, a numeric output
//! series of the same length out. Warmup positions and positions whose window
//! touches an undefined input are `f64::NAN`. The pipeline turns NaN into
//! "row dropped" at its boundary; nothing downstream ever sees a NaN.

pub mod rsi;
pub mod sma;
pub mod window;

pub use rsi::Rsi;
pub use sma::Sma;
pub use window::RollingWindow;

/// Trait for indicators.
///
/// # Look-ahead guard
/// No output value at index t may depend on input from index t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "rsi_14", "sma_3").
    fn name(&self) -> &str;

    /// Number of leading positions that are always NaN (warmup).
    fn lookback(&self) -> usize;

    /// Compute the indicator over the entire input.
    ///
    /// Returns a `Vec<f64>` of the same length as `input`.
    fn compute(&self, input: &[f64]) -> Vec<f64>;
}

/// Create a daily series from close prices for testing.
///
/// Dates are consecutive calendar days starting 2024-01-02.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::Series {
    use crate::domain::{PriceObservation, Series};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let observations = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceObservation::new(base_date + chrono::Duration::days(i as i64), close))
        .collect();
    Series::new("TEST", observations).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
