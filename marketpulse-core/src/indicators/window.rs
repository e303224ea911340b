//! Fixed-size sliding window accumulator for trailing simple averages.

use std::collections::VecDeque;

/// Holds the last `period` values pushed and reports their mean.
///
/// The mean is summed directly over the window on every push, so an all-zero
/// window averages to exactly 0.0 and the mean of values in [a, b] stays in
/// [a, b]. No float residue carries over from values that left the window.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "window period must be >= 1");
        Self {
            period,
            values: VecDeque::with_capacity(period),
        }
    }

    /// True once `period` values have been pushed.
    pub fn is_full(&self) -> bool {
        self.values.len() == self.period
    }

    /// Push a value and return the trailing mean.
    ///
    /// Returns NaN while the window is filling or when any value in the window
    /// is NaN.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.values.len() == self.period {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.mean()
    }

    /// Trailing mean of the current window, NaN until full.
    pub fn mean(&self) -> f64 {
        if !self.is_full() {
            return f64::NAN;
        }
        // NaN anywhere in the window propagates through the sum.
        self.values.iter().sum::<f64>() / self.period as f64
    }
}
