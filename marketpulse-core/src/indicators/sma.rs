//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window of any numeric series.
//! Lookback: period - 1 (first valid value at index period-1).

use super::window::RollingWindow;
use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, input: &[f64]) -> Vec<f64> {
        let mut window = RollingWindow::new(self.period);
        input.iter().map(|&v| window.push(v)).collect()
    }
}
