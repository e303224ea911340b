//! Relative Strength Index (RSI), the momentum index.
//!
//! Uses trailing simple averages of gains and losses (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (one close is consumed by differencing).
//! Edge cases: avg_loss == 0 and avg_gain == 0 → 50; avg_loss == 0 → 100;
//! avg_gain == 0 → 0.

use super::window::RollingWindow;
use super::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![f64::NAN; n];

        let mut gains = RollingWindow::new(self.period);
        let mut losses = RollingWindow::new(self.period);

        for i in 1..n {
            let change = closes[i] - closes[i - 1];
            // f64::max swallows NaN, so undefined changes are carried explicitly.
            // A change touching an infinite close is undefined too.
            let (gain, loss) = if !change.is_finite() {
                (f64::NAN, f64::NAN)
            } else {
                (change.max(0.0), (-change).max(0.0))
            };

            let avg_gain = gains.push(gain);
            let avg_loss = losses.push(loss);
            result[i] = momentum_index(avg_gain, avg_loss);
        }

        result
    }
}

/// Momentum index from average gain and average loss.
///
/// NaN when either average is undefined.
pub fn momentum_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        f64::NAN
    } else if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        // All positive changes → RSI = 100
        assert_approx(result[3], 100.0, 1e-6);
        assert_approx(result[5], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        // All negative changes → RSI = 0
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_is_neutral() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[50.0; 6]);
        for &v in &result[3..] {
            assert_eq!(v, 50.0);
        }
    }

    #[test]
    fn rsi_mixed_simple_average() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // RSI[3]: gains = 0.34, losses = 0.73 → 100 - 100/(1 + 0.34/0.73)
        // RSI[4]: window slides past +0.34: gains = 0.72, losses = 0.73
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[44.0, 44.34, 44.09, 43.61, 44.33]);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at index {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_nan_propagation() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[100.0, 101.0, f64::NAN, 103.0, 104.0, 105.0, 106.0, 107.0]);
        // Changes at 2 and 3 are undefined; windows touching them are NaN.
        for (i, v) in result.iter().enumerate().take(6) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        // Index 6 window = changes 4..=6, all defined.
        assert_approx(result[6], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_infinite_close_is_undefined() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[100.0, 101.0, f64::INFINITY, 103.0, 104.0, 105.0, 106.0, 107.0]);
        for (i, v) in result.iter().enumerate().take(6) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        assert_approx(result[6], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_too_few_closes() {
        let rsi = Rsi::new(14);
        assert!(rsi.compute(&[1.0; 14]).iter().all(|v| v.is_nan()));
        assert!(rsi.compute(&[]).is_empty());
    }

    #[test]
    fn momentum_index_edge_cases() {
        assert_eq!(momentum_index(0.0, 0.0), 50.0);
        assert_eq!(momentum_index(1.5, 0.0), 100.0);
        assert_eq!(momentum_index(0.0, 2.0), 0.0);
        assert_approx(momentum_index(1.0, 1.0), 50.0, DEFAULT_EPSILON);
        assert!(momentum_index(f64::NAN, 0.0).is_nan());
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 14);
        assert_eq!(Rsi::new(14).name(), "rsi_14");
    }
}
