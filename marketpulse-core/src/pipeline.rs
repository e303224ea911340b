//! Sentiment pipeline: closes → momentum index → sentiment score.
//!
//! Windows are fixed. The momentum index is a 14-period RSI over simple
//! averages of gains and losses; the sentiment score is its 3-period trailing
//! average. Rows where either value is still warming up are dropped, so the
//! output is a suffix of the input when every close is finite.

use crate::domain::{AugmentedObservation, Series};
use crate::indicators::{Indicator, Rsi, Sma};

/// Window of the momentum index (RSI), in periods.
pub const MOMENTUM_PERIOD: usize = 14;

/// Window of the sentiment smoothing pass, in periods.
pub const SENTIMENT_WINDOW: usize = 3;

/// Leading rows consumed before the first output row.
pub const WARMUP: usize = MOMENTUM_PERIOD + SENTIMENT_WINDOW - 1;

/// Smallest input length that produces at least one output row.
pub const MIN_OBSERVATIONS: usize = WARMUP + 1;

/// Compute the augmented series.
///
/// Pure function of its input. An empty or short series yields an empty
/// output, never an error.
pub fn compute(series: &Series) -> Vec<AugmentedObservation> {
    let closes = series.closes();
    let momentum = Rsi::new(MOMENTUM_PERIOD).compute(&closes);
    let sentiment = Sma::new(SENTIMENT_WINDOW).compute(&momentum);

    let rows: Vec<AugmentedObservation> = series
        .observations()
        .iter()
        .zip(momentum.iter().zip(sentiment.iter()))
        .filter(|(obs, (m, s))| !obs.is_void() && !m.is_nan() && !s.is_nan())
        .map(|(obs, (&momentum_index, &sentiment_score))| AugmentedObservation {
            timestamp: obs.timestamp,
            close: obs.close,
            momentum_index,
            sentiment_score,
        })
        .collect();

    tracing::debug!(
        symbol = series.symbol(),
        input = series.len(),
        output = rows.len(),
        "sentiment pipeline computed"
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn warmup_constants() {
        assert_eq!(WARMUP, 16);
        assert_eq!(MIN_OBSERVATIONS, 17);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(compute(&Series::empty("NONE")).is_empty());
    }

    #[test]
    fn short_input_empty_output() {
        for n in 1..MIN_OBSERVATIONS {
            let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
            assert!(compute(&make_series(&closes)).is_empty(), "n={n}");
        }
    }

    #[test]
    fn first_row_at_minimum_length() {
        let closes: Vec<f64> = (0..MIN_OBSERVATIONS).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);
        let out = compute(&series);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp, series.observations()[WARMUP].timestamp);
    }

    #[test]
    fn rising_series_is_all_greed() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = compute(&make_series(&closes));
        assert_eq!(out.len(), 4);
        for row in &out {
            assert_eq!(row.momentum_index, 100.0);
            assert_eq!(row.sentiment_score, 100.0);
        }
        assert_eq!(out[0].close, 116.0);
        assert_eq!(out[3].close, 119.0);
    }

    #[test]
    fn flat_series_is_neutral() {
        let out = compute(&make_series(&[50.0; 20]));
        assert_eq!(out.len(), 4);
        for row in &out {
            assert_eq!(row.momentum_index, 50.0);
            assert_eq!(row.sentiment_score, 50.0);
            assert_eq!(row.close, 50.0);
        }
    }

    #[test]
    fn falling_series_is_all_fear() {
        let closes: Vec<f64> = (0..18).map(|i| 200.0 - 2.0 * i as f64).collect();
        let out = compute(&make_series(&closes));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.momentum_index == 0.0 && r.sentiment_score == 0.0));
    }

    #[test]
    fn sentiment_averages_last_three_momentum_values() {
        // Alternate up and down moves of growing size so momentum varies per row.
        let mut closes = vec![100.0];
        for i in 1..30 {
            let step = i as f64 * 0.5;
            let prev = closes[i - 1];
            closes.push(if i % 3 == 0 { prev - step } else { prev + step * 0.7 });
        }
        let series = make_series(&closes);
        let out = compute(&series);
        let momentum = Rsi::new(MOMENTUM_PERIOD).compute(&series.closes());

        assert_eq!(out.len(), closes.len() - WARMUP);
        for (k, row) in out.iter().enumerate() {
            let i = WARMUP + k;
            assert_approx(row.momentum_index, momentum[i], DEFAULT_EPSILON);
            let expected = (momentum[i - 2] + momentum[i - 1] + momentum[i]) / 3.0;
            assert_approx(row.sentiment_score, expected, 1e-9);
        }
    }

    #[test]
    fn void_close_drops_its_neighbourhood() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 5) as f64).collect();
        closes[25] = f64::NAN;
        let series = make_series(&closes);
        let out = compute(&series);
        let dates: Vec<_> = out.iter().map(|r| r.timestamp).collect();
        let obs = series.observations();
        // Changes 25 and 26 are undefined; momentum recovers at 26 + 14 = 40 (past the end).
        assert!(dates.contains(&obs[24].timestamp));
        assert!(!dates.contains(&obs[25].timestamp));
        assert!(!dates.contains(&obs[39].timestamp));
        assert!(out.iter().all(|r| r.close.is_finite()));
    }

    #[test]
    fn infinite_close_never_reaches_output() {
        let mut closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 4) as f64).collect();
        closes[20] = f64::INFINITY;
        let series = make_series(&closes);
        let out = compute(&series);
        let obs = series.observations();
        assert!(out.iter().all(|r| r.close.is_finite()));
        // Rows before the spike survive; windows touching changes 20 and 21 do not.
        assert_eq!(out.len(), 20 - WARMUP);
        assert_eq!(out.last().map(|r| r.timestamp), Some(obs[19].timestamp));
        for row in &out {
            assert!((0.0..=100.0).contains(&row.momentum_index));
            assert!((0.0..=100.0).contains(&row.sentiment_score));
        }
    }

    #[test]
    fn output_preserves_order_and_closes() {
        let closes: Vec<f64> = (0..25).map(|i| 10.0 + ((i * 7) % 11) as f64).collect();
        let series = make_series(&closes);
        let out = compute(&series);
        let suffix = &series.observations()[WARMUP..];
        assert_eq!(out.len(), suffix.len());
        for (row, obs) in out.iter().zip(suffix) {
            assert_eq!(row.observation(), *obs);
        }
    }
}
