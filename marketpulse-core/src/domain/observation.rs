//! Observation types: the per-period market data unit and its augmented form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily close for a single symbol on a single trading day.
///
/// Closes are auto-adjusted by the provider when it can (splits, dividends).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: NaiveDate,
    pub close: f64,
}

impl PriceObservation {
    pub fn new(timestamp: NaiveDate, close: f64) -> Self {
        Self { timestamp, close }
    }

    /// Returns true if the close is NaN or infinite (void observation).
    pub fn is_void(&self) -> bool {
        !self.close.is_finite()
    }
}

/// A price observation with both derived indicator fields defined.
///
/// Rows where either indicator is still warming up are never materialized,
/// so both fields are plain numbers in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AugmentedObservation {
    pub timestamp: NaiveDate,
    pub close: f64,
    /// 14-period momentum index (RSI).
    pub momentum_index: f64,
    /// 3-period trailing average of `momentum_index`.
    pub sentiment_score: f64,
}

impl AugmentedObservation {
    /// The underlying price observation, without the derived fields.
    pub fn observation(&self) -> PriceObservation {
        PriceObservation::new(self.timestamp, self.close)
    }
}
