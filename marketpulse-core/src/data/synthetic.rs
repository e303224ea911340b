//! Synthetic provider: deterministic random-walk closes for offline work.
//!
//! Synthetic data is a developer-only debug mode. The walk is seeded from the
//! symbol name, so the same symbol and end date always produce the same series.

use super::provider::{DataError, DataProvider, Lookback};
use crate::domain::{PriceObservation, Series};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// History generated for `Lookback::Max`.
const MAX_DAYS: i64 = 10 * 365;

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    end: NaiveDate,
}

impl SyntheticProvider {
    /// Generate series ending on `end` (inclusive).
    pub fn new(end: NaiveDate) -> Self {
        Self { end }
    }

    /// Generate series ending today.
    pub fn ending_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// Weekday random walk starting at 100.0 with daily returns in ±3%.
pub fn generate_walk(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<PriceObservation> {
    // Deterministic seed from symbol name
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut observations = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;
            observations.push(PriceObservation::new(current, price));
        }
        current += chrono::Duration::days(1);
    }

    observations
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<Series, DataError> {
        let days = lookback.calendar_days().unwrap_or(MAX_DAYS);
        let start = self.end - chrono::Duration::days(days);
        tracing::warn!(symbol, "generating synthetic data: not market prices");
        Ok(Series::normalized(symbol, generate_walk(symbol, start, self.end)))
    }
}
