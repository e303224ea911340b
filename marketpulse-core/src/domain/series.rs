//! Series: an ordered, immutable run of price observations for one symbol.

use super::observation::PriceObservation;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("timestamps out of order at index {index}: {previous} is not before {current}")]
    OutOfOrder {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("duplicate timestamp {timestamp} at index {index}")]
    DuplicateTimestamp { index: usize, timestamp: NaiveDate },
}

/// Time-ordered price observations for a single symbol.
///
/// Timestamps are strictly increasing. The series is never mutated after
/// construction; the pipeline produces a separate augmented sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    symbol: String,
    observations: Vec<PriceObservation>,
}

impl Series {
    /// Build a series, rejecting unordered or duplicate timestamps.
    pub fn new(
        symbol: impl Into<String>,
        observations: Vec<PriceObservation>,
    ) -> Result<Self, SeriesError> {
        for (i, pair) in observations.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            if previous == current {
                return Err(SeriesError::DuplicateTimestamp {
                    index: i + 1,
                    timestamp: current,
                });
            }
            if previous > current {
                return Err(SeriesError::OutOfOrder {
                    index: i + 1,
                    previous,
                    current,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            observations,
        })
    }

    /// Build a series from provider output: sort by timestamp and keep the
    /// last observation for each duplicated date.
    pub fn normalized(symbol: impl Into<String>, mut observations: Vec<PriceObservation>) -> Self {
        // Stable sort keeps provider order among equal dates, so the last one wins below.
        observations.sort_by_key(|o| o.timestamp);
        let mut deduped: Vec<PriceObservation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.timestamp == obs.timestamp => *last = obs,
                _ => deduped.push(obs),
            }
        }
        Self {
            symbol: symbol.into(),
            observations: deduped,
        }
    }

    /// An empty series: the "no data" answer from an upstream provider.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            observations: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.timestamp)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(d: u32, close: f64) -> PriceObservation {
        PriceObservation::new(NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), close)
    }

    #[test]
    fn accepts_strictly_increasing() {
        let s = Series::new("SPY", vec![obs(1, 1.0), obs(4, 2.0), obs(5, 3.0)]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.symbol(), "SPY");
        assert_eq!(s.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_duplicate_timestamp() {
        let err = Series::new("SPY", vec![obs(1, 1.0), obs(1, 2.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateTimestamp { index: 1, .. }));
    }

    #[test]
    fn rejects_out_of_order() {
        let err = Series::new("SPY", vec![obs(2, 1.0), obs(3, 1.0), obs(1, 2.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { index: 2, .. }));
    }

    #[test]
    fn normalized_sorts_and_keeps_last_duplicate() {
        let s = Series::normalized("BTC-USD", vec![obs(3, 3.0), obs(1, 1.0), obs(3, 3.5), obs(2, 2.0)]);
        assert_eq!(s.closes(), vec![1.0, 2.0, 3.5]);
        assert!(Series::new("BTC-USD", s.observations().to_vec()).is_ok());
    }

    #[test]
    fn empty_series() {
        let s = Series::empty("NOPE");
        assert!(s.is_empty());
        assert_eq!(s.first_date(), None);
        assert_eq!(s.last_date(), None);
    }
}
