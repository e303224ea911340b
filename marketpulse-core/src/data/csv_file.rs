//! CSV file provider: offline closes from `<dir>/<SYMBOL>.csv`.
//!
//! Expected columns: `date` (YYYY-MM-DD) and `close`. Yahoo-style `Date` and
//! `Close` headers are accepted too. Rows with an empty close are skipped.

use super::provider::{DataError, DataProvider, Lookback};
use crate::domain::{PriceObservation, Series};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Close")]
    close: Option<f64>,
}

/// Reads one CSV file per symbol from a directory.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the CSV file for a symbol.
    pub fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn read_observations(path: &Path) -> Result<Vec<PriceObservation>, DataError> {
        let csv_err = |e: csv::Error| DataError::Csv {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_err)?;

        let mut observations = Vec::new();
        for record in reader.deserialize::<CsvRow>() {
            let row = record.map_err(csv_err)?;
            if let Some(close) = row.close {
                observations.push(PriceObservation::new(row.date, close));
            }
        }
        Ok(observations)
    }
}

/// Keep the observations within `lookback` of the latest date, boundary day included.
fn trim_to_lookback(mut observations: Vec<PriceObservation>, lookback: Lookback) -> Vec<PriceObservation> {
    let (Some(days), Some(last)) = (
        lookback.calendar_days(),
        observations.iter().map(|o| o.timestamp).max(),
    ) else {
        return observations;
    };
    let cutoff = last - chrono::Duration::days(days);
    observations.retain(|o| o.timestamp >= cutoff);
    observations
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_file"
    }

    fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<Series, DataError> {
        let path = self.symbol_path(symbol);
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let observations = Self::read_observations(&path)?;
        tracing::debug!(symbol, path = %path.display(), rows = observations.len(), "read CSV");
        let observations = trim_to_lookback(observations, lookback);
        Ok(Series::normalized(symbol, observations))
    }
}
