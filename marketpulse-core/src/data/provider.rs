//! Data provider trait, lookback periods and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! files, synthetic walks) so the pipeline never knows where closes came from
//! and tests can run offline.

use crate::domain::Series;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Structured error types for data operations.
///
/// These are designed to be displayable in CLI output as-is.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("access denied by provider: {0}")]
    AccessDenied(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("unknown lookback period '{0}' (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y, max)")]
    InvalidLookback(String),

    #[error("unknown data source '{0}' (expected yahoo, csv or synthetic)")]
    InvalidSource(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Where closes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

impl FromStr for DataSource {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(DataSource::Yahoo),
            "csv" => Ok(DataSource::Csv),
            "synthetic" => Ok(DataSource::Synthetic),
            other => Err(DataError::InvalidSource(other.to_string())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Yahoo => "yahoo",
            DataSource::Csv => "csv",
            DataSource::Synthetic => "synthetic",
        })
    }
}

/// How much history to request, counted back from the latest close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lookback {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Lookback {
    /// Provider-facing period string ("1y", "6mo", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
            Lookback::Max => "max",
        }
    }

    /// Calendar days covered, `None` for all available history.
    pub fn calendar_days(&self) -> Option<i64> {
        match self {
            Lookback::OneMonth => Some(31),
            Lookback::ThreeMonths => Some(92),
            Lookback::SixMonths => Some(183),
            Lookback::OneYear => Some(365),
            Lookback::TwoYears => Some(730),
            Lookback::FiveYears => Some(1826),
            Lookback::Max => None,
        }
    }
}

impl FromStr for Lookback {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1mo" => Ok(Lookback::OneMonth),
            "3mo" => Ok(Lookback::ThreeMonths),
            "6mo" => Ok(Lookback::SixMonths),
            "1y" => Ok(Lookback::OneYear),
            "2y" => Ok(Lookback::TwoYears),
            "5y" => Ok(Lookback::FiveYears),
            "max" => Ok(Lookback::Max),
            other => Err(DataError::InvalidLookback(other.to_string())),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for data providers (Yahoo Finance, CSV files, etc).
///
/// Implementations return daily closes in ascending date order with unique
/// dates (`Series::normalized` does this for them).
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for a symbol over a lookback period.
    fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<Series, DataError>;
}

/// Fetch a series, degrading every failure to an empty series.
///
/// This is the contract the presentation layer relies on: an invalid ticker
/// or unavailable market data is "nothing to display", not a fault.
pub fn fetch_or_empty(provider: &dyn DataProvider, symbol: &str, lookback: Lookback) -> Series {
    match provider.fetch(symbol, lookback) {
        Ok(series) => {
            tracing::debug!(
                provider = provider.name(),
                symbol,
                observations = series.len(),
                "fetched series"
            );
            series
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), symbol, error = %e, "fetch failed, no data");
            Series::empty(symbol)
        }
    }
}
