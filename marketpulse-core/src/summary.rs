//! Pulse summary: the headline metrics read from the last pipeline row.

use crate::domain::AugmentedObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment score above which the market reads as overheated.
pub const GREED_THRESHOLD: f64 = 70.0;

/// Sentiment score below which the market reads as oversold.
pub const FEAR_THRESHOLD: f64 = 30.0;

/// Ticker suffix of Buenos Aires listings, quoted in pesos.
const BUENOS_AIRES_SUFFIX: &str = ".BA";

/// Mood zone of a sentiment score. Both thresholds are neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    ExtremeGreed,
    Neutral,
    ExtremeFear,
}

impl Mood {
    pub fn from_score(score: f64) -> Self {
        if score > GREED_THRESHOLD {
            Mood::ExtremeGreed
        } else if score < FEAR_THRESHOLD {
            Mood::ExtremeFear
        } else {
            Mood::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::ExtremeGreed => "Extreme Greed (Risk)",
            Mood::Neutral => "Neutral Zone",
            Mood::ExtremeFear => "Extreme Fear (Opportunity)",
        }
    }

    /// Hex color of the sentiment line in this zone.
    pub fn color(&self) -> &'static str {
        match self {
            Mood::ExtremeGreed => "#FF4B4B",
            Mood::Neutral => "#FFAA00",
            Mood::ExtremeFear => "#00CC96",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quote currency inferred from the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ars,
}

impl Currency {
    pub fn for_ticker(ticker: &str) -> Self {
        if ticker.to_ascii_uppercase().ends_with(BUENOS_AIRES_SUFFIX) {
            Currency::Ars
        } else {
            Currency::Usd
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Headline metrics for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseSummary {
    pub ticker: String,
    pub label: String,
    pub as_of: NaiveDate,
    pub latest_close: f64,
    pub latest_sentiment: f64,
    pub latest_momentum: f64,
    pub mood: Mood,
    pub currency: Currency,
    /// Number of fully-defined rows behind this summary.
    pub rows: usize,
}

impl PulseSummary {
    /// Summarize pipeline output. `None` when there is nothing to display.
    pub fn from_rows(ticker: &str, label: &str, rows: &[AugmentedObservation]) -> Option<Self> {
        let last = rows.last()?;
        Some(Self {
            ticker: ticker.to_string(),
            label: label.to_string(),
            as_of: last.timestamp,
            latest_close: last.close,
            latest_sentiment: last.sentiment_score,
            latest_momentum: last.momentum_index,
            mood: Mood::from_score(last.sentiment_score),
            currency: Currency::for_ticker(ticker),
            rows: rows.len(),
        })
    }
}
