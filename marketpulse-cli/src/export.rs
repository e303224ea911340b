//! Chart-series export (CSV/JSON) and summary formatting.

use anyhow::{Context, Result};
use marketpulse_core::{AugmentedObservation, Mood, PulseSummary, ResolvedAsset};
use serde::Serialize;

/// Chart payload: the instrument plus every fully-defined row.
///
/// `mood` and `mood_color` come from the latest sentiment score and color the
/// sentiment line; both are null when there are no rows.
#[derive(Debug, Serialize)]
pub struct ChartSeries<'a> {
    pub ticker: &'a str,
    pub label: &'a str,
    pub mood: Option<Mood>,
    pub mood_color: Option<&'static str>,
    pub rows: &'a [AugmentedObservation],
}

/// Export rows as CSV.
///
/// Columns: timestamp, close, momentum_index, sentiment_score
pub fn series_csv(rows: &[AugmentedObservation]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if rows.is_empty() {
        wtr.write_record(["timestamp", "close", "momentum_index", "sentiment_score"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Export rows as pretty JSON, tagged with the instrument.
pub fn series_json(asset: &ResolvedAsset, rows: &[AugmentedObservation]) -> Result<String> {
    let mood = rows.last().map(|r| Mood::from_score(r.sentiment_score));
    let payload = ChartSeries {
        ticker: &asset.ticker,
        label: &asset.label,
        mood,
        mood_color: mood.map(|m| m.color()),
        rows,
    };
    serde_json::to_string_pretty(&payload).context("Failed to serialize chart series")
}

/// Human-readable summary block.
pub fn summary_text(summary: &PulseSummary) -> String {
    format!(
        "Sentiment Analysis: {label} [{ticker}]\n\
         As of:            {as_of}\n\
         Price ({currency}):      {price}\n\
         Sentiment Score:  {sentiment:.1}\n\
         Momentum (RSI):   {momentum:.1}\n\
         Mood:             {mood}\n",
        label = summary.label,
        ticker = summary.ticker,
        as_of = summary.as_of,
        currency = summary.currency,
        price = format_price(summary.latest_close),
        sentiment = summary.latest_sentiment,
        momentum = summary.latest_momentum,
        mood = summary.mood,
    )
}

/// Price with a dollar sign, thousands separators and two decimals.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}
