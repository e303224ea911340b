//! Yahoo Finance data provider.
//!
//! Fetches daily closes from Yahoo's v8 chart API by range ("1y", "6mo", ...).
//! Adjusted closes are preferred when present, so splits and dividends do not
//! show up as momentum. Retries transient failures with exponential backoff.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV provider is the fallback when Yahoo is unavailable.

use super::provider::{DataError, DataProvider, Lookback};
use crate::domain::{PriceObservation, Series};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

const CHART_API: &str = "https://query2.finance.yahoo.com/v8/finance/chart/";

/// Browser-like user agent; the chart API rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// HTTP settings for the Yahoo provider.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_delay: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            base_delay: config.base_delay,
        })
    }

    /// Build the chart API URL for a symbol and lookback period.
    fn chart_url(symbol: &str, lookback: Lookback) -> Result<reqwest::Url, DataError> {
        let mut url = reqwest::Url::parse(CHART_API)
            .map_err(|e| DataError::Other(format!("chart API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Other("chart API URL cannot be a base".into()))?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", lookback.as_str())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }

    /// Parse the chart API response into daily observations.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceObservation>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // A symbol with no trading history comes back without timestamps.
        let Some(timestamps) = data.timestamp else {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        };

        let gmtoffset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut observations = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = exchange_date(ts, gmtoffset).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;

            let adj_close = adj_closes.as_ref().and_then(|v| v.get(i).copied().flatten());
            let close = quote.close.get(i).copied().flatten();

            // Holidays and halted sessions come back as nulls.
            let Some(close) = adj_close.or(close) else {
                continue;
            };

            observations.push(PriceObservation::new(date, close));
        }

        if observations.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(observations)
    }

    /// Execute the HTTP request with retry logic.
    fn fetch_with_retry(&self, symbol: &str, lookback: Lookback) -> Result<Vec<PriceObservation>, DataError> {
        let url = Self::chart_url(symbol, lookback)?;
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                tracing::debug!(symbol, attempt, delay_ms = delay.as_millis() as u64, "retrying");
                std::thread::sleep(delay);
            }

            tracing::debug!(symbol, attempt, url = %url, "requesting chart");

            match self.client.get(url.clone()).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }

                    if status == reqwest::StatusCode::FORBIDDEN {
                        return Err(DataError::AccessDenied(format!("HTTP {status} for {symbol}")));
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(DataError::AuthenticationRequired(
                            "Yahoo Finance requires authentication".into(),
                        ));
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        tracing::warn!(symbol, retry_after, "rate limited");
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        tracing::warn!(symbol, %status, "chart request failed");
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let chart: ChartResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    return Self::parse_response(symbol, chart);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        tracing::warn!(symbol, error = %e, "network error");
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

/// Trading date of a bar timestamp in the exchange's local time.
fn exchange_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(ts + gmtoffset, 0).map(|dt| dt.naive_utc().date())
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, lookback: Lookback) -> Result<Series, DataError> {
        let observations = self.fetch_with_retry(symbol, lookback)?;
        Ok(Series::normalized(symbol, observations))
    }
}
