//! Upstream data: providers that turn a ticker and lookback into a series.

pub mod csv_file;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use csv_file::CsvProvider;
pub use provider::{fetch_or_empty, DataError, DataProvider, DataSource, Lookback};
pub use synthetic::SyntheticProvider;
pub use yahoo::{YahooConfig, YahooProvider};

use crate::config::DataConfig;

/// Build the provider selected by the data configuration.
pub fn build_provider(config: &DataConfig) -> Result<Box<dyn DataProvider>, DataError> {
    let provider: Box<dyn DataProvider> = match config.source {
        DataSource::Yahoo => Box::new(YahooProvider::new(config.yahoo())?),
        DataSource::Csv => Box::new(CsvProvider::new(&config.csv_dir)),
        DataSource::Synthetic => Box::new(SyntheticProvider::ending_today()),
    };
    tracing::debug!(provider = provider.name(), "data provider ready");
    Ok(provider)
}
