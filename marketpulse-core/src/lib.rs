//! MarketPulse Core: price series, sentiment pipeline, asset catalog, data providers.
//!
//! This crate contains everything behind the `marketpulse` command:
//! - Domain types (price observations, series, augmented rows)
//! - Indicators (momentum index, simple moving average) over a rolling window
//! - The sentiment pipeline and the headline summary read from it
//! - The asset catalog with its three selection modes
//! - Upstream data providers (Yahoo Finance, CSV files, synthetic walks)
//! - TOML configuration

pub mod catalog;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod summary;

pub use catalog::{AssetCatalog, CatalogError, ResolvedAsset, Selection};
pub use config::{ConfigError, MarketPulseConfig};
pub use data::{fetch_or_empty, DataError, DataProvider, DataSource, Lookback};
pub use domain::{AugmentedObservation, PriceObservation, Series, SeriesError};
pub use pipeline::compute;
pub use summary::{Currency, Mood, PulseSummary};
