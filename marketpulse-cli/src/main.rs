//! MarketPulse CLI: catalog browsing, pulse summary and chart-series export.
//!
//! Commands:
//! - `categories`: list catalog categories
//! - `assets`: list assets, globally or within one category
//! - `search`: global autofill search over every asset
//! - `resolve`: show the ticker and label a selection resolves to
//! - `pulse`: fetch, compute and print the latest sentiment summary
//! - `series`: fetch, compute and export the full chart series

mod export;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use marketpulse_core::config::MarketPulseConfig;
use marketpulse_core::data::{build_provider, fetch_or_empty};
use marketpulse_core::pipeline::compute;
use marketpulse_core::{
    AssetCatalog, AugmentedObservation, DataSource, Lookback, PulseSummary, ResolvedAsset, Selection,
};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "marketpulse.toml";

#[derive(Parser)]
#[command(
    name = "marketpulse",
    about = "MarketPulse: momentum-based market sentiment for a curated asset list"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./marketpulse.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog categories.
    Categories,
    /// List assets: qualified names of all assets, or one category's entries.
    Assets {
        /// Category label (as printed by `categories`).
        #[arg(long)]
        category: Option<String>,
    },
    /// Search all assets by name or ticker (case-insensitive substring).
    Search {
        /// Text to look for. Empty lists everything.
        #[arg(default_value = "")]
        query: String,
    },
    /// Show the ticker and label a selection resolves to.
    Resolve {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Fetch prices and print the latest sentiment summary.
    Pulse {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch prices and export the full price + sentiment series for charting.
    Series {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = SeriesFormat::Csv)]
        format: SeriesFormat,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// One of the three selection modes.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = true)]
struct SelectionArgs {
    /// Qualified asset name from `assets`/`search`, e.g. "Petrobras (Brazil)".
    #[arg(long, conflicts_with_all = ["ticker", "category", "name"])]
    asset: Option<String>,

    /// Free-text ticker symbol, e.g. EURUSD=X.
    #[arg(long, conflicts_with_all = ["category", "name"])]
    ticker: Option<String>,

    /// Category label; requires --name.
    #[arg(long, requires = "name")]
    category: Option<String>,

    /// Display name within --category.
    #[arg(long, requires = "category")]
    name: Option<String>,
}

impl SelectionArgs {
    fn to_selection(&self) -> Result<Selection> {
        match (&self.asset, &self.ticker, &self.category, &self.name) {
            (Some(key), None, None, None) => Ok(Selection::Global { key: key.clone() }),
            (None, Some(ticker), None, None) => Ok(Selection::Manual {
                ticker: ticker.clone(),
            }),
            (None, None, Some(category), Some(name)) => Ok(Selection::Category {
                category: category.clone(),
                name: name.clone(),
            }),
            _ => bail!("choose exactly one of --asset, --ticker, or --category with --name"),
        }
    }
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    /// History to fetch: 1mo, 3mo, 6mo, 1y, 2y, 5y, max.
    #[arg(long)]
    period: Option<Lookback>,

    /// Data source: yahoo, csv, synthetic (synthetic is for development only).
    #[arg(long)]
    source: Option<DataSource>,

    /// Directory of <SYMBOL>.csv files for the csv source.
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

impl FetchArgs {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut MarketPulseConfig) {
        if let Some(period) = self.period {
            config.data.lookback = period;
        }
        if let Some(source) = self.source {
            config.data.source = source;
        }
        if let Some(dir) = &self.csv_dir {
            config.data.csv_dir = dir.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeriesFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    let catalog = config
        .catalog
        .load()
        .context("Failed to load asset catalog")?;

    match cli.command {
        Commands::Categories => run_categories(&catalog),
        Commands::Assets { category } => run_assets(&catalog, category.as_deref()),
        Commands::Search { query } => run_search(&catalog, &query),
        Commands::Resolve { selection } => run_resolve(&catalog, &selection),
        Commands::Pulse {
            selection,
            fetch,
            json,
        } => {
            fetch.apply(&mut config);
            run_pulse(&catalog, &config, &selection, json)
        }
        Commands::Series {
            selection,
            fetch,
            format,
            output,
        } => {
            fetch.apply(&mut config);
            run_series(&catalog, &config, &selection, format, output.as_deref())
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<MarketPulseConfig> {
    if let Some(path) = path {
        return MarketPulseConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::info!(path = DEFAULT_CONFIG_FILE, "using config from working directory");
        return MarketPulseConfig::from_file(default_path)
            .with_context(|| format!("Failed to load config {DEFAULT_CONFIG_FILE}"));
    }

    Ok(MarketPulseConfig::default())
}

fn run_categories(catalog: &AssetCatalog) -> Result<()> {
    for category in catalog.categories() {
        let count = catalog.entries(category)?.len();
        println!("{category}  ({count} assets)");
    }
    Ok(())
}

fn run_assets(catalog: &AssetCatalog, category: Option<&str>) -> Result<()> {
    match category {
        Some(category) => {
            let entries = catalog.entries(category)?;
            println!("{:<28} {:<10}", "Asset", "Ticker");
            println!("{}", "-".repeat(39));
            for (name, ticker) in entries {
                println!("{name:<28} {ticker:<10}");
            }
        }
        None => print_key_table(catalog.flatten()),
    }
    Ok(())
}

fn run_search(catalog: &AssetCatalog, query: &str) -> Result<()> {
    let hits = catalog.search(query);
    if hits.is_empty() {
        println!("No assets match '{query}'. Use `pulse --ticker <SYMBOL>` for anything else.");
        return Ok(());
    }
    print_key_table(hits);
    Ok(())
}

fn print_key_table(rows: impl IntoIterator<Item = (String, String)>) {
    println!("{:<40} {:<10}", "Asset", "Ticker");
    println!("{}", "-".repeat(51));
    for (key, ticker) in rows {
        println!("{key:<40} {ticker:<10}");
    }
}

fn run_resolve(catalog: &AssetCatalog, selection: &SelectionArgs) -> Result<()> {
    let asset = selection.to_selection()?.resolve(catalog)?;
    println!("{}\t{}", asset.ticker, asset.label);
    Ok(())
}

/// Resolve the selection, fetch its series and run the pipeline.
fn analyze(
    catalog: &AssetCatalog,
    config: &MarketPulseConfig,
    selection: &SelectionArgs,
) -> Result<(ResolvedAsset, Vec<AugmentedObservation>)> {
    let asset = selection.to_selection()?.resolve(catalog)?;
    let provider = build_provider(&config.data).context("Failed to set up data provider")?;

    tracing::info!(
        ticker = %asset.ticker,
        provider = provider.name(),
        lookback = %config.data.lookback,
        "fetching series"
    );
    let series = fetch_or_empty(provider.as_ref(), &asset.ticker, config.data.lookback);
    let rows = compute(&series);
    Ok((asset, rows))
}

fn warn_unavailable(ticker: &str) {
    eprintln!("Data unavailable for '{ticker}'. Market might be closed or ticker invalid.");
}

fn run_pulse(
    catalog: &AssetCatalog,
    config: &MarketPulseConfig,
    selection: &SelectionArgs,
    json: bool,
) -> Result<()> {
    let (asset, rows) = analyze(catalog, config, selection)?;

    let Some(summary) = PulseSummary::from_rows(&asset.ticker, &asset.label, &rows) else {
        warn_unavailable(&asset.ticker);
        return Ok(());
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        print!("{}", export::summary_text(&summary));
    }
    Ok(())
}

fn run_series(
    catalog: &AssetCatalog,
    config: &MarketPulseConfig,
    selection: &SelectionArgs,
    format: SeriesFormat,
    output: Option<&Path>,
) -> Result<()> {
    let (asset, rows) = analyze(catalog, config, selection)?;

    if rows.is_empty() {
        warn_unavailable(&asset.ticker);
        return Ok(());
    }

    let body = match format {
        SeriesFormat::Csv => export::series_csv(&rows)?,
        SeriesFormat::Json => export::series_json(&asset, &rows)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &body)
                .with_context(|| format!("Failed to write series to {}", path.display()))?;
            println!("{} rows written to {}", rows.len(), path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_category_selection() {
        let cli = Cli::try_parse_from([
            "marketpulse",
            "pulse",
            "--category",
            "🚀 Crypto",
            "--name",
            "Bitcoin",
            "--period",
            "6mo",
        ])
        .unwrap();
        let Commands::Pulse { selection, fetch, json } = cli.command else {
            panic!("expected pulse");
        };
        assert!(!json);
        assert_eq!(fetch.period, Some(Lookback::SixMonths));
        assert_eq!(
            selection.to_selection().unwrap(),
            Selection::Category {
                category: "🚀 Crypto".into(),
                name: "Bitcoin".into()
            }
        );
    }

    #[test]
    fn rejects_mixed_selection_modes() {
        let result = Cli::try_parse_from([
            "marketpulse",
            "pulse",
            "--asset",
            "Bitcoin (Crypto)",
            "--ticker",
            "ETH-USD",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_a_selection() {
        assert!(Cli::try_parse_from(["marketpulse", "resolve"]).is_err());
    }

    #[test]
    fn category_requires_name() {
        assert!(Cli::try_parse_from(["marketpulse", "resolve", "--category", "🚀 Crypto"]).is_err());
    }

    #[test]
    fn fetch_overrides_config() {
        let mut config = MarketPulseConfig::default();
        let fetch = FetchArgs {
            period: Some(Lookback::TwoYears),
            source: Some(DataSource::Csv),
            csv_dir: Some(PathBuf::from("fixtures")),
        };
        fetch.apply(&mut config);
        assert_eq!(config.data.lookback, Lookback::TwoYears);
        assert_eq!(config.data.source, DataSource::Csv);
        assert_eq!(config.data.csv_dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn analyze_with_csv_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = String::from("date,close\n");
        let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for i in 0..25 {
            body.push_str(&format!("{},{}\n", base + chrono::Duration::days(i), 10.0 + i as f64));
        }
        std::fs::write(dir.path().join("NVDA.csv"), body).unwrap();

        let mut config = MarketPulseConfig::default();
        FetchArgs {
            period: Some(Lookback::Max),
            source: Some(DataSource::Csv),
            csv_dir: Some(dir.path().to_path_buf()),
        }
        .apply(&mut config);

        let selection = SelectionArgs {
            asset: Some("Nvidia (US)".into()),
            ticker: None,
            category: None,
            name: None,
        };
        let (asset, rows) = analyze(AssetCatalog::builtin(), &config, &selection).unwrap();
        assert_eq!(asset.ticker, "NVDA");
        assert_eq!(rows.len(), 25 - 16);
        assert!(rows.iter().all(|r| r.sentiment_score == 100.0));
    }
}
