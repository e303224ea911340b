//! Asset catalog: category-organized display names and their tickers.
//!
//! The catalog is read-only once built. The built-in list is a process-wide
//! static; a custom list can be loaded once from a TOML file of the same shape:
//!
//! ```toml
//! [categories."🚀 Crypto"]
//! Bitcoin = "BTC-USD"
//! ```

mod builtin;
pub mod selection;

pub use selection::{ResolvedAsset, Selection};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown category: {category}")]
    UnknownCategory { category: String },

    #[error("no asset named '{name}' in category '{category}'")]
    UnknownAsset { category: String, name: String },

    #[error("no asset matches '{key}'")]
    UnknownKey { key: String },

    #[error("ticker symbol is empty")]
    EmptyTicker,

    #[error("invalid catalog: {0}")]
    Invalid(String),

    #[error("read catalog file: {0}")]
    Read(#[from] std::io::Error),

    #[error("parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize catalog: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Category label → (display name → ticker symbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

static BUILTIN: OnceLock<AssetCatalog> = OnceLock::new();

impl AssetCatalog {
    /// The built-in catalog, initialized on first use.
    pub fn builtin() -> &'static AssetCatalog {
        BUILTIN.get_or_init(|| {
            let categories = builtin::BUILTIN_ASSETS
                .iter()
                .map(|(label, entries)| {
                    let entries = entries
                        .iter()
                        .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
                        .collect();
                    (label.to_string(), entries)
                })
                .collect();
            AssetCatalog { categories }
        })
    }

    /// Build a catalog from an in-memory map, validating it.
    pub fn new(categories: BTreeMap<String, BTreeMap<String, String>>) -> Result<Self, CatalogError> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog to TOML.
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Invalid("no categories".into()));
        }
        for (label, entries) in &self.categories {
            if label.trim().is_empty() {
                return Err(CatalogError::Invalid("blank category label".into()));
            }
            if entries.is_empty() {
                return Err(CatalogError::Invalid(format!("category '{label}' has no assets")));
            }
            if let Some((name, _)) = entries.iter().find(|(_, t)| t.trim().is_empty()) {
                return Err(CatalogError::Invalid(format!(
                    "asset '{name}' in '{label}' has an empty ticker"
                )));
            }
        }
        Ok(())
    }

    /// Category labels, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(|s| s.as_str()).collect()
    }

    /// Display name → ticker for one category, sorted by name.
    pub fn entries(&self, category: &str) -> Result<&BTreeMap<String, String>, CatalogError> {
        self.categories
            .get(category)
            .ok_or_else(|| CatalogError::UnknownCategory {
                category: category.to_string(),
            })
    }

    /// Ticker for a (category, display name) pair.
    pub fn resolve(&self, category: &str, name: &str) -> Result<&str, CatalogError> {
        self.entries(category)?
            .get(name)
            .map(|t| t.as_str())
            .ok_or_else(|| CatalogError::UnknownAsset {
                category: category.to_string(),
                name: name.to_string(),
            })
    }

    /// All entries under category-qualified keys, e.g. "Petrobras (Brazil)".
    ///
    /// Names are qualified before flattening; if two qualified keys still
    /// collide, the category that sorts later wins.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        for (label, entries) in &self.categories {
            let tag = category_tag(label);
            for (name, ticker) in entries {
                flat.insert(qualified_name(name, tag), ticker.clone());
            }
        }
        flat
    }

    /// Case-insensitive substring search over qualified keys and tickers.
    ///
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<(String, String)> {
        let needle = query.trim().to_lowercase();
        self.flatten()
            .into_iter()
            .filter(|(key, ticker)| {
                needle.is_empty()
                    || key.to_lowercase().contains(&needle)
                    || ticker.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Total number of assets across all categories.
    pub fn asset_count(&self) -> usize {
        self.categories.values().map(|v| v.len()).sum()
    }
}

/// Short tag of a category label: its first word, skipping a leading icon.
pub fn category_tag(label: &str) -> &str {
    let mut words = label.split_whitespace();
    let first = words.next().unwrap_or(label);
    if first.chars().any(|c| c.is_ascii_alphanumeric()) {
        first
    } else {
        words.next().unwrap_or(first)
    }
}

/// Global lookup key of an asset: `"{name} ({tag})"`.
pub fn qualified_name(name: &str, tag: &str) -> String {
    format!("{name} ({tag})")
}
