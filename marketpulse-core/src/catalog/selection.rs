//! Selection modes: how a user picks the one instrument to analyze.

use super::{AssetCatalog, CatalogError};
use serde::{Deserialize, Serialize};

/// One of the three ways to pick an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Selection {
    /// A category-qualified key from the flattened catalog, e.g. "Petrobras (Brazil)".
    Global { key: String },
    /// A free-text ticker symbol, not necessarily in the catalog.
    Manual { ticker: String },
    /// A display name within one category.
    Category { category: String, name: String },
}

/// The ticker to fetch and the label to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAsset {
    pub ticker: String,
    pub label: String,
}

impl Selection {
    pub fn resolve(&self, catalog: &AssetCatalog) -> Result<ResolvedAsset, CatalogError> {
        match self {
            Selection::Global { key } => {
                let ticker = catalog
                    .flatten()
                    .remove(key)
                    .ok_or_else(|| CatalogError::UnknownKey { key: key.clone() })?;
                Ok(ResolvedAsset {
                    ticker,
                    label: key.clone(),
                })
            }
            Selection::Manual { ticker } => {
                let ticker = ticker.trim().to_uppercase();
                if ticker.is_empty() {
                    return Err(CatalogError::EmptyTicker);
                }
                let label = format!("{ticker} (Manual)");
                Ok(ResolvedAsset { ticker, label })
            }
            Selection::Category { category, name } => {
                let ticker = catalog.resolve(category, name)?;
                Ok(ResolvedAsset {
                    ticker: ticker.to_string(),
                    label: name.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_key_resolves() {
        let sel = Selection::Global {
            key: "Gold (Ounce) (Commodities)".into(),
        };
        let asset = sel.resolve(AssetCatalog::builtin()).unwrap();
        assert_eq!(asset.ticker, "GC=F");
        assert_eq!(asset.label, "Gold (Ounce) (Commodities)");
    }

    #[test]
    fn unknown_global_key() {
        let sel = Selection::Global { key: "Gold".into() };
        assert!(matches!(
            sel.resolve(AssetCatalog::builtin()),
            Err(CatalogError::UnknownKey { .. })
        ));
    }

    #[test]
    fn manual_ticker_is_normalized() {
        let sel = Selection::Manual {
            ticker: "  eurusd=x ".into(),
        };
        let asset = sel.resolve(AssetCatalog::builtin()).unwrap();
        assert_eq!(asset.ticker, "EURUSD=X");
        assert_eq!(asset.label, "EURUSD=X (Manual)");
    }

    #[test]
    fn manual_ticker_must_not_be_blank() {
        let sel = Selection::Manual { ticker: "   ".into() };
        assert!(matches!(
            sel.resolve(AssetCatalog::builtin()),
            Err(CatalogError::EmptyTicker)
        ));
    }

    #[test]
    fn category_selection_uses_display_name() {
        let sel = Selection::Category {
            category: "🌎 Global ETFs".into(),
            name: "Nasdaq 100".into(),
        };
        let asset = sel.resolve(AssetCatalog::builtin()).unwrap();
        assert_eq!(asset.ticker, "QQQ");
        assert_eq!(asset.label, "Nasdaq 100");
    }
}
