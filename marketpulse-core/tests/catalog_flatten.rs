//! Catalog flattening and selection against the built-in asset list.

use marketpulse_core::catalog::{category_tag, qualified_name};
use marketpulse_core::{AssetCatalog, Selection};

#[test]
fn flattening_preserves_every_pair() {
    let catalog = AssetCatalog::builtin();
    let flat = catalog.flatten();

    for category in catalog.categories() {
        let tag = category_tag(category);
        for (name, ticker) in catalog.entries(category).unwrap() {
            let key = qualified_name(name, tag);
            assert_eq!(flat.get(&key), Some(ticker), "{key}");
            assert_eq!(catalog.resolve(category, name).unwrap(), ticker);
        }
    }
    assert_eq!(flat.len(), catalog.asset_count());
}

#[test]
fn every_selection_mode_reaches_the_same_ticker() {
    let catalog = AssetCatalog::builtin();

    let by_category = Selection::Category {
        category: "🇧🇷 Brazil Market (ADRs)".into(),
        name: "Petrobras".into(),
    }
    .resolve(catalog)
    .unwrap();
    let by_key = Selection::Global {
        key: "Petrobras (Brazil)".into(),
    }
    .resolve(catalog)
    .unwrap();
    let by_ticker = Selection::Manual { ticker: "pbr".into() }.resolve(catalog).unwrap();

    assert_eq!(by_category.ticker, "PBR");
    assert_eq!(by_key.ticker, "PBR");
    assert_eq!(by_ticker.ticker, "PBR");
    assert_eq!(by_ticker.label, "PBR (Manual)");
}

#[test]
fn custom_catalog_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assets.toml");
    std::fs::write(
        &path,
        "[categories.\"⭐ Watchlist\"]\n\"Berkshire B\" = \"BRK-B\"\n",
    )
    .unwrap();

    let catalog = AssetCatalog::from_file(&path).unwrap();
    assert_eq!(catalog.categories(), vec!["⭐ Watchlist"]);
    assert_eq!(catalog.flatten()["Berkshire B (Watchlist)"], "BRK-B");
}
