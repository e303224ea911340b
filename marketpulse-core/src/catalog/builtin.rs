//! The curated instrument list shipped with MarketPulse.
//!
//! Labels carry a leading icon; the first word after it is the category tag
//! used when names are flattened into a single lookup.

pub(super) const BUILTIN_ASSETS: &[(&str, &[(&str, &str)])] = &[
    (
        "🇧🇷 Brazil Market (ADRs)",
        &[
            ("Petrobras", "PBR"),
            ("Vale S.A.", "VALE"),
            ("Itau Unibanco", "ITUB"),
            ("Bradesco", "BBD"),
            ("Ambev", "ABEV"),
            ("Embraer", "ERJ"),
            ("Nu Holdings (Nubank)", "NU"),
            ("Gerdau", "GGB"),
        ],
    ),
    (
        "🛢️ Commodities & Metals",
        &[
            ("Gold (Ounce)", "GC=F"),
            ("Silver (Ounce)", "SI=F"),
            ("Crude Oil (WTI)", "CL=F"),
            ("Copper", "HG=F"),
            ("Natural Gas", "NG=F"),
            ("Corn", "ZC=F"),
        ],
    ),
    (
        "🚀 Crypto",
        &[
            ("Bitcoin", "BTC-USD"),
            ("Ethereum", "ETH-USD"),
            ("Solana", "SOL-USD"),
            ("Binance Coin", "BNB-USD"),
            ("Ripple (XRP)", "XRP-USD"),
        ],
    ),
    (
        "🇦🇷 CEDEARs (Argentina)",
        &[
            ("Apple (CEDEAR)", "AAPL.BA"),
            ("Mercado Libre", "MELI.BA"),
            ("Tesla (CEDEAR)", "TSLA.BA"),
            ("Coca-Cola", "KO.BA"),
            ("SPY (S&P 500)", "SPY.BA"),
            ("Vista Oil", "VIST.BA"),
        ],
    ),
    (
        "🏢 US Big Tech",
        &[
            ("Apple", "AAPL"),
            ("Nvidia", "NVDA"),
            ("Tesla", "TSLA"),
            ("Microsoft", "MSFT"),
            ("Meta", "META"),
            ("Google", "GOOGL"),
            ("Amazon", "AMZN"),
        ],
    ),
    (
        "🌎 Global ETFs",
        &[
            ("S&P 500", "SPY"),
            ("Nasdaq 100", "QQQ"),
            ("China Large-Cap", "FXI"),
            ("Emerging Markets", "EEM"),
        ],
    ),
];
