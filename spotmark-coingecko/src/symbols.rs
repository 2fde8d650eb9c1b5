//! Symbol to CoinGecko coin-id mapping.
//!
//! The service speaks ticker symbols at its edge ("BTC") and coin ids
//! upstream ("bitcoin"). The table is fixed; an unknown symbol is a caller
//! error, not a lookup to attempt upstream.

/// Supported ticker symbols and their CoinGecko coin ids.
pub const SUPPORTED: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("ADA", "cardano"),
    ("AVAX", "avalanche-2"),
    ("DOGE", "dogecoin"),
    ("MATIC", "polygon-pos"),
];

/// Maps a ticker symbol to its CoinGecko coin id.
///
/// Lookup trims surrounding whitespace and ignores case.
pub fn to_coin_id(symbol: &str) -> Option<&'static str> {
    let normalized = symbol.trim().to_uppercase();
    SUPPORTED
        .iter()
        .find(|(sym, _)| *sym == normalized)
        .map(|(_, id)| *id)
}

/// The supported ticker symbols, for help text and error messages.
pub fn supported_symbols() -> Vec<&'static str> {
    SUPPORTED.iter().map(|(sym, _)| *sym).collect()
}
