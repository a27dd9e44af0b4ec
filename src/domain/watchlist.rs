//! Watchlist symbol normalization.

pub const DEFAULT_WATCHLIST: [&str; 3] = ["BTCUSDT", "ETHUSDT", "SOLUSDT"];

const QUOTE_SUFFIX: &str = "USDT";

/// Normalize a user-supplied symbol to an exchange pair: uppercase, with the
/// quote suffix appended unless already present.
pub fn to_pair(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    if upper.ends_with(QUOTE_SUFFIX) {
        upper
    } else {
        format!("{upper}{QUOTE_SUFFIX}")
    }
}

/// Pair-normalize a symbol list, dropping empties and keeping the first
/// occurrence of each pair in order.
pub fn normalize(symbols: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for s in symbols {
        if s.trim().is_empty() {
            continue;
        }
        let pair = to_pair(s);
        if !out.contains(&pair) {
            out.push(pair);
        }
    }
    out
}

pub fn default_watchlist() -> Vec<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}
