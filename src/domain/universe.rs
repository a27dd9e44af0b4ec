//! Coin universe search and paging.
//!
//! Works over the cached CoinGecko coin list; fetching and caching live behind
//! the universe port.

use serde::{Deserialize, Serialize};

use super::error::CointrendError;

pub const MAX_UNIVERSE_LIMIT: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UniversePage {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub items: Vec<CoinInfo>,
}

pub fn validate_limit(limit: usize) -> Result<(), CointrendError> {
    if limit == 0 || limit > MAX_UNIVERSE_LIMIT {
        return Err(CointrendError::InvalidParameter {
            name: "limit".into(),
            reason: format!("must be between 1 and {MAX_UNIVERSE_LIMIT}, got {limit}"),
        });
    }
    Ok(())
}

/// Case-insensitive substring filter over id, symbol and name, then an
/// offset/limit page. `total` counts the filtered set, not the page.
pub fn filter_universe(
    coins: &[CoinInfo],
    search: &str,
    offset: usize,
    limit: usize,
) -> UniversePage {
    let query = search.trim().to_lowercase();

    let matched: Vec<&CoinInfo> = if query.is_empty() {
        coins.iter().collect()
    } else {
        coins
            .iter()
            .filter(|c| {
                c.id.to_lowercase().contains(&query)
                    || c.symbol.to_lowercase().contains(&query)
                    || c.name.to_lowercase().contains(&query)
            })
            .collect()
    };

    let total = matched.len();
    let items = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    UniversePage {
        total,
        offset,
        limit,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coins() -> Vec<CoinInfo> {
        [
            ("bitcoin", "btc", "Bitcoin"),
            ("ethereum", "eth", "Ethereum"),
            ("solana", "sol", "Solana"),
            ("bitcoin-cash", "bch", "Bitcoin Cash"),
            ("dogecoin", "doge", "Dogecoin"),
        ]
        .iter()
        .map(|(id, symbol, name)| CoinInfo {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
    }

    #[test]
    fn empty_search_returns_everything() {
        let page = filter_universe(&sample_coins(), "", 0, 200);
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn search_matches_id_symbol_and_name() {
        let coins = sample_coins();
        assert_eq!(filter_universe(&coins, "bitcoin", 0, 200).total, 2);
        assert_eq!(filter_universe(&coins, "ETH", 0, 200).total, 1);
        assert_eq!(filter_universe(&coins, "Solana", 0, 200).total, 1);
    }

    #[test]
    fn paging_applies_after_filtering() {
        let coins = sample_coins();
        let page = filter_universe(&coins, "coin", 1, 2);
        // bitcoin, bitcoin-cash, dogecoin match "coin"
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "bitcoin-cash");
        assert_eq!(page.offset, 1);
        assert_eq!(page.limit, 2);
    }

    #[test]
    fn offset_past_end_yields_empty_page() {
        let page = filter_universe(&sample_coins(), "", 10, 5);
        assert_eq!(page.total, 5);
        assert!(page.items.is_empty());
    }

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(2000).is_ok());
        assert!(validate_limit(2001).is_err());
    }
}
