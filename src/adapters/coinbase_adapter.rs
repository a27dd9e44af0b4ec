//! Coinbase Exchange candles adapter (fallback market data provider).
//!
//! The public candles endpoint returns `[time, low, high, open, close, volume]`
//! rows newest-first with second-precision timestamps; rows are re-sorted
//! oldest-first and times widened to epoch milliseconds to match the primary
//! provider's series shape.

use std::time::Duration;

use crate::domain::error::CointrendError;
use crate::domain::series::PriceSeries;
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";
const GRANULARITY_SECS: u32 = 3600;

pub struct CoinbaseAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinbaseAdapter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CointrendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CointrendError::MarketData {
                symbol: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Map an exchange pair to a Coinbase product id: `BTCUSDT` → `BTC-USD`.
    pub fn product_id(pair: &str) -> String {
        let base = pair.to_uppercase().replace("USDT", "");
        format!("{base}-USD")
    }

    fn candles_url(&self, pair: &str) -> String {
        format!(
            "{}/products/{}/candles?granularity={GRANULARITY_SECS}",
            self.base_url,
            Self::product_id(pair)
        )
    }

    fn parse_candles(pair: &str, mut rows: Vec<[f64; 6]>) -> Result<PriceSeries, CointrendError> {
        if rows.is_empty() {
            return Err(CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: "no candles in coinbase response".into(),
            });
        }

        rows.sort_by(|a, b| a[0].total_cmp(&b[0]));

        let mut series = PriceSeries::new();
        for row in rows {
            series.push(row[0] as i64 * 1000, row[4]);
        }
        Ok(series)
    }
}

impl MarketDataPort for CoinbaseAdapter {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError> {
        let url = self.candles_url(pair);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: format!("coinbase request failed: {e}"),
            })?;

        let rows: Vec<[f64; 6]> = response.json().map_err(|e| CointrendError::MarketData {
            symbol: pair.to_string(),
            reason: format!("coinbase response parse failed: {e}"),
        })?;

        Self::parse_candles(pair, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_strips_quote_suffix() {
        assert_eq!(CoinbaseAdapter::product_id("BTCUSDT"), "BTC-USD");
        assert_eq!(CoinbaseAdapter::product_id("solusdt"), "SOL-USD");
    }

    #[test]
    fn candles_sorted_oldest_first_and_widened_to_ms() {
        // newest-first input, [time, low, high, open, close, volume]
        let rows = vec![
            [1_700_003_600.0, 99.0, 101.0, 100.0, 100.5, 10.0],
            [1_700_000_000.0, 98.0, 100.0, 99.0, 99.5, 12.0],
        ];
        let series = CoinbaseAdapter::parse_candles("BTCUSDT", rows).unwrap();
        assert_eq!(series.times(), &[1_700_000_000_000, 1_700_003_600_000]);
        assert_eq!(series.closes(), &[99.5, 100.5]);
    }

    #[test]
    fn empty_candles_is_an_error() {
        let err = CoinbaseAdapter::parse_candles("BTCUSDT", Vec::new()).unwrap_err();
        assert!(matches!(err, CointrendError::MarketData { .. }));
    }
}
