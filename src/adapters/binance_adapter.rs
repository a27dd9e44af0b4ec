//! Binance klines adapter (primary market data provider).
//!
//! Fetches up to 1000 hourly klines per pair from the public REST API. Binance
//! returns klines as heterogeneous JSON arrays; only the open time (index 0,
//! epoch ms) and the close (index 4, stringified decimal) are read.

use std::time::Duration;

use crate::domain::error::CointrendError;
use crate::domain::series::PriceSeries;
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const INTERVAL: &str = "1h";
const LIMIT: usize = 1000;

pub struct BinanceAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceAdapter {
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

    fn klines_url(&self, pair: &str) -> String {
        format!(
            "{}/api/v3/klines?symbol={pair}&interval={INTERVAL}&limit={LIMIT}",
            self.base_url
        )
    }

    fn parse_klines(pair: &str, rows: Vec<Vec<serde_json::Value>>) -> Result<PriceSeries, CointrendError> {
        let mut series = PriceSeries::new();
        for row in rows {
            let time = row
                .first()
                .and_then(|v| v.as_i64())
                .ok_or_else(|| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: "kline row missing open time".into(),
                })?;
            let close = row
                .get(4)
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: "kline row missing close price".into(),
                })?;
            series.push(time, close);
        }
        Ok(series)
    }
}

impl MarketDataPort for BinanceAdapter {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError> {
        let url = self.klines_url(pair);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: format!("binance request failed: {e}"),
            })?;

        let rows: Vec<Vec<serde_json::Value>> =
            response.json().map_err(|e| CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: format!("binance response parse failed: {e}"),
            })?;

        Self::parse_klines(pair, rows)
    }
}
