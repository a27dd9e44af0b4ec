//! Primary-then-fallback market data composite.
//!
//! Tries the primary provider first and falls through to the secondary on any
//! failure, warning on stderr. Only when both providers fail does the error
//! surface, naming both reasons.

use std::time::Duration;

use crate::domain::error::CointrendError;
use crate::domain::series::PriceSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;

use super::binance_adapter::{self, BinanceAdapter};
use super::coinbase_adapter::{self, CoinbaseAdapter};

const DEFAULT_TIMEOUT_SECS: u64 = 12;

pub struct FallbackMarketData {
    primary: Box<dyn MarketDataPort + Send + Sync>,
    secondary: Box<dyn MarketDataPort + Send + Sync>,
}

impl FallbackMarketData {
    pub fn new(
        primary: Box<dyn MarketDataPort + Send + Sync>,
        secondary: Box<dyn MarketDataPort + Send + Sync>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Binance primary, Coinbase secondary, URLs and timeout from `[market]`.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, CointrendError> {
        let timeout = Duration::from_secs(
            config.get_int("market", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64) as u64,
        );
        let binance_url = config
            .get_string("market", "binance_url")
            .unwrap_or_else(|| binance_adapter::DEFAULT_BASE_URL.to_string());
        let coinbase_url = config
            .get_string("market", "coinbase_url")
            .unwrap_or_else(|| coinbase_adapter::DEFAULT_BASE_URL.to_string());

        Ok(Self::new(
            Box::new(BinanceAdapter::new(binance_url, timeout)?),
            Box::new(CoinbaseAdapter::new(coinbase_url, timeout)?),
        ))
    }
}

impl MarketDataPort for FallbackMarketData {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError> {
        let primary_err = match self.primary.fetch_series(pair) {
            Ok(series) => return Ok(series),
            Err(e) => e,
        };

        eprintln!("Warning: primary provider failed for {pair} ({primary_err}), trying fallback");

        self.secondary
            .fetch_series(pair)
            .map_err(|secondary_err| CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: format!("primary: {primary_err}; fallback: {secondary_err}"),
            })
    }
}
