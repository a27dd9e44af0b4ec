#![allow(dead_code)]

use cointrend::domain::error::CointrendError;
use cointrend::domain::series::PriceSeries;
use cointrend::domain::universe::CoinInfo;
use cointrend::ports::market_data_port::MarketDataPort;
use cointrend::ports::state_port::StatePort;
use cointrend::ports::universe_port::UniversePort;
use std::collections::HashMap;
use std::sync::Mutex;

/// Hourly timestamps starting at a fixed epoch, one per close.
pub const BASE_TIME_MS: i64 = 1_700_000_000_000;
pub const HOUR_MS: i64 = 3_600_000;

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let mut series = PriceSeries::new();
    for (i, close) in closes.iter().enumerate() {
        series.push(BASE_TIME_MS + i as i64 * HOUR_MS, *close);
    }
    series
}

/// Geometric drift per bar, e.g. 0.01 for +1% per hour.
pub fn drifting_series(start: f64, bars: usize, drift: f64) -> PriceSeries {
    let mut series = PriceSeries::new();
    let mut price = start;
    for i in 0..bars {
        series.push(BASE_TIME_MS + i as i64 * HOUR_MS, price);
        price *= 1.0 + drift;
    }
    series
}

pub fn flat_series(price: f64, bars: usize) -> PriceSeries {
    drifting_series(price, bars, 0.0)
}

pub struct MockMarketData {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, pair: &str, series: PriceSeries) -> Self {
        self.data.insert(pair.to_string(), series);
        self
    }

    pub fn with_error(mut self, pair: &str, reason: &str) -> Self {
        self.errors.insert(pair.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError> {
        if let Some(reason) = self.errors.get(pair) {
            return Err(CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: reason.clone(),
            });
        }
        match self.data.get(pair) {
            Some(series) => Ok(series.clone()),
            None => Err(CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: "no data".to_string(),
            }),
        }
    }
}

pub struct MockStatePort {
    pub watchlist: Mutex<Vec<String>>,
    pub outlooks: Mutex<HashMap<String, String>>,
}

impl MockStatePort {
    pub fn new() -> Self {
        Self {
            watchlist: Mutex::new(Vec::new()),
            outlooks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_watchlist(self, symbols: &[&str]) -> Self {
        *self.watchlist.lock().unwrap() = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_outlook(self, symbol: &str, label: &str) -> Self {
        self.outlooks
            .lock()
            .unwrap()
            .insert(symbol.to_string(), label.to_string());
        self
    }
}

impl StatePort for MockStatePort {
    fn load_watchlist(&self) -> Result<Vec<String>, CointrendError> {
        Ok(self.watchlist.lock().unwrap().clone())
    }

    fn save_watchlist(&self, symbols: &[String]) -> Result<(), CointrendError> {
        *self.watchlist.lock().unwrap() = symbols.to_vec();
        Ok(())
    }

    fn load_outlooks(&self) -> Result<HashMap<String, String>, CointrendError> {
        Ok(self.outlooks.lock().unwrap().clone())
    }

    fn save_outlooks(&self, outlooks: &HashMap<String, String>) -> Result<(), CointrendError> {
        *self.outlooks.lock().unwrap() = outlooks.clone();
        Ok(())
    }
}

pub struct MockUniversePort {
    pub coins: Vec<CoinInfo>,
}

impl MockUniversePort {
    pub fn new(coins: Vec<CoinInfo>) -> Self {
        Self { coins }
    }
}

impl UniversePort for MockUniversePort {
    fn fetch_universe(&self, _refresh: bool) -> Result<Vec<CoinInfo>, CointrendError> {
        Ok(self.coins.clone())
    }
}

pub fn coin(id: &str, symbol: &str, name: &str) -> CoinInfo {
    CoinInfo {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
}
