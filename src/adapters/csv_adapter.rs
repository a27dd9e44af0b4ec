//! CSV file market data adapter for offline runs.
//!
//! Reads `{PAIR}.csv` files with a `time_ms,close` header from a base
//! directory, making backtests and simulations reproducible without network
//! access.

use crate::domain::error::CointrendError;
use crate::domain::series::PriceSeries;
use crate::ports::market_data_port::MarketDataPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, pair: &str) -> PathBuf {
        self.base_path.join(format!("{pair}.csv"))
    }
}

impl MarketDataPort for CsvAdapter {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError> {
        let path = self.csv_path(pair);
        let content = fs::read_to_string(&path).map_err(|e| CointrendError::MarketData {
            symbol: pair.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut series = PriceSeries::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CointrendError::MarketData {
                symbol: pair.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;

            let time: i64 = record
                .get(0)
                .ok_or_else(|| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: "missing time_ms column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: format!("invalid time_ms value: {e}"),
                })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: "missing close column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| CointrendError::MarketData {
                    symbol: pair.to_string(),
                    reason: format!("invalid close value: {e}"),
                })?;

            series.push(time, close);
        }

        Ok(series)
    }
}
