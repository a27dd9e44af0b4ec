//! End-to-end tests over the port traits, without network access.
//!
//! Tests cover:
//! - Full signal pipeline with a mock market data port
//! - Backtest and simulation through the CSV adapter
//! - Watchlist and outlook state persistence across adapter instances
//! - Alert scan flow from stored state to flips

mod common;

use common::*;
use cointrend::adapters::csv_adapter::CsvAdapter;
use cointrend::adapters::file_state_adapter::FileStateAdapter;
use cointrend::domain::alerts::scan_outlooks;
use cointrend::domain::backtest::run_backtest;
use cointrend::domain::error::CointrendError;
use cointrend::domain::features::{self, MIN_SIGNAL_BARS};
use cointrend::domain::outlook::{self, Outlook};
use cointrend::domain::risk::RiskProfile;
use cointrend::domain::signal::{self, VolatilityRegime};
use cointrend::domain::simulate::run_simulation;
use cointrend::domain::watchlist::to_pair;
use cointrend::ports::market_data_port::MarketDataPort;
use cointrend::ports::state_port::StatePort;
use std::fmt::Write as _;

mod signal_pipeline {
    use super::*;

    #[test]
    fn rising_series_produces_bullish_signal() {
        let port = MockMarketData::new().with_series("BTCUSDT", drifting_series(100.0, 200, 0.01));

        let series = port.fetch_series("BTCUSDT").unwrap();
        assert!(series.len() >= MIN_SIGNAL_BARS);

        let f = features::extract(series.closes());
        let s = signal::signal_from_features(&f);
        let reading = outlook::classify(s.up_probability);

        assert!(f.momentum > 0.0);
        assert!(s.up_probability > 0.56);
        assert_eq!(reading.outlook, Outlook::Bullish);
    }

    #[test]
    fn flat_series_is_neutral_low_volatility() {
        let series = flat_series(250.0, 200);
        let f = features::extract(series.closes());
        let s = signal::signal_from_features(&f);

        assert_eq!(f.momentum, 0.0);
        assert_eq!(f.volatility, 0.0);
        assert_eq!(s.up_probability, 0.5);
        assert_eq!(s.regime, VolatilityRegime::Low);
        assert_eq!(outlook::classify(s.up_probability).outlook, Outlook::Neutral);
    }

    #[test]
    fn missing_pair_surfaces_market_data_error() {
        let port = MockMarketData::new();
        let err = port.fetch_series("DOGEUSDT").unwrap_err();
        assert!(matches!(err, CointrendError::MarketData { .. }));
    }
}

mod csv_pipeline {
    use super::*;

    fn write_series_csv(dir: &std::path::Path, pair: &str, closes: &[f64]) {
        let mut content = String::from("time_ms,close\n");
        for (i, close) in closes.iter().enumerate() {
            writeln!(content, "{},{}", BASE_TIME_MS + i as i64 * HOUR_MS, close).unwrap();
        }
        std::fs::write(dir.join(format!("{pair}.csv")), content).unwrap();
    }

    #[test]
    fn backtest_through_csv_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let closes: Vec<f64> = (0..200).map(|i| 100.0 * 1.005f64.powi(i)).collect();
        write_series_csv(dir.path(), "ETHUSDT", &closes);

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let series = adapter.fetch_series("ETHUSDT").unwrap();
        assert_eq!(series.len(), 200);

        let result = run_backtest(&series, "ETHUSDT", 150, RiskProfile::Moderate).unwrap();
        assert_eq!(result.bars_tested, 150 - MIN_SIGNAL_BARS - 1);
        assert!(result.buy_hold_return > 0.0);
    }

    #[test]
    fn simulation_through_csv_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let closes: Vec<f64> = (0..300).map(|i| 50.0 * 1.004f64.powi(i)).collect();
        write_series_csv(dir.path(), "SOLUSDT", &closes);

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let series = adapter.fetch_series("SOLUSDT").unwrap();

        let result =
            run_simulation(&series, "SOLUSDT", 240, RiskProfile::Moderate, 10_000.0).unwrap();
        assert!(result.trades > 0);
        assert!((result.final_equity - 10_000.0 * (1.0 + result.pnl_pct)).abs() < 1e-6);
    }

    #[test]
    fn missing_csv_file_is_market_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter.fetch_series("BTCUSDT").unwrap_err();
        assert!(matches!(err, CointrendError::MarketData { .. }));
    }
}

mod state_persistence {
    use super::*;

    #[test]
    fn watchlist_survives_adapter_reconstruction() {
        let dir = tempfile::tempdir().unwrap();

        let writer = FileStateAdapter::new(dir.path());
        writer
            .save_watchlist(&["ADAUSDT".to_string(), "XRPUSDT".to_string()])
            .unwrap();

        let reader = FileStateAdapter::new(dir.path());
        assert_eq!(reader.load_watchlist().unwrap(), vec!["ADAUSDT", "XRPUSDT"]);
    }

    #[test]
    fn fresh_state_dir_yields_default_watchlist() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = FileStateAdapter::new(dir.path());
        assert_eq!(
            adapter.load_watchlist().unwrap(),
            vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]
        );
    }

    #[test]
    fn outlook_state_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let writer = FileStateAdapter::new(dir.path());
        let mut outlooks = std::collections::HashMap::new();
        outlooks.insert("BTCUSDT".to_string(), "bullish".to_string());
        writer.save_outlooks(&outlooks).unwrap();

        let reader = FileStateAdapter::new(dir.path());
        assert_eq!(reader.load_outlooks().unwrap(), outlooks);
    }
}

mod alert_flow {
    use super::*;

    #[test]
    fn signal_evaluation_feeds_alert_scan() {
        let port = MockMarketData::new()
            .with_series("BTCUSDT", drifting_series(100.0, 200, 0.01))
            .with_series("ETHUSDT", flat_series(3_000.0, 200));

        let mut previous = std::collections::HashMap::new();
        previous.insert("BTCUSDT".to_string(), "bearish".to_string());
        previous.insert("ETHUSDT".to_string(), "neutral".to_string());

        let mut observations = Vec::new();
        for symbol in ["BTCUSDT", "ETHUSDT"] {
            let pair = to_pair(symbol);
            let series = port.fetch_series(&pair).unwrap();
            let f = features::extract(series.closes());
            let s = signal::signal_from_features(&f);
            observations.push((pair, s.up_probability));
        }

        let scan = scan_outlooks(&previous, &observations);

        // BTC flips bearish -> bullish; ETH stays neutral
        assert_eq!(scan.flips.len(), 1);
        assert_eq!(scan.flips[0].symbol, "BTCUSDT");
        assert_eq!(scan.flips[0].from_outlook, "bearish");
        assert_eq!(scan.flips[0].to_outlook, "bullish");
        assert_eq!(scan.next_state["ETHUSDT"], "neutral");
    }
}
