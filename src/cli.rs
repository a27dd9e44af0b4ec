//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::fallback_adapter::FallbackMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_state_adapter::FileStateAdapter;
use crate::domain::backtest;
use crate::domain::error::CointrendError;
use crate::domain::features::{self, MIN_SIGNAL_BARS};
use crate::domain::outlook;
use crate::domain::risk::RiskProfile;
use crate::domain::series::PriceSeries;
use crate::domain::signal;
use crate::domain::simulate;
use crate::domain::watchlist;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::state_port::StatePort;

const DEFAULT_BACKTEST_LOOKBACK: usize = 240;
const DEFAULT_SIM_LOOKBACK: usize = 360;
const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
const DEFAULT_STATE_DIR: &str = "./data";

#[derive(Parser, Debug)]
#[command(name = "cointrend", about = "Crypto trend signal service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current trend signal for a symbol
    Signal {
        symbol: String,
        #[arg(long)]
        risk: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Run a walk-forward backtest for a symbol
    Backtest {
        symbol: String,
        #[arg(long)]
        lookback: Option<usize>,
        #[arg(long)]
        risk: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Simulate discrete stop/target trades for a symbol
    Simulate {
        symbol: String,
        #[arg(long)]
        lookback: Option<usize>,
        #[arg(long)]
        risk: Option<String>,
        #[arg(long)]
        initial_capital: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Manage the stored watchlist
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start the JSON API server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// List watched symbols
    List,
    /// Add a symbol
    Add { symbol: String },
    /// Remove a symbol
    Remove { symbol: String },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Signal {
            symbol,
            risk,
            config,
            csv_dir,
        } => run_signal(&symbol, risk.as_deref(), config.as_ref(), csv_dir),
        Command::Backtest {
            symbol,
            lookback,
            risk,
            config,
            csv_dir,
        } => run_backtest(
            &symbol,
            lookback,
            risk.as_deref(),
            config.as_ref(),
            csv_dir,
        ),
        Command::Simulate {
            symbol,
            lookback,
            risk,
            initial_capital,
            config,
            csv_dir,
        } => run_simulate(
            &symbol,
            lookback,
            risk.as_deref(),
            initial_capital,
            config.as_ref(),
            csv_dir,
        ),
        Command::Watchlist { action, config } => run_watchlist(action, config.as_ref()),
        Command::Serve { config } => run_serve(config.as_ref()),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CointrendError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn parse_risk(risk: Option<&str>) -> Result<RiskProfile, ExitCode> {
    match risk {
        Some(s) => s.parse::<RiskProfile>().map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }),
        None => Ok(RiskProfile::Moderate),
    }
}

fn build_market_data(
    config: &dyn ConfigPort,
    csv_dir: Option<PathBuf>,
) -> Result<Box<dyn MarketDataPort + Send + Sync>, ExitCode> {
    if let Some(dir) = csv_dir {
        return Ok(Box::new(CsvAdapter::new(dir)));
    }
    FallbackMarketData::from_config(config)
        .map(|a| Box::new(a) as Box<dyn MarketDataPort + Send + Sync>)
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })
}

fn state_dir(config: &dyn ConfigPort) -> PathBuf {
    config
        .get_string("state", "dir")
        .unwrap_or_else(|| DEFAULT_STATE_DIR.to_string())
        .into()
}

fn fetch_series(
    market: &dyn MarketDataPort,
    pair: &str,
) -> Result<PriceSeries, ExitCode> {
    eprintln!("Fetching candles for {pair}...");
    let series = market.fetch_series(pair).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    eprintln!("  {} hourly bars", series.len());
    Ok(series)
}

fn run_signal(
    symbol: &str,
    risk: Option<&str>,
    config_path: Option<&PathBuf>,
    csv_dir: Option<PathBuf>,
) -> ExitCode {
    let risk = match parse_risk(risk) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market_data(&config, csv_dir) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let pair = watchlist::to_pair(symbol);
    let series = match fetch_series(market.as_ref(), &pair) {
        Ok(s) => s,
        Err(code) => return code,
    };
    if series.len() < MIN_SIGNAL_BARS {
        let err = CointrendError::InsufficientData {
            symbol: pair,
            bars: series.len(),
            minimum: MIN_SIGNAL_BARS,
        };
        eprintln!("error: {err}");
        return ExitCode::from(&err);
    }

    let f = features::extract(series.closes());
    let s = signal::signal_from_features(&f);
    let reading = outlook::classify(s.up_probability);

    println!("symbol:          {pair}");
    println!("risk profile:    {}", risk.as_str());
    println!("up probability:  {:.4}", s.up_probability);
    println!("momentum score:  {:+.4}", f.momentum);
    println!("volatility:      {:.6} ({})", f.volatility, s.regime.as_str());
    println!(
        "outlook:         {} (confidence {:.2})",
        reading.outlook.as_str(),
        reading.confidence
    );
    ExitCode::SUCCESS
}

fn run_backtest(
    symbol: &str,
    lookback: Option<usize>,
    risk: Option<&str>,
    config_path: Option<&PathBuf>,
    csv_dir: Option<PathBuf>,
) -> ExitCode {
    let risk = match parse_risk(risk) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let lookback = lookback.unwrap_or(DEFAULT_BACKTEST_LOOKBACK);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market_data(&config, csv_dir) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let pair = watchlist::to_pair(symbol);
    let series = match fetch_series(market.as_ref(), &pair) {
        Ok(s) => s,
        Err(code) => return code,
    };

    eprintln!(
        "Running backtest: {pair}, lookback {lookback}, {} profile",
        risk.as_str()
    );
    let result = match backtest::run_backtest(&series, &pair, lookback, risk) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    eprintln!("\n=== Backtest Results ===");
    println!("bars tested:     {}", result.bars_tested);
    println!("signal accuracy: {:.1}%", result.signal_accuracy * 100.0);
    println!("strategy return: {:+.2}%", result.strategy_return * 100.0);
    println!("buy-hold return: {:+.2}%", result.buy_hold_return * 100.0);
    println!("alpha:           {:+.2}%", result.alpha * 100.0);
    println!("max drawdown:    {:.2}%", result.max_drawdown * 100.0);
    ExitCode::SUCCESS
}

fn run_simulate(
    symbol: &str,
    lookback: Option<usize>,
    risk: Option<&str>,
    initial_capital: Option<f64>,
    config_path: Option<&PathBuf>,
    csv_dir: Option<PathBuf>,
) -> ExitCode {
    let risk = match parse_risk(risk) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let lookback = lookback.unwrap_or(DEFAULT_SIM_LOOKBACK);
    let initial_capital = initial_capital.unwrap_or(DEFAULT_INITIAL_CAPITAL);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market_data(&config, csv_dir) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let pair = watchlist::to_pair(symbol);
    let series = match fetch_series(market.as_ref(), &pair) {
        Ok(s) => s,
        Err(code) => return code,
    };

    eprintln!(
        "Simulating trades: {pair}, lookback {lookback}, {} profile",
        risk.as_str()
    );
    let result = match simulate::run_simulation(&series, &pair, lookback, risk, initial_capital) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    eprintln!("\n=== Simulation Results ===");
    println!("trades:          {}", result.trades);
    println!("win rate:        {:.1}%", result.win_rate * 100.0);
    println!("final equity:    {:.2}", result.final_equity);
    println!("pnl:             {:+.2}%", result.pnl_pct * 100.0);
    println!("max drawdown:    {:.2}%", result.max_drawdown * 100.0);

    if !result.trade_log.is_empty() {
        eprintln!("\n=== Trade Log ===");
        for t in &result.trade_log {
            let sign = if t.pnl >= 0.0 { "+" } else { "" };
            eprintln!(
                "  bars {}-{}: entry {:.4}, return {:+.2}%, {}{:.2}",
                t.entry_index,
                t.exit_index,
                t.entry_price,
                t.exit_ret * 100.0,
                sign,
                t.pnl,
            );
        }
    }
    ExitCode::SUCCESS
}

fn run_watchlist(action: WatchlistAction, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let state = FileStateAdapter::new(state_dir(&config));

    let result = match action {
        WatchlistAction::List => state.load_watchlist(),
        WatchlistAction::Add { symbol } => {
            let pair = watchlist::to_pair(&symbol);
            state.load_watchlist().and_then(|mut symbols| {
                if !symbols.contains(&pair) {
                    symbols.push(pair);
                    state.save_watchlist(&symbols)?;
                }
                Ok(symbols)
            })
        }
        WatchlistAction::Remove { symbol } => {
            let pair = watchlist::to_pair(&symbol);
            state.load_watchlist().and_then(|symbols| {
                let kept: Vec<String> = symbols.into_iter().filter(|s| *s != pair).collect();
                state.save_watchlist(&kept)?;
                Ok(kept)
            })
        }
    };

    match result {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_serve(config_path: Option<&PathBuf>) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::coingecko_adapter::{self, CoingeckoAdapter};
        use crate::adapters::web::{AppState, build_router};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let market = match FallbackMarketData::from_config(&config) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        };

        let dir = state_dir(&config);
        let coingecko_url = config
            .get_string("market", "coingecko_url")
            .unwrap_or_else(|| coingecko_adapter::DEFAULT_BASE_URL.to_string());
        let universe = match CoingeckoAdapter::new(coingecko_url, &dir) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        };

        let addr: SocketAddr = config
            .get_string("server", "listen")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:8000".parse().unwrap());

        eprintln!("Starting web server on {addr}");

        let state = AppState {
            market: Arc::new(market),
            state: Arc::new(FileStateAdapter::new(dir)),
            universe: Arc::new(universe),
        };

        let router = build_router(state);

        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async {
                let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
                axum::serve(listener, router).await.unwrap();
            });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
