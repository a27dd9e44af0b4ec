//! HTTP request handlers for the JSON API.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::SystemTime;

use crate::domain::alerts;
use crate::domain::backtest::{self, EquityPoint};
use crate::domain::error::CointrendError;
use crate::domain::explain as explain_domain;
use crate::domain::features::{self, Features, MIN_SIGNAL_BARS};
use crate::domain::outlook;
use crate::domain::risk::RiskProfile;
use crate::domain::signal::{self, Signal};
use crate::domain::simulate;
use crate::domain::universe;
use crate::domain::watchlist;

use super::{
    AlertsCheckResponse, ApiError, AppState, BacktestResponse, CoinUniverseResponse,
    ExplainResponse, HealthResponse, PortfolioSimResponse, TrendResponse, WatchlistResponse,
};

const SERVICE_NAME: &str = "cointrend";
const DEFAULT_BACKTEST_LOOKBACK: usize = 240;
const DEFAULT_SIM_LOOKBACK: usize = 360;
const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
const DEFAULT_BATCH_SYMBOLS: &str = "BTC,ETH,SOL";
const DEFAULT_MAX_ALERT_SYMBOLS: usize = 200;
const DEFAULT_UNIVERSE_LIMIT: usize = 200;

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn format_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

fn parse_risk(risk: Option<&str>) -> Result<RiskProfile, ApiError> {
    match risk {
        Some(s) => s.parse::<RiskProfile>().map_err(ApiError::from),
        None => Ok(RiskProfile::Moderate),
    }
}

/// Fetch the pair's series and evaluate features and signal on the full
/// returned window. Shared by the trend, explain and alert paths.
fn evaluate_pair(
    state: &AppState,
    pair: &str,
) -> Result<(Features, Signal), CointrendError> {
    let series = state.market.fetch_series(pair)?;
    if series.len() < MIN_SIGNAL_BARS {
        return Err(CointrendError::InsufficientData {
            symbol: pair.to_string(),
            bars: series.len(),
            minimum: MIN_SIGNAL_BARS,
        });
    }
    let f = features::extract(series.closes());
    let s = signal::signal_from_features(&f);
    Ok((f, s))
}

fn trend_for(state: &AppState, symbol: &str, risk: RiskProfile) -> Result<TrendResponse, ApiError> {
    let pair = watchlist::to_pair(symbol);
    let (f, s) = evaluate_pair(state, &pair)?;
    Ok(TrendResponse {
        symbol: pair,
        horizon: "24h",
        risk_profile: risk,
        up_probability: round4(s.up_probability),
        momentum_score: round4(f.momentum),
        volatility_regime: s.regime,
        explanation: explain_domain::signal_explanation(&f, &s, risk),
    })
}

fn split_symbols(symbols: &str) -> impl Iterator<Item = &str> {
    symbols.split(',').map(str::trim).filter(|s| !s.is_empty())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
    })
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub risk: Option<String>,
}

pub async fn trend(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    Ok(Json(trend_for(&state, &symbol, risk)?))
}

#[derive(Debug, Deserialize)]
pub struct TrendBatchQuery {
    pub symbols: Option<String>,
    pub risk: Option<String>,
}

pub async fn trend_batch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendBatchQuery>,
) -> Result<Json<Vec<TrendResponse>>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let symbols = query
        .symbols
        .unwrap_or_else(|| DEFAULT_BATCH_SYMBOLS.to_string());

    // failing symbols are skipped, not fatal to the batch
    let mut out = Vec::new();
    for symbol in split_symbols(&symbols) {
        if let Ok(t) = trend_for(&state, symbol, risk) {
            out.push(t);
        }
    }
    Ok(Json(out))
}

#[derive(Debug, Deserialize)]
pub struct BacktestQuery {
    pub lookback: Option<usize>,
    pub risk: Option<String>,
}

fn backtest_for(
    state: &AppState,
    symbol: &str,
    lookback: usize,
    risk: RiskProfile,
) -> Result<BacktestResponse, ApiError> {
    let pair = watchlist::to_pair(symbol);
    let series = state.market.fetch_series(&pair)?;
    let result = backtest::run_backtest(&series, &pair, lookback, risk)?;

    let entry_threshold = risk.params().entry_threshold;
    Ok(BacktestResponse {
        symbol: pair,
        bars_tested: result.bars_tested,
        risk_profile: risk,
        signal_accuracy: round4(result.signal_accuracy),
        strategy_return: round4(result.strategy_return),
        buy_hold_return: round4(result.buy_hold_return),
        alpha_vs_buy_hold: round4(result.alpha),
        max_drawdown: round4(result.max_drawdown),
        notes: format!(
            "Baseline heuristic backtest with {} threshold={entry_threshold:.2}.",
            risk.as_str()
        ),
        start_time: format_ms(result.start_time),
        end_time: format_ms(result.end_time),
        equity_curve: result
            .equity_curve
            .into_iter()
            .map(|p| EquityPoint {
                t: p.t,
                strategy: round6(p.strategy),
                buy_hold: round6(p.buy_hold),
            })
            .collect(),
    })
}

pub async fn backtest(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<BacktestQuery>,
) -> Result<Json<BacktestResponse>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let lookback = query.lookback.unwrap_or(DEFAULT_BACKTEST_LOOKBACK);
    Ok(Json(backtest_for(&state, &symbol, lookback, risk)?))
}

#[derive(Debug, Deserialize)]
pub struct BacktestBatchQuery {
    pub symbols: Option<String>,
    pub lookback: Option<usize>,
    pub risk: Option<String>,
}

pub async fn backtest_batch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BacktestBatchQuery>,
) -> Result<Json<Vec<BacktestResponse>>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let lookback = query.lookback.unwrap_or(DEFAULT_BACKTEST_LOOKBACK);
    backtest::validate_lookback(lookback)?;
    let symbols = query
        .symbols
        .unwrap_or_else(|| DEFAULT_BATCH_SYMBOLS.to_string());

    let mut out = Vec::new();
    for symbol in split_symbols(&symbols) {
        if let Ok(b) = backtest_for(&state, symbol, lookback, risk) {
            out.push(b);
        }
    }
    Ok(Json(out))
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub risk: Option<String>,
}

pub async fn explain(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<ExplainQuery>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let pair = watchlist::to_pair(&symbol);
    let (f, s) = evaluate_pair(&state, &pair)?;
    // classify the same 4-decimal probability the trend view reports
    let reading = outlook::classify(round4(s.up_probability));
    let explanation = explain_domain::explain(&f, &s, &reading, risk);

    Ok(Json(ExplainResponse {
        symbol: pair,
        risk_profile: risk,
        outlook: reading.outlook,
        confidence: round4(reading.confidence),
        drivers: explanation.drivers,
        caution: explanation.caution,
        summary: explanation.summary,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    pub lookback: Option<usize>,
    pub risk: Option<String>,
    pub initial_capital: Option<f64>,
}

pub async fn portfolio_simulate(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<PortfolioSimResponse>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let lookback = query.lookback.unwrap_or(DEFAULT_SIM_LOOKBACK);
    let initial_capital = query.initial_capital.unwrap_or(DEFAULT_INITIAL_CAPITAL);

    let pair = watchlist::to_pair(&symbol);
    let series = state.market.fetch_series(&pair)?;
    let result = simulate::run_simulation(&series, &pair, lookback, risk, initial_capital)?;

    let params = risk.params();
    Ok(Json(PortfolioSimResponse {
        symbol: pair,
        risk_profile: risk,
        initial_capital: round2(initial_capital),
        position_size_pct: round4(params.position_size_pct),
        stop_loss_pct: round4(params.stop_loss_pct),
        take_profit_pct: round4(params.take_profit_pct),
        trades: result.trades,
        win_rate: round4(result.win_rate),
        final_equity: round2(result.final_equity),
        pnl_pct: round4(result.pnl_pct),
        max_drawdown: round4(result.max_drawdown),
        notes: "Simple long-only simulation with risk-based sizing and stop/take exits.".to_string(),
    }))
}

pub async fn get_watchlist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    Ok(Json(WatchlistResponse {
        symbols: state.state.load_watchlist()?,
    }))
}

pub async fn add_watchlist(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    let pair = watchlist::to_pair(&symbol);
    let mut current = state.state.load_watchlist()?;
    if !current.contains(&pair) {
        current.push(pair);
        state.state.save_watchlist(&current)?;
    }
    Ok(Json(WatchlistResponse { symbols: current }))
}

pub async fn remove_watchlist(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    let pair = watchlist::to_pair(&symbol);
    let current: Vec<String> = state
        .state
        .load_watchlist()?
        .into_iter()
        .filter(|s| *s != pair)
        .collect();
    state.state.save_watchlist(&current)?;
    Ok(Json(WatchlistResponse { symbols: current }))
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub refresh: Option<bool>,
}

pub async fn import_watchlist(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImportQuery>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    let coins = state.universe.fetch_universe(query.refresh.unwrap_or(false))?;
    let symbols: Vec<String> = coins.iter().map(|c| watchlist::to_pair(&c.symbol)).collect();
    state.state.save_watchlist(&symbols)?;
    Ok(Json(WatchlistResponse {
        symbols: state.state.load_watchlist()?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UniverseQuery {
    pub search: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub refresh: Option<bool>,
}

pub async fn universe(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UniverseQuery>,
) -> Result<Json<CoinUniverseResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_UNIVERSE_LIMIT);
    universe::validate_limit(limit)?;

    let coins = state.universe.fetch_universe(query.refresh.unwrap_or(false))?;
    let page = universe::filter_universe(
        &coins,
        query.search.as_deref().unwrap_or(""),
        query.offset.unwrap_or(0),
        limit,
    );

    Ok(Json(CoinUniverseResponse {
        total: page.total,
        offset: page.offset,
        limit: page.limit,
        items: page.items,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub risk: Option<String>,
    pub max_symbols: Option<usize>,
}

pub async fn alerts_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<AlertsCheckResponse>, ApiError> {
    let risk = parse_risk(query.risk.as_deref())?;
    let max_symbols = query.max_symbols.unwrap_or(DEFAULT_MAX_ALERT_SYMBOLS);
    if max_symbols == 0 || max_symbols > 2000 {
        return Err(ApiError::bad_request(format!(
            "invalid parameter max_symbols: must be between 1 and 2000, got {max_symbols}"
        )));
    }

    let symbols = state.state.load_watchlist()?;
    let previous = state.state.load_outlooks()?;

    // unreachable symbols are skipped; their stored label is dropped with them
    let mut observations = Vec::new();
    for pair in symbols.iter().take(max_symbols) {
        if let Ok((_, s)) = evaluate_pair(&state, pair) {
            observations.push((pair.clone(), round4(s.up_probability)));
        }
    }

    let scan = alerts::scan_outlooks(&previous, &observations);
    state.state.save_outlooks(&scan.next_state)?;

    Ok(Json(AlertsCheckResponse {
        risk_profile: risk,
        checked_at: DateTime::<Utc>::from(SystemTime::now()).to_rfc3339(),
        flips: scan.flips,
    }))
}
