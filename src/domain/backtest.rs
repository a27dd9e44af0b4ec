//! Walk-forward backtest of the up-probability signal.
//!
//! Replays the signal bar-by-bar over the lookback window. The decision at step
//! `i` sees only `closes_through(i)`; the outcome is the following bar's return.
//! Strategy equity compounds only on bars where the probability clears the
//! profile's entry threshold, buy-and-hold compounds on every bar.

use serde::Serialize;

use super::error::CointrendError;
use super::features::MIN_SIGNAL_BARS;
use super::risk::RiskProfile;
use super::series::PriceSeries;
use super::signal;

pub const MIN_LOOKBACK: usize = 120;
pub const MAX_LOOKBACK: usize = 900;

/// One point on the dual equity curve, keyed by the outcome bar's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    pub t: i64,
    pub strategy: f64,
    pub buy_hold: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub bars_tested: usize,
    pub signal_accuracy: f64,
    pub strategy_return: f64,
    pub buy_hold_return: f64,
    pub alpha: f64,
    pub max_drawdown: f64,
    pub equity_curve: Vec<EquityPoint>,
    /// Timestamp of the first decision bar (epoch ms).
    pub start_time: i64,
    /// Timestamp of the last bar in the window (epoch ms).
    pub end_time: i64,
}

pub fn validate_lookback(lookback: usize) -> Result<(), CointrendError> {
    if !(MIN_LOOKBACK..=MAX_LOOKBACK).contains(&lookback) {
        return Err(CointrendError::InvalidParameter {
            name: "lookback".into(),
            reason: format!("must be between {MIN_LOOKBACK} and {MAX_LOOKBACK}, got {lookback}"),
        });
    }
    Ok(())
}

pub fn run_backtest(
    series: &PriceSeries,
    symbol: &str,
    lookback: usize,
    profile: RiskProfile,
) -> Result<BacktestResult, CointrendError> {
    validate_lookback(lookback)?;

    if series.len() < lookback {
        return Err(CointrendError::InsufficientData {
            symbol: symbol.to_string(),
            bars: series.len(),
            minimum: lookback,
        });
    }

    let window = series.tail(lookback);
    let closes = window.closes();
    let times = window.times();
    let len = closes.len();

    let entry_threshold = profile.params().entry_threshold;

    let mut correct = 0usize;
    let mut total = 0usize;
    let mut equity = 1.0_f64;
    let mut buy_hold = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_drawdown = 0.0_f64;
    let mut curve = Vec::with_capacity(len.saturating_sub(MIN_SIGNAL_BARS + 1));

    for i in MIN_SIGNAL_BARS..len - 1 {
        let s = signal::evaluate(window.closes_through(i));

        let next_ret = closes[i + 1] / closes[i] - 1.0;
        let predicted_up = s.up_probability >= 0.5;
        let actual_up = next_ret >= 0.0;
        if predicted_up == actual_up {
            correct += 1;
        }
        total += 1;

        if s.up_probability >= entry_threshold {
            equity *= 1.0 + next_ret;
        }
        buy_hold *= 1.0 + next_ret;

        peak = peak.max(equity);
        max_drawdown = max_drawdown.min(equity / peak - 1.0);

        curve.push(EquityPoint {
            t: times[i + 1],
            strategy: equity,
            buy_hold,
        });
    }

    if total == 0 {
        return Err(CointrendError::InsufficientData {
            symbol: symbol.to_string(),
            bars: len,
            minimum: MIN_SIGNAL_BARS + 2,
        });
    }

    let strategy_return = equity - 1.0;
    let buy_hold_return = buy_hold - 1.0;

    Ok(BacktestResult {
        bars_tested: total,
        signal_accuracy: correct as f64 / total as f64,
        strategy_return,
        buy_hold_return,
        alpha: strategy_return - buy_hold_return,
        max_drawdown,
        equity_curve: curve,
        start_time: times[MIN_SIGNAL_BARS],
        end_time: times[len - 1],
    })
}
