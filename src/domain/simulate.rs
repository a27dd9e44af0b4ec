//! Discrete trade simulation driven by the up-probability signal.
//!
//! Single forward pass with an explicit cursor. Each entry risks a profile-sized
//! slice of current equity and is closed by the first stop-loss or take-profit
//! touch within a 24-bar horizon, or by a time exit at the horizon's end. Trades
//! never overlap: the cursor resumes after the exit bar.

use serde::Serialize;

use super::backtest::validate_lookback;
use super::error::CointrendError;
use super::features::MIN_SIGNAL_BARS;
use super::risk::RiskProfile;
use super::series::PriceSeries;
use super::signal;

/// Maximum bars a position may be held before the time-based exit.
pub const EXIT_HORIZON_BARS: usize = 24;

/// One closed trade from a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulatedTrade {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    /// Realized return: exactly `-stop_loss_pct` or `+take_profit_pct` on a
    /// triggered exit, the actual unclamped return on a time exit.
    pub exit_ret: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone)]
pub struct TradeSimResult {
    pub trades: usize,
    pub win_rate: f64,
    pub final_equity: f64,
    pub pnl_pct: f64,
    pub max_drawdown: f64,
    pub trade_log: Vec<SimulatedTrade>,
}

pub fn run_simulation(
    series: &PriceSeries,
    symbol: &str,
    lookback: usize,
    profile: RiskProfile,
    initial_capital: f64,
) -> Result<TradeSimResult, CointrendError> {
    validate_lookback(lookback)?;

    if initial_capital <= 0.0 {
        return Err(CointrendError::InvalidParameter {
            name: "initial_capital".into(),
            reason: format!("must be positive, got {initial_capital}"),
        });
    }

    if series.len() < lookback {
        return Err(CointrendError::InsufficientData {
            symbol: symbol.to_string(),
            bars: series.len(),
            minimum: lookback,
        });
    }

    let window = series.tail(lookback);
    let closes = window.closes();
    let len = closes.len();
    let params = profile.params();

    let mut equity = initial_capital;
    let mut peak = equity;
    let mut max_drawdown = 0.0_f64;
    let mut wins = 0usize;
    let mut trade_log = Vec::new();

    let mut i = MIN_SIGNAL_BARS;
    while i < len - 2 {
        let s = signal::evaluate(window.closes_through(i));
        if s.up_probability < params.entry_threshold {
            i += 1;
            continue;
        }

        let entry_price = closes[i];
        let capital_at_risk = equity * params.position_size_pct;

        let horizon_end = (i + EXIT_HORIZON_BARS).min(len - 1);
        let mut exit_index = horizon_end;
        let mut exit_ret = None;
        for j in i + 1..=horizon_end {
            let ret = closes[j] / entry_price - 1.0;
            if ret <= -params.stop_loss_pct {
                exit_index = j;
                exit_ret = Some(-params.stop_loss_pct);
                break;
            }
            if ret >= params.take_profit_pct {
                exit_index = j;
                exit_ret = Some(params.take_profit_pct);
                break;
            }
        }
        // neither trigger hit within the horizon: exit at the actual return
        let exit_ret = exit_ret.unwrap_or(closes[exit_index] / entry_price - 1.0);

        let pnl = capital_at_risk * exit_ret;
        equity += pnl;
        if pnl > 0.0 {
            wins += 1;
        }

        peak = peak.max(equity);
        max_drawdown = max_drawdown.min(equity / peak - 1.0);

        trade_log.push(SimulatedTrade {
            entry_index: i,
            exit_index,
            entry_price,
            exit_ret,
            pnl,
        });

        i = exit_index + 1;
    }

    let trades = trade_log.len();
    let win_rate = if trades > 0 {
        wins as f64 / trades as f64
    } else {
        0.0
    };

    Ok(TradeSimResult {
        trades,
        win_rate,
        final_equity: equity,
        pnl_pct: equity / initial_capital - 1.0,
        max_drawdown,
        trade_log,
    })
}
