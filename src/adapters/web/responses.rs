//! Response bodies for the JSON API.

use serde::Serialize;

use crate::domain::alerts::OutlookFlip;
use crate::domain::backtest::EquityPoint;
use crate::domain::outlook::Outlook;
use crate::domain::risk::RiskProfile;
use crate::domain::signal::VolatilityRegime;
use crate::domain::universe::CoinInfo;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub symbol: String,
    pub horizon: &'static str,
    pub risk_profile: RiskProfile,
    pub up_probability: f64,
    pub momentum_score: f64,
    pub volatility_regime: VolatilityRegime,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct BacktestResponse {
    pub symbol: String,
    pub bars_tested: usize,
    pub risk_profile: RiskProfile,
    pub signal_accuracy: f64,
    pub strategy_return: f64,
    pub buy_hold_return: f64,
    pub alpha_vs_buy_hold: f64,
    pub max_drawdown: f64,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
    pub equity_curve: Vec<EquityPoint>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub symbol: String,
    pub risk_profile: RiskProfile,
    pub outlook: Outlook,
    pub confidence: f64,
    pub drivers: Vec<String>,
    pub caution: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct PortfolioSimResponse {
    pub symbol: String,
    pub risk_profile: RiskProfile,
    pub initial_capital: f64,
    pub position_size_pct: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub trades: usize,
    pub win_rate: f64,
    pub final_equity: f64,
    pub pnl_pct: f64,
    pub max_drawdown: f64,
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct WatchlistResponse {
    pub symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AlertsCheckResponse {
    pub risk_profile: RiskProfile,
    pub checked_at: String,
    pub flips: Vec<OutlookFlip>,
}

#[derive(Debug, Serialize)]
pub struct CoinUniverseResponse {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub items: Vec<CoinInfo>,
}
