//! JSON API adapter.
//!
//! Axum router exposing the signal, backtest, simulation, watchlist, universe
//! and alert endpoints over the port traits in [`crate::ports`].

mod error;
mod handlers;
mod responses;

pub use error::ApiError;
pub use responses::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::ports::market_data_port::MarketDataPort;
use crate::ports::state_port::StatePort;
use crate::ports::universe_port::UniversePort;

pub struct AppState {
    pub market: Arc<dyn MarketDataPort + Send + Sync>,
    pub state: Arc<dyn StatePort + Send + Sync>,
    pub universe: Arc<dyn UniversePort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/trends/{symbol}", get(handlers::trend))
        .route("/v1/trends", get(handlers::trend_batch))
        .route("/v1/backtest/{symbol}", get(handlers::backtest))
        .route("/v1/backtest", get(handlers::backtest_batch))
        .route("/v1/explain/{symbol}", get(handlers::explain))
        .route(
            "/v1/portfolio/simulate/{symbol}",
            get(handlers::portfolio_simulate),
        )
        .route("/v1/watchlist", get(handlers::get_watchlist))
        .route(
            "/v1/watchlist/{symbol}",
            post(handlers::add_watchlist).delete(handlers::remove_watchlist),
        )
        .route(
            "/v1/watchlist/import/coingecko",
            post(handlers::import_watchlist),
        )
        .route("/v1/universe/coingecko", get(handlers::universe))
        .route("/v1/alerts/check", get(handlers::alerts_check))
        .with_state(Arc::new(state))
}
