//! Concrete adapter implementations for the port traits.

pub mod binance_adapter;
pub mod coinbase_adapter;
pub mod coingecko_adapter;
pub mod csv_adapter;
pub mod fallback_adapter;
pub mod file_config_adapter;
pub mod file_state_adapter;
#[cfg(feature = "web")]
pub mod web;
