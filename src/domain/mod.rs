//! Core domain types and logic.

pub mod alerts;
pub mod backtest;
pub mod error;
pub mod explain;
pub mod features;
pub mod outlook;
pub mod risk;
pub mod series;
pub mod signal;
pub mod simulate;
pub mod universe;
pub mod watchlist;
