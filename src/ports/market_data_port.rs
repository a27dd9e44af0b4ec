//! Market data access port trait.

use crate::domain::error::CointrendError;
use crate::domain::series::PriceSeries;

/// Supplies hourly close series for exchange pairs, oldest-first.
pub trait MarketDataPort {
    fn fetch_series(&self, pair: &str) -> Result<PriceSeries, CointrendError>;
}
