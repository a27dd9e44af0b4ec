//! Coin universe access port trait.

use crate::domain::error::CointrendError;
use crate::domain::universe::CoinInfo;

/// Supplies the tradable-coin universe.
pub trait UniversePort {
    /// The full coin list. With `refresh` false a cached copy may be served;
    /// with `refresh` true the upstream source is consulted first.
    fn fetch_universe(&self, refresh: bool) -> Result<Vec<CoinInfo>, CointrendError>;
}
