//! Persisted service state port trait.

use std::collections::HashMap;

use crate::domain::error::CointrendError;

/// Watchlist and alert-outlook persistence between requests and polls.
pub trait StatePort {
    /// The stored watchlist, or the default watchlist when none was saved yet.
    fn load_watchlist(&self) -> Result<Vec<String>, CointrendError>;

    fn save_watchlist(&self, symbols: &[String]) -> Result<(), CointrendError>;

    /// Outlook labels persisted by the previous alert scan, keyed by pair.
    fn load_outlooks(&self) -> Result<HashMap<String, String>, CointrendError>;

    fn save_outlooks(&self, outlooks: &HashMap<String, String>) -> Result<(), CointrendError>;
}
