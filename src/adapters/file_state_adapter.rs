//! JSON flat-file state adapter.
//!
//! Keeps `watchlist.json` and `alerts_state.json` under a state directory.
//! A missing watchlist file yields the default watchlist; a missing alert
//! state yields an empty map.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::error::CointrendError;
use crate::domain::watchlist;
use crate::ports::state_port::StatePort;

const WATCHLIST_FILE: &str = "watchlist.json";
const ALERTS_FILE: &str = "alerts_state.json";

pub struct FileStateAdapter {
    state_dir: PathBuf,
}

impl FileStateAdapter {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CointrendError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|e| CointrendError::State {
            reason: format!("failed to decode {}: {}", path.display(), e),
        })?;
        Ok(Some(value))
    }

    fn save_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), CointrendError> {
        fs::create_dir_all(&self.state_dir)?;
        let content = serde_json::to_string_pretty(value).map_err(|e| CointrendError::State {
            reason: format!("failed to encode {file}: {e}"),
        })?;
        fs::write(self.state_dir.join(file), content)?;
        Ok(())
    }
}

impl StatePort for FileStateAdapter {
    fn load_watchlist(&self) -> Result<Vec<String>, CointrendError> {
        let stored: Option<Vec<String>> = Self::load_json(&self.state_dir.join(WATCHLIST_FILE))?;
        Ok(match stored {
            Some(symbols) => watchlist::normalize(&symbols),
            None => watchlist::default_watchlist(),
        })
    }

    fn save_watchlist(&self, symbols: &[String]) -> Result<(), CointrendError> {
        let normalized = watchlist::normalize(symbols);
        self.save_json(WATCHLIST_FILE, &normalized)
    }

    fn load_outlooks(&self) -> Result<HashMap<String, String>, CointrendError> {
        Ok(Self::load_json(&self.state_dir.join(ALERTS_FILE))?.unwrap_or_default())
    }

    fn save_outlooks(&self, outlooks: &HashMap<String, String>) -> Result<(), CointrendError> {
        self.save_json(ALERTS_FILE, outlooks)
    }
}
