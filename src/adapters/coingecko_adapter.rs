//! CoinGecko coin-universe adapter with a JSON file cache.
//!
//! The `/coins/list` endpoint is large and rarely changes, so the cleaned list
//! is cached on disk and served until a refresh is requested. On a refresh
//! failure a non-empty cache is served with a warning; with no cache the
//! error propagates.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::error::CointrendError;
use crate::domain::universe::CoinInfo;
use crate::ports::universe_port::UniversePort;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const CACHE_FILE: &str = "coingecko_universe.json";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Deserialize)]
struct RawCoin {
    id: Option<String>,
    symbol: Option<String>,
    name: Option<String>,
}

pub struct CoingeckoAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    cache_path: PathBuf,
}

impl CoingeckoAdapter {
    pub fn new(
        base_url: impl Into<String>,
        state_dir: impl Into<PathBuf>,
    ) -> Result<Self, CointrendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CointrendError::MarketData {
                symbol: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            cache_path: state_dir.into().join(CACHE_FILE),
        })
    }

    fn load_cache(&self) -> Vec<CoinInfo> {
        let Ok(content) = fs::read_to_string(&self.cache_path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn save_cache(&self, coins: &[CoinInfo]) -> Result<(), CointrendError> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(coins).map_err(|e| CointrendError::State {
            reason: format!("failed to encode universe cache: {e}"),
        })?;
        fs::write(&self.cache_path, content)?;
        Ok(())
    }

    fn fetch_remote(&self) -> Result<Vec<CoinInfo>, CointrendError> {
        let url = format!("{}/coins/list?include_platform=false", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CointrendError::MarketData {
                symbol: "universe".into(),
                reason: format!("coingecko request failed: {e}"),
            })?;

        let raw: Vec<RawCoin> = response.json().map_err(|e| CointrendError::MarketData {
            symbol: "universe".into(),
            reason: format!("coingecko response parse failed: {e}"),
        })?;

        Ok(clean_coins(raw))
    }
}

fn clean_coins(raw: Vec<RawCoin>) -> Vec<CoinInfo> {
    raw.into_iter()
        .filter_map(|c| {
            let id = c.id?.trim().to_string();
            let symbol = c.symbol?.trim().to_lowercase();
            let name = c.name?.trim().to_string();
            if id.is_empty() || symbol.is_empty() || name.is_empty() {
                return None;
            }
            Some(CoinInfo { id, symbol, name })
        })
        .collect()
}

impl UniversePort for CoingeckoAdapter {
    fn fetch_universe(&self, refresh: bool) -> Result<Vec<CoinInfo>, CointrendError> {
        let cached = self.load_cache();
        if !cached.is_empty() && !refresh {
            return Ok(cached);
        }

        match self.fetch_remote() {
            Ok(coins) => {
                self.save_cache(&coins)?;
                Ok(coins)
            }
            Err(e) if !cached.is_empty() => {
                eprintln!("Warning: universe refresh failed ({e}), serving cached list");
                Ok(cached)
            }
            Err(e) => Err(e),
        }
    }
}
