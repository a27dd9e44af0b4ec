//! Domain error types.

/// Top-level error type for cointrend.
#[derive(Debug, thiserror::Error)]
pub enum CointrendError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("market data fetch failed for {symbol}: {reason}")]
    MarketData { symbol: String, reason: String },

    #[error("state store error: {reason}")]
    State { reason: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CointrendError> for std::process::ExitCode {
    fn from(err: &CointrendError) -> Self {
        let code: u8 = match err {
            CointrendError::Io(_) => 1,
            CointrendError::ConfigParse { .. }
            | CointrendError::ConfigMissing { .. }
            | CointrendError::ConfigInvalid { .. } => 2,
            CointrendError::MarketData { .. } | CointrendError::State { .. } => 3,
            CointrendError::InvalidParameter { .. } => 4,
            CointrendError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message() {
        let err = CointrendError::InsufficientData {
            symbol: "BTCUSDT".into(),
            bars: 40,
            minimum: 60,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for BTCUSDT: have 40 bars, need 60"
        );
    }

    #[test]
    fn invalid_parameter_message() {
        let err = CointrendError::InvalidParameter {
            name: "lookback".into(),
            reason: "must be between 120 and 900".into(),
        };
        assert!(err.to_string().contains("lookback"));
    }

    #[test]
    fn market_data_message_names_symbol() {
        let err = CointrendError::MarketData {
            symbol: "ETHUSDT".into(),
            reason: "timeout".into(),
        };
        assert!(err.to_string().contains("ETHUSDT"));
        assert!(err.to_string().contains("timeout"));
    }
}
