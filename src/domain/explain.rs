//! Human-readable signal explanations.
//!
//! Builds the driver, caution and summary strings shown by the live signal view
//! and the explain endpoint. Pure string assembly over already-computed values.

use super::features::Features;
use super::outlook::OutlookReading;
use super::risk::RiskProfile;
use super::signal::{Signal, VolatilityRegime};

#[derive(Debug, Clone)]
pub struct Explanation {
    pub drivers: Vec<String>,
    pub caution: Vec<String>,
    pub summary: String,
}

/// One-line explanation attached to the live trend view.
pub fn signal_explanation(features: &Features, signal: &Signal, profile: RiskProfile) -> String {
    format!(
        "Baseline from hourly closes: momentum={:+.3}, volatility={:.4} ({}). Risk profile={}.",
        features.momentum,
        features.volatility,
        signal.regime.as_str(),
        profile.as_str()
    )
}

pub fn explain(
    features: &Features,
    signal: &Signal,
    reading: &OutlookReading,
    profile: RiskProfile,
) -> Explanation {
    let drivers = vec![
        format!("Momentum score is {:+.3}", features.momentum),
        format!("Volatility regime is {}", signal.regime.as_str()),
        format!(
            "Model up-probability is {:.1}%",
            signal.up_probability * 100.0
        ),
    ];

    let mut caution = vec![
        "Signal is baseline and should be validated with additional factors".to_string(),
        "Crypto volatility can invalidate short-term forecasts quickly".to_string(),
    ];
    if signal.regime == VolatilityRegime::High {
        caution.push("High volatility regime increases whipsaw risk".to_string());
    }
    if profile == RiskProfile::Aggressive {
        caution.push("Aggressive profile takes more entries and larger drawdown risk".to_string());
    }

    let summary = format!(
        "{} setup with {:.1}% confidence under {} risk profile. \
         Primary driver: momentum {:+.3} in {} volatility.",
        capitalize(reading.outlook.as_str()),
        reading.confidence * 100.0,
        profile.as_str(),
        features.momentum,
        signal.regime.as_str()
    );

    Explanation {
        drivers,
        caution,
        summary,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
