//! Up-probability model and volatility regime classification.
//!
//! up_probability = clamp(logistic(24*momentum - 8*volatility), 0.05, 0.95)
//!
//! The coefficients and clamp bounds are fixed constants of the heuristic, not
//! configuration. The probability is independent of risk profile; only the
//! downstream entry/exit policy reads profile parameters.

use serde::Serialize;

use super::features::{self, Features};

const MOMENTUM_COEFF: f64 = 24.0;
const VOLATILITY_COEFF: f64 = 8.0;
const PROBABILITY_FLOOR: f64 = 0.05;
const PROBABILITY_CEILING: f64 = 0.95;

/// Regime thresholds on the population std-dev of hourly returns.
const LOW_REGIME_MAX: f64 = 0.008;
const MEDIUM_REGIME_MAX: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    Low,
    Medium,
    High,
}

impl VolatilityRegime {
    pub fn as_str(self) -> &'static str {
        match self {
            VolatilityRegime::Low => "low",
            VolatilityRegime::Medium => "medium",
            VolatilityRegime::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub up_probability: f64,
    pub regime: VolatilityRegime,
}

/// Map features to a clamped directional probability.
pub fn up_probability(momentum: f64, volatility: f64) -> f64 {
    let x = MOMENTUM_COEFF * momentum - VOLATILITY_COEFF * volatility;
    let p = 1.0 / (1.0 + (-x).exp());
    p.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}

/// Bucket realized volatility. Applies to the value produced by
/// [`features::volatility`]; the thresholds assume that exact computation.
pub fn volatility_regime(volatility: f64) -> VolatilityRegime {
    if volatility < LOW_REGIME_MAX {
        VolatilityRegime::Low
    } else if volatility < MEDIUM_REGIME_MAX {
        VolatilityRegime::Medium
    } else {
        VolatilityRegime::High
    }
}

/// Feature extraction plus probability mapping over one close window.
pub fn evaluate(closes: &[f64]) -> Signal {
    let f = features::extract(closes);
    signal_from_features(&f)
}

pub fn signal_from_features(f: &Features) -> Signal {
    Signal {
        up_probability: up_probability(f.momentum, f.volatility),
        regime: volatility_regime(f.volatility),
    }
}
