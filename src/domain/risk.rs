//! Risk profiles and their trading parameters.
//!
//! A profile is a pure configuration selector. All four policy knobs live in one
//! constant table so the entry threshold can never drift from the sizing and
//! exit parameters for the same profile.

use std::str::FromStr;

use serde::Serialize;

use super::error::CointrendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// Per-profile trading parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskParams {
    /// Minimum up-probability required to take a long entry (inclusive).
    pub entry_threshold: f64,
    /// Fraction of current equity put at risk per trade.
    pub position_size_pct: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
}

impl RiskProfile {
    pub const fn params(self) -> RiskParams {
        match self {
            RiskProfile::Conservative => RiskParams {
                entry_threshold: 0.62,
                position_size_pct: 0.15,
                stop_loss_pct: 0.025,
                take_profit_pct: 0.05,
            },
            RiskProfile::Moderate => RiskParams {
                entry_threshold: 0.55,
                position_size_pct: 0.25,
                stop_loss_pct: 0.035,
                take_profit_pct: 0.07,
            },
            RiskProfile::Aggressive => RiskParams {
                entry_threshold: 0.52,
                position_size_pct: 0.35,
                stop_loss_pct: 0.05,
                take_profit_pct: 0.10,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        }
    }
}

impl FromStr for RiskProfile {
    type Err = CointrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(CointrendError::InvalidParameter {
                name: "risk".into(),
                reason: format!(
                    "unknown risk profile {other:?}, expected conservative, moderate or aggressive"
                ),
            }),
        }
    }
}
