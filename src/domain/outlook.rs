//! Three-way outlook classification of an up-probability.

use serde::Serialize;

const BULLISH_MIN: f64 = 0.56;
const BEARISH_MAX: f64 = 0.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Bullish,
    Neutral,
    Bearish,
}

impl Outlook {
    pub fn as_str(self) -> &'static str {
        match self {
            Outlook::Bullish => "bullish",
            Outlook::Neutral => "neutral",
            Outlook::Bearish => "bearish",
        }
    }
}

/// An outlook label with its distance-from-even-odds confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlookReading {
    pub outlook: Outlook,
    /// `|p - 0.5| * 2`, in [0, 1] since p is clamped to [0.05, 0.95].
    pub confidence: f64,
}

pub fn classify(up_probability: f64) -> OutlookReading {
    let outlook = if up_probability >= BULLISH_MIN {
        Outlook::Bullish
    } else if up_probability <= BEARISH_MAX {
        Outlook::Bearish
    } else {
        Outlook::Neutral
    };
    OutlookReading {
        outlook,
        confidence: (up_probability - 0.5).abs() * 2.0,
    }
}
