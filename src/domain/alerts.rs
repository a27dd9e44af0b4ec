//! Outlook-flip detection between polls.
//!
//! Pure diff over the persisted `symbol → outlook label` map and a fresh batch
//! of probability observations. Loading and storing the map is the state
//! adapter's concern; nothing here touches a store.

use std::collections::HashMap;

use serde::Serialize;

use super::outlook;

/// A symbol whose outlook label changed since the previous poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlookFlip {
    pub symbol: String,
    pub from_outlook: String,
    pub to_outlook: String,
    pub up_probability: f64,
}

#[derive(Debug, Clone)]
pub struct AlertScan {
    pub flips: Vec<OutlookFlip>,
    /// Full label map to persist for the next poll.
    pub next_state: HashMap<String, String>,
}

/// Classify each observation and diff against the previously stored labels.
///
/// A flip is reported only when the symbol had a stored label and it differs
/// from the new one; first-seen symbols just seed the next state.
pub fn scan_outlooks(
    previous: &HashMap<String, String>,
    observations: &[(String, f64)],
) -> AlertScan {
    let mut flips = Vec::new();
    let mut next_state = HashMap::with_capacity(observations.len());

    for (symbol, up_probability) in observations {
        let now = outlook::classify(*up_probability).outlook.as_str();
        if let Some(old) = previous.get(symbol) {
            if old != now {
                flips.push(OutlookFlip {
                    symbol: symbol.clone(),
                    from_outlook: old.clone(),
                    to_outlook: now.to_string(),
                    up_probability: *up_probability,
                });
            }
        }
        next_state.insert(symbol.clone(), now.to_string());
    }

    AlertScan { flips, next_state }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reports_flip_when_label_changes() {
        let previous = prev(&[("BTCUSDT", "neutral")]);
        let scan = scan_outlooks(&previous, &[("BTCUSDT".into(), 0.70)]);
        assert_eq!(scan.flips.len(), 1);
        let flip = &scan.flips[0];
        assert_eq!(flip.from_outlook, "neutral");
        assert_eq!(flip.to_outlook, "bullish");
        assert_eq!(flip.up_probability, 0.70);
    }

    #[test]
    fn unchanged_label_is_not_a_flip() {
        let previous = prev(&[("BTCUSDT", "bullish")]);
        let scan = scan_outlooks(&previous, &[("BTCUSDT".into(), 0.60)]);
        assert!(scan.flips.is_empty());
    }

    #[test]
    fn first_observation_seeds_state_without_flip() {
        let scan = scan_outlooks(&HashMap::new(), &[("ETHUSDT".into(), 0.40)]);
        assert!(scan.flips.is_empty());
        assert_eq!(scan.next_state["ETHUSDT"], "bearish");
    }

    #[test]
    fn next_state_covers_all_observations() {
        let previous = prev(&[("BTCUSDT", "bullish"), ("SOLUSDT", "bearish")]);
        let scan = scan_outlooks(
            &previous,
            &[
                ("BTCUSDT".into(), 0.50),
                ("ETHUSDT".into(), 0.60),
                ("SOLUSDT".into(), 0.30),
            ],
        );
        assert_eq!(scan.next_state.len(), 3);
        assert_eq!(scan.next_state["BTCUSDT"], "neutral");
        assert_eq!(scan.next_state["ETHUSDT"], "bullish");
        assert_eq!(scan.next_state["SOLUSDT"], "bearish");
        // BTC flipped, SOL did not
        assert_eq!(scan.flips.len(), 1);
        assert_eq!(scan.flips[0].symbol, "BTCUSDT");
    }

    #[test]
    fn dropped_symbols_leave_the_state() {
        let previous = prev(&[("BTCUSDT", "bullish"), ("DOGEUSDT", "neutral")]);
        let scan = scan_outlooks(&previous, &[("BTCUSDT".into(), 0.60)]);
        assert!(!scan.next_state.contains_key("DOGEUSDT"));
    }
}
