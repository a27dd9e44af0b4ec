//! Momentum and volatility features over a close series.
//!
//! momentum = 0.65 * (C[n-1]/C[n-12] - 1) + 0.35 * (C[n-1]/C[n-48] - 1)
//! volatility = population std-dev of single-bar returns over the whole slice
//!
//! Volatility deliberately uses the entire supplied window rather than a fixed
//! trailing slice: in a walk-forward replay each step sees all history available
//! at that point, and backtest numbers depend on that exact behavior.

/// Minimum bars required before a signal may be evaluated.
pub const MIN_SIGNAL_BARS: usize = 60;

const SHORT_HORIZON: usize = 12;
const MEDIUM_HORIZON: usize = 48;
const SHORT_WEIGHT: f64 = 0.65;
const MEDIUM_WEIGHT: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub momentum: f64,
    pub volatility: f64,
}

/// Weighted blend of the 12-bar and 48-bar simple returns.
///
/// Callers must supply at least [`MIN_SIGNAL_BARS`] closes; the 48-bar leg reads
/// `closes[n - 48]`.
pub fn momentum_score(closes: &[f64]) -> f64 {
    let n = closes.len();
    let last = closes[n - 1];
    let short_ret = last / closes[n - SHORT_HORIZON] - 1.0;
    let medium_ret = last / closes[n - MEDIUM_HORIZON] - 1.0;
    SHORT_WEIGHT * short_ret + MEDIUM_WEIGHT * medium_ret
}

/// Population standard deviation of consecutive single-bar returns.
///
/// Total over any slice: fewer than two closes yields 0.
pub fn volatility(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

pub fn extract(closes: &[f64]) -> Features {
    Features {
        momentum: momentum_score(closes),
        volatility: volatility(closes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(n: usize) -> Vec<f64> {
        vec![100.0; n]
    }

    fn rising(n: usize, step_pct: f64) -> Vec<f64> {
        let mut closes = Vec::with_capacity(n);
        let mut price = 100.0;
        for _ in 0..n {
            closes.push(price);
            price *= 1.0 + step_pct;
        }
        closes
    }

    #[test]
    fn flat_series_has_zero_features() {
        let f = extract(&flat(60));
        assert_relative_eq!(f.momentum, 0.0);
        assert_relative_eq!(f.volatility, 0.0);
    }

    #[test]
    fn momentum_blend_weights() {
        // last = c[n-1], short leg over 11 steps, medium leg over 47 steps
        let closes = rising(60, 0.01);
        let n = closes.len();
        let expected = 0.65 * (closes[n - 1] / closes[n - 12] - 1.0)
            + 0.35 * (closes[n - 1] / closes[n - 48] - 1.0);
        assert_relative_eq!(momentum_score(&closes), expected);
    }

    #[test]
    fn momentum_positive_on_rising_series() {
        assert!(momentum_score(&rising(60, 0.01)) > 0.0);
    }

    #[test]
    fn momentum_negative_on_falling_series() {
        assert!(momentum_score(&rising(60, -0.01)) < 0.0);
    }

    #[test]
    fn volatility_of_constant_growth_is_zero() {
        // identical per-bar returns have zero dispersion
        let v = volatility(&rising(60, 0.01));
        assert_relative_eq!(v, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn volatility_short_slices() {
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[100.0]), 0.0);
        assert!(volatility(&[100.0, 101.0]) >= 0.0);
    }

    #[test]
    fn volatility_population_formula() {
        // returns: +10%, -10%/1.1 → hand-computed population std-dev
        let closes = [100.0, 110.0, 100.0];
        let r1: f64 = 0.10;
        let r2 = 100.0 / 110.0 - 1.0;
        let mean = (r1 + r2) / 2.0;
        let expected = (((r1 - mean).powi(2) + (r2 - mean).powi(2)) / 2.0).sqrt();
        assert_relative_eq!(volatility(&closes), expected);
    }

    #[test]
    fn volatility_grows_with_dispersion() {
        let calm = [100.0, 100.1, 100.0, 100.1, 100.0];
        let wild = [100.0, 105.0, 98.0, 106.0, 97.0];
        assert!(volatility(&wild) > volatility(&calm));
    }
}
