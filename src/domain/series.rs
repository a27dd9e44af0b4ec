//! Hourly close-price series.
//!
//! Oldest-first, strictly increasing timestamps (epoch milliseconds). The series
//! is never mutated after construction; all derived views are read-only slices.

/// One `(timestamp, close)` observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub time: i64,
    pub close: f64,
}

/// An ordered hourly close series for one trading pair.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    times: Vec<i64>,
    closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut series = Self::new();
        for p in points {
            series.push(p.time, p.close);
        }
        series
    }

    pub fn push(&mut self, time: i64, close: f64) {
        self.times.push(time);
        self.closes.push(close);
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// The last `n` bars as a new series. Returns the whole series when it holds
    /// fewer than `n` bars.
    pub fn tail(&self, n: usize) -> PriceSeries {
        let skip = self.len().saturating_sub(n);
        PriceSeries {
            times: self.times[skip..].to_vec(),
            closes: self.closes[skip..].to_vec(),
        }
    }

    /// All closes available up to and including index `as_of`.
    ///
    /// Every walk-forward step must window its history through this function so
    /// that the decision at `as_of` can never observe a later bar.
    pub fn closes_through(&self, as_of: usize) -> &[f64] {
        &self.closes[..=as_of]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> PriceSeries {
        PriceSeries::from_points((0..5).map(|i| PricePoint {
            time: 1_700_000_000_000 + i * 3_600_000,
            close: 100.0 + i as f64,
        }))
    }

    #[test]
    fn from_points_preserves_order() {
        let s = sample_series();
        assert_eq!(s.len(), 5);
        assert_eq!(s.times()[0], 1_700_000_000_000);
        assert_eq!(s.closes(), &[100.0, 101.0, 102.0, 103.0, 104.0]);
    }

    #[test]
    fn tail_keeps_last_bars() {
        let s = sample_series();
        let t = s.tail(2);
        assert_eq!(t.closes(), &[103.0, 104.0]);
        assert_eq!(t.times()[0], 1_700_000_000_000 + 3 * 3_600_000);
    }

    #[test]
    fn tail_longer_than_series_returns_all() {
        let s = sample_series();
        assert_eq!(s.tail(100).len(), 5);
    }

    #[test]
    fn closes_through_is_inclusive_prefix() {
        let s = sample_series();
        assert_eq!(s.closes_through(0), &[100.0]);
        assert_eq!(s.closes_through(2), &[100.0, 101.0, 102.0]);
        assert_eq!(s.closes_through(4).len(), 5);
    }

    #[test]
    fn empty_series() {
        let s = PriceSeries::new();
        assert!(s.is_empty());
        assert_eq!(s.tail(10).len(), 0);
    }
}
