//! Percentile calculator.
//!
//! Linear interpolation between order statistics: for N sorted values the
//! p-th percentile sits at zero-based position `p / 100 × (N − 1)`. A
//! fractional position interpolates between the two bracketing values, so
//! the 100th percentile is always the maximum.

use serde::{Deserialize, Serialize};

use crate::domain::{GameRecord, MetricSeries, PerMetric};
use crate::error::AnalysisError;

/// Percentile `p` (0–100) of an ascending slice. `None` when empty.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let position = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    let frac = position - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// The four reported percentiles of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p100: f64,
}

impl PercentileSet {
    pub fn from_series(series: &MetricSeries) -> Result<Self, AnalysisError> {
        let sorted = series.sorted();
        let at = |p: f64| percentile(&sorted, p).ok_or_else(AnalysisError::no_data);
        Ok(Self {
            p25: at(25.0)?,
            p50: at(50.0)?,
            p75: at(75.0)?,
            p100: at(100.0)?,
        })
    }

    /// Interquartile range, p75 − p25.
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }

    /// How far the best game sits above a typical good game (p100 / p75).
    /// Zero when p75 is zero.
    pub fn ceiling_ratio(&self) -> f64 {
        if self.p75 == 0.0 {
            0.0
        } else {
            self.p100 / self.p75
        }
    }

    /// `(label, value)` pairs in reporting order.
    pub fn labeled(&self) -> [(&'static str, f64); 4] {
        [
            ("25th", self.p25),
            ("50th", self.p50),
            ("75th", self.p75),
            ("Max", self.p100),
        ]
    }
}

/// Percentiles of every metric across `records`. Empty input is `NoData`.
pub fn compute_percentiles(records: &[GameRecord]) -> Result<PerMetric<PercentileSet>, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::no_data());
    }
    PerMetric::try_from_fn(|metric| PercentileSet::from_series(&MetricSeries::extract(records, metric)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u32]) -> PercentileSet {
        PercentileSet::from_series(&MetricSeries::new(values.to_vec())).unwrap()
    }

    #[test]
    fn test_exact_order_statistics() {
        let s = set(&[10, 20, 30, 40, 50]);
        assert_eq!((s.p25, s.p50, s.p75, s.p100), (20.0, 30.0, 40.0, 50.0));
    }

    #[test]
    fn test_two_values_interpolate() {
        let s = set(&[15, 5]);
        assert_eq!((s.p25, s.p50, s.p75, s.p100), (7.5, 10.0, 12.5, 15.0));
    }

    #[test]
    fn test_single_value() {
        let s = set(&[42]);
        assert_eq!((s.p25, s.p50, s.p75, s.p100), (42.0, 42.0, 42.0, 42.0));
        assert_eq!(s.iqr(), 0.0);
    }

    #[test]
    fn test_unsorted_input_four_values() {
        // sorted [1, 2, 3, 10]: positions 0.75, 1.5, 2.25, 3
        let s = set(&[10, 1, 3, 2]);
        assert!((s.p25 - 1.75).abs() < 1e-12);
        assert!((s.p50 - 2.5).abs() < 1e-12);
        assert!((s.p75 - 4.75).abs() < 1e-12);
        assert_eq!(s.p100, 10.0);
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(PercentileSet::from_series(&MetricSeries::new(vec![]))
            .unwrap_err()
            .is_no_data());
        assert!(compute_percentiles(&[]).unwrap_err().is_no_data());
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_ceiling_ratio_and_labels() {
        let s = set(&[0, 0, 0, 0, 8]);
        assert_eq!(s.ceiling_ratio(), 0.0);
        let t = set(&[10, 20, 30, 40, 50]);
        assert_eq!(t.ceiling_ratio(), 1.25);
        assert_eq!(t.labeled()[3], ("Max", 50.0));
    }
}
