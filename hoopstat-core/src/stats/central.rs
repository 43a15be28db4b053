//! Central tendency calculator: mean and population standard deviation.

use serde::{Deserialize, Serialize};

use crate::domain::{GameRecord, MetricSeries, PerMetric};
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralTendency {
    pub mean: f64,
    /// Population standard deviation (divides by N).
    pub std_dev: f64,
}

impl CentralTendency {
    pub fn from_series(series: &MetricSeries) -> Result<Self, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::no_data());
        }
        let values = series.as_f64();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Coefficient of variation in percent. Zero when the mean is zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            100.0 * self.std_dev / self.mean
        }
    }
}

/// Mean and standard deviation per metric, plus the sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralTendencyResult {
    pub games_played: usize,
    pub metrics: PerMetric<CentralTendency>,
}

pub fn compute_central_tendency(records: &[GameRecord]) -> Result<CentralTendencyResult, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::no_data());
    }
    let metrics = PerMetric::try_from_fn(|metric| {
        CentralTendency::from_series(&MetricSeries::extract(records, metric))
    })?;
    Ok(CentralTendencyResult {
        games_played: records.len(),
        metrics,
    })
}
