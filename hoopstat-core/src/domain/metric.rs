//! The five box-score metrics and per-metric containers.
//!
//! Results carry one named field per metric instead of string-keyed maps, so a
//! misspelled metric name is a compile error rather than a missing key.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::game::GameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Points,
    Rebounds,
    Assists,
    Blocks,
    Steals,
}

impl Metric {
    /// Fixed rendering and reporting order.
    pub const ALL: [Metric; 5] = [
        Metric::Points,
        Metric::Rebounds,
        Metric::Assists,
        Metric::Blocks,
        Metric::Steals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Points => "Points",
            Metric::Rebounds => "Rebounds",
            Metric::Assists => "Assists",
            Metric::Blocks => "Blocks",
            Metric::Steals => "Steals",
        }
    }

    /// Column name in the provider's game log table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Points => "PTS",
            Metric::Rebounds => "REB",
            Metric::Assists => "AST",
            Metric::Blocks => "BLK",
            Metric::Steals => "STL",
        }
    }

    pub fn value_of(&self, record: &GameRecord) -> u32 {
        match self {
            Metric::Points => record.points,
            Metric::Rebounds => record.rebounds,
            Metric::Assists => record.assists,
            Metric::Blocks => record.blocks,
            Metric::Steals => record.steals,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per metric, addressable by field or by [`Metric`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerMetric<T> {
    pub points: T,
    pub rebounds: T,
    pub assists: T,
    pub blocks: T,
    pub steals: T,
}

impl<T> PerMetric<T> {
    pub fn from_fn(mut f: impl FnMut(Metric) -> T) -> Self {
        Self {
            points: f(Metric::Points),
            rebounds: f(Metric::Rebounds),
            assists: f(Metric::Assists),
            blocks: f(Metric::Blocks),
            steals: f(Metric::Steals),
        }
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(Metric) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            points: f(Metric::Points)?,
            rebounds: f(Metric::Rebounds)?,
            assists: f(Metric::Assists)?,
            blocks: f(Metric::Blocks)?,
            steals: f(Metric::Steals)?,
        })
    }

    pub fn get(&self, metric: Metric) -> &T {
        match metric {
            Metric::Points => &self.points,
            Metric::Rebounds => &self.rebounds,
            Metric::Assists => &self.assists,
            Metric::Blocks => &self.blocks,
            Metric::Steals => &self.steals,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Metric, &T) -> U) -> PerMetric<U> {
        PerMetric::from_fn(|m| f(m, self.get(m)))
    }

    /// Iterate in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &T)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

/// Chronologically ordered values of one metric across a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries(Vec<u32>);

impl MetricSeries {
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    pub fn extract(records: &[GameRecord], metric: Metric) -> Self {
        Self(records.iter().map(|r| metric.value_of(r)).collect())
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn min(&self) -> Option<u32> {
        self.0.iter().copied().min()
    }

    pub fn max(&self) -> Option<u32> {
        self.0.iter().copied().max()
    }

    pub fn as_f64(&self) -> Vec<f64> {
        self.0.iter().map(|&v| f64::from(v)).collect()
    }

    /// Values as `f64`, sorted ascending.
    pub fn sorted(&self) -> Vec<f64> {
        let mut values = self.as_f64();
        values.sort_by(f64::total_cmp);
        values
    }
}
