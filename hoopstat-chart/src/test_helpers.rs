//! Shared fixtures for unit tests.

use hoopstat_core::domain::{Metric, MetricSeries, PerMetric, PlayerIdentity, Season, TeamIdentity};
use hoopstat_core::stats::PercentileSet;
use hoopstat_core::DistributionResult;

/// Curry vs the Lakers with the given points series; every other metric is 2
/// in every game.
pub fn sample_result(points: Vec<u32>) -> DistributionResult {
    let series = PerMetric::from_fn(|m| match m {
        Metric::Points => MetricSeries::new(points.clone()),
        _ => MetricSeries::new(vec![2; points.len()]),
    });
    let percentiles = series.map(|_, s| PercentileSet::from_series(s).unwrap());
    DistributionResult {
        player: PlayerIdentity::new(201939u64, "Stephen Curry"),
        season: Season::new(2023),
        season_type: Default::default(),
        opponent: Some(TeamIdentity::new(
            1610612747u64,
            "Los Angeles Lakers",
            "Lakers",
            "LAL",
            "Los Angeles",
        )),
        games_played: points.len(),
        percentiles,
        series,
        game_dates: vec![],
        dataset_hash: String::new(),
    }
}
