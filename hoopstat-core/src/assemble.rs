//! Result assembly — calculators' output plus raw series and metadata.
//!
//! This is where an empty filtered record set becomes a reported `NoData`
//! error, scoped to the query that produced it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{GameRecord, MetricSeries, PerMetric, PlayerIdentity, Season, SeasonType, TeamIdentity};
use crate::error::AnalysisError;
use crate::fingerprint::dataset_hash;
use crate::stats::{compute_central_tendency, compute_percentiles, CentralTendencyResult, PercentileSet};

/// Who, when, and against whom a result was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryScope {
    pub player: PlayerIdentity,
    pub season: Season,
    #[serde(default)]
    pub season_type: SeasonType,
    pub opponent: Option<TeamIdentity>,
}

impl QueryScope {
    pub fn new(player: PlayerIdentity, season: Season, opponent: Option<TeamIdentity>) -> Self {
        Self {
            player,
            season,
            season_type: SeasonType::default(),
            opponent,
        }
    }

    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = season_type;
        self
    }
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.player.full_name)?;
        if let Some(team) = &self.opponent {
            write!(f, " vs {}", team.full_name)?;
        }
        write!(f, " in {}", self.season)?;
        if self.season_type != SeasonType::RegularSeason {
            write!(f, " {}", self.season_type)?;
        }
        Ok(())
    }
}

/// Everything a caller or the visualizer needs about one query's distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub player: PlayerIdentity,
    pub season: Season,
    #[serde(default)]
    pub season_type: SeasonType,
    pub opponent: Option<TeamIdentity>,
    pub games_played: usize,
    pub percentiles: PerMetric<PercentileSet>,
    pub series: PerMetric<MetricSeries>,
    pub game_dates: Vec<NaiveDate>,
    pub dataset_hash: String,
}

impl DistributionResult {
    pub fn scope(&self) -> QueryScope {
        QueryScope {
            player: self.player.clone(),
            season: self.season,
            season_type: self.season_type,
            opponent: self.opponent.clone(),
        }
    }
}

/// Central tendency with the scope it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralTendencyReport {
    pub scope: QueryScope,
    #[serde(flatten)]
    pub stats: CentralTendencyResult,
}

/// Build the distribution view of `records` (already filtered).
pub fn assemble(scope: QueryScope, records: &[GameRecord]) -> Result<DistributionResult, AnalysisError> {
    let percentiles = compute_percentiles(records).map_err(|e| e.in_scope(scope.to_string()))?;
    let series = PerMetric::from_fn(|metric| MetricSeries::extract(records, metric));
    debug!(scope = %scope, games = records.len(), "assembled distribution");

    Ok(DistributionResult {
        player: scope.player,
        season: scope.season,
        season_type: scope.season_type,
        opponent: scope.opponent,
        games_played: records.len(),
        percentiles,
        series,
        game_dates: records.iter().map(|r| r.game_date).collect(),
        dataset_hash: dataset_hash(records),
    })
}

/// Build the central-tendency view of `records` (already filtered).
pub fn assemble_central_tendency(
    scope: QueryScope,
    records: &[GameRecord],
) -> Result<CentralTendencyReport, AnalysisError> {
    let stats = compute_central_tendency(records).map_err(|e| e.in_scope(scope.to_string()))?;
    Ok(CentralTendencyReport { scope, stats })
}
