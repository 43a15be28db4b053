//! Public query surface.
//!
//! Each entry point resolves the free-text player (and optional opponent)
//! against the provider's directories, fetches one season's game log,
//! filters it, and hands the records to the engine. Nothing here caches:
//! two calls with the same query fetch twice.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use hoopstat_chart::ChartError;
use hoopstat_core::data::{ProviderError, StatsProvider};
use hoopstat_core::domain::{GameRecord, Season, SeasonType};
use hoopstat_core::{
    assemble, assemble_central_tendency, filter_by_opponent, AnalysisError, CentralTendencyReport,
    DistributionResult, GameLogSummary, IdentityResolver, PlayerDirectory, QueryScope, TeamDirectory,
};

/// Errors from a query, by stage.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("{0}")]
    Provider(#[from] ProviderError),
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
}

impl QueryError {
    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryError::Analysis(e) if e.is_no_data())
    }
}

/// A free-text query: who, which season, and optionally against whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub player: String,
    pub season: Season,
    #[serde(default)]
    pub season_type: SeasonType,
    pub opponent: Option<String>,
}

impl Query {
    pub fn new(player: impl Into<String>, season: Season) -> Self {
        Self {
            player: player.into(),
            season,
            season_type: SeasonType::default(),
            opponent: None,
        }
    }

    pub fn vs(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = season_type;
        self
    }

    /// Same query for a different season.
    pub fn for_season(&self, season: Season) -> Self {
        Self {
            season,
            ..self.clone()
        }
    }
}

/// A filtered game log with its win/loss and home/away breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    pub scope: QueryScope,
    pub records: Vec<GameRecord>,
    pub summary: GameLogSummary,
}

impl GameLog {
    /// The most recent `n` games, newest first.
    pub fn last(&self, n: usize) -> impl Iterator<Item = &GameRecord> {
        self.records.iter().rev().take(n)
    }
}

/// Build a resolver from the provider's current directories.
pub fn resolver_for(provider: &dyn StatsProvider) -> Result<IdentityResolver, QueryError> {
    let players = PlayerDirectory::new(provider.players()?);
    let teams = TeamDirectory::new(provider.teams()?);
    debug!(provider = provider.name(), players = players.len(), teams = teams.len(), "built identity directories");
    Ok(IdentityResolver::new(players, teams))
}

/// Resolve the query's names into a scope.
pub fn resolve_scope(resolver: &IdentityResolver, query: &Query) -> Result<QueryScope, QueryError> {
    let player = resolver.resolve_player(&query.player)?;
    let opponent = query
        .opponent
        .as_deref()
        .map(|name| resolver.resolve_team(name))
        .transpose()?;
    Ok(QueryScope::new(player, query.season, opponent).with_season_type(query.season_type))
}

/// Fetch and filter the records a scope covers.
pub fn load_records(provider: &dyn StatsProvider, scope: &QueryScope) -> Result<Vec<GameRecord>, QueryError> {
    let records = provider.game_log(scope.player.id, scope.season, scope.season_type)?;
    let filtered = filter_by_opponent(&records, scope.opponent.as_ref());
    info!(
        scope = %scope,
        fetched = records.len(),
        kept = filtered.len(),
        "loaded game log"
    );
    Ok(filtered)
}

fn scoped_records(provider: &dyn StatsProvider, query: &Query) -> Result<(QueryScope, Vec<GameRecord>), QueryError> {
    let resolver = resolver_for(provider)?;
    let scope = resolve_scope(&resolver, query)?;
    let records = load_records(provider, &scope)?;
    Ok((scope, records))
}

/// Percentiles per metric plus the raw series behind them.
pub fn get_distribution(provider: &dyn StatsProvider, query: &Query) -> Result<DistributionResult, QueryError> {
    let (scope, records) = scoped_records(provider, query)?;
    Ok(assemble(scope, &records)?)
}

/// Mean and population standard deviation per metric.
pub fn get_central_tendency(
    provider: &dyn StatsProvider,
    query: &Query,
) -> Result<CentralTendencyReport, QueryError> {
    let (scope, records) = scoped_records(provider, query)?;
    Ok(assemble_central_tendency(scope, &records)?)
}

/// Compute the distribution and render it: to `destination` as PNG when
/// given, otherwise in the interactive viewer.
pub fn plot_distribution(
    provider: &dyn StatsProvider,
    query: &Query,
    destination: Option<&Path>,
) -> Result<DistributionResult, QueryError> {
    let result = get_distribution(provider, query)?;
    Ok(hoopstat_chart::render(result, destination)?)
}

/// The filtered game log in chronological order. An empty log is `NoData`.
pub fn get_game_log(provider: &dyn StatsProvider, query: &Query) -> Result<GameLog, QueryError> {
    let (scope, records) = scoped_records(provider, query)?;
    if records.is_empty() {
        return Err(AnalysisError::no_data().in_scope(scope.to_string()).into());
    }
    let summary = GameLogSummary::from_records(&records);
    Ok(GameLog { scope, records, summary })
}
