//! Stats provider trait and structured error types.
//!
//! The StatsProvider trait abstracts over data sources (the public stats API,
//! a CSV directory, an in-memory fixture) so queries can run offline and tests
//! never touch the network.

use thiserror::Error;

use crate::domain::{GameRecord, PlayerId, PlayerIdentity, Season, SeasonType, TeamIdentity};

/// Structured error types for provider operations.
///
/// The engine never interprets these; they surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("hard stop: stats provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("no game log for player {player_id} in {season} ({season_type})")]
    MissingGameLog {
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("provider error: {0}")]
    Other(String),
}

/// Where a query's data comes from.
///
/// Implementations own retries, caching, and transport. A call either returns
/// the complete answer or an error; callers never see partial lists.
pub trait StatsProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Every player the provider can answer for.
    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError>;

    /// Every team the provider knows.
    fn teams(&self) -> Result<Vec<TeamIdentity>, ProviderError>;

    /// The player's game log for one season, ordered chronologically.
    fn game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, ProviderError>;
}

impl<P: StatsProvider + ?Sized> StatsProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError> {
        (**self).players()
    }

    fn teams(&self) -> Result<Vec<TeamIdentity>, ProviderError> {
        (**self).teams()
    }

    fn game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        (**self).game_log(player_id, season, season_type)
    }
}

impl<P: StatsProvider + ?Sized> StatsProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError> {
        (**self).players()
    }

    fn teams(&self) -> Result<Vec<TeamIdentity>, ProviderError> {
        (**self).teams()
    }

    fn game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        (**self).game_log(player_id, season, season_type)
    }
}
