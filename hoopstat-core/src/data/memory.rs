//! In-memory provider for tests, demos, and offline fixtures.

use std::collections::HashMap;

use super::provider::{ProviderError, StatsProvider};
use super::teams::nba_teams;
use crate::domain::{GameRecord, PlayerId, PlayerIdentity, Season, SeasonType, TeamIdentity};

/// Provider backed by plain collections, built with `with_*` calls.
///
/// A game log that was never registered is an empty season, not an error.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    players: Vec<PlayerIdentity>,
    teams: Vec<TeamIdentity>,
    logs: HashMap<(PlayerId, Season, SeasonType), Vec<GameRecord>>,
}

impl InMemoryProvider {
    /// Empty player list, the thirty franchises as teams.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            teams: nba_teams(),
            logs: HashMap::new(),
        }
    }

    pub fn with_player(mut self, player: PlayerIdentity) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_teams(mut self, teams: Vec<TeamIdentity>) -> Self {
        self.teams = teams;
        self
    }

    pub fn with_game_log(
        mut self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
        records: Vec<GameRecord>,
    ) -> Self {
        self.logs.insert((player_id, season, season_type), records);
        self
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError> {
        Ok(self.players.clone())
    }

    fn teams(&self) -> Result<Vec<TeamIdentity>, ProviderError> {
        Ok(self.teams.clone())
    }

    fn game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        let mut records = self
            .logs
            .get(&(player_id, season, season_type))
            .cloned()
            .unwrap_or_default();
        records.sort_by(|a, b| a.game_date.cmp(&b.game_date));
        Ok(records)
    }
}
