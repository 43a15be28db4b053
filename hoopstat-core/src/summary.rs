//! Win/loss and home/away breakdown of a game log.

use serde::{Deserialize, Serialize};

use crate::domain::{GameRecord, Outcome, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameLogSummary {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub home_games: usize,
    pub away_games: usize,
}

impl GameLogSummary {
    /// Games without a recorded outcome count toward the total only; same for
    /// games whose matchup can't be parsed and the home/away split.
    pub fn from_records(records: &[GameRecord]) -> Self {
        records.iter().fold(
            Self {
                total_games: records.len(),
                ..Self::default()
            },
            |mut acc, r| {
                match r.outcome {
                    Some(Outcome::Win) => acc.wins += 1,
                    Some(Outcome::Loss) => acc.losses += 1,
                    None => {}
                }
                match r.parsed_matchup().map(|m| m.venue) {
                    Some(Venue::Home) => acc.home_games += 1,
                    Some(Venue::Away) => acc.away_games += 1,
                    None => {}
                }
                acc
            },
        )
    }

    /// Wins as a fraction of decided games, `None` before any result.
    pub fn win_pct(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        (decided > 0).then(|| self.wins as f64 / decided as f64)
    }
}
