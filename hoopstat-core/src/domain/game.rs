//! GameRecord — one played game from a player's log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GameId;

/// One game a player appeared in, with the five tracked box-score metrics.
///
/// `matchup` keeps the provider's notation verbatim (`"GSW vs. LAL"` for a home
/// game, `"GSW @ LAL"` for a road game); use [`GameRecord::parsed_matchup`] to
/// get at the opponent code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub matchup: String,
    pub outcome: Option<Outcome>,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub steals: u32,
}

impl GameRecord {
    pub fn parsed_matchup(&self) -> Option<Matchup> {
        self.matchup.parse().ok()
    }

    /// Opponent abbreviation extracted from the matchup notation.
    pub fn opponent_code(&self) -> Option<String> {
        self.parsed_matchup().map(|m| m.opponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    /// Parse the provider's `WL` column. Blank or unknown values mean the
    /// game has no recorded result yet.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "W" | "w" => Some(Outcome::Win),
            "L" | "l" => Some(Outcome::Loss),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

/// Parsed form of the matchup notation: `TEAM vs. OPP` or `TEAM @ OPP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub team: String,
    pub venue: Venue,
    pub opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized matchup notation '{0}'")]
pub struct MatchupParseError(pub String);

impl FromStr for Matchup {
    type Err = MatchupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [team, marker, opponent] = tokens.as_slice() else {
            return Err(MatchupParseError(s.to_string()));
        };
        let venue = match marker.to_ascii_lowercase().as_str() {
            "vs." | "vs" => Venue::Home,
            "@" => Venue::Away,
            _ => return Err(MatchupParseError(s.to_string())),
        };
        let is_code = |t: &str| !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric());
        if !is_code(team) || !is_code(opponent) {
            return Err(MatchupParseError(s.to_string()));
        }
        Ok(Matchup {
            team: team.to_ascii_uppercase(),
            venue,
            opponent: opponent.to_ascii_uppercase(),
        })
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.venue {
            Venue::Home => write!(f, "{} vs. {}", self.team, self.opponent),
            Venue::Away => write!(f, "{} @ {}", self.team, self.opponent),
        }
    }
}
