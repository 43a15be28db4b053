//! Canonical player and team identities.
//!
//! Both are immutable values produced by the identity resolver from a
//! free-text query. A team carries three alias forms (abbreviation, nickname,
//! full name) that all resolve to the same `TeamId`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: PlayerId,
    pub full_name: String,
}

impl PlayerIdentity {
    pub fn new(id: impl Into<PlayerId>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamIdentity {
    pub id: TeamId,
    pub full_name: String,
    pub nickname: String,
    pub abbreviation: String,
    pub city: String,
}

impl TeamIdentity {
    pub fn new(
        id: impl Into<TeamId>,
        full_name: impl Into<String>,
        nickname: impl Into<String>,
        abbreviation: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            nickname: nickname.into(),
            abbreviation: abbreviation.into(),
            city: city.into(),
        }
    }

    /// The three alias forms, in the order they are tried for exact matches.
    pub fn aliases(&self) -> [&str; 3] {
        [&self.abbreviation, &self.nickname, &self.full_name]
    }
}

impl fmt::Display for TeamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.abbreviation)
    }
}
