//! Identity resolution — free-text player and team names to canonical ids.
//!
//! Directories are built once from the provider's entries and then queried
//! without side effects. Player names match case-insensitively, with common
//! Latin diacritics folded so "Jokic" finds "Jokić". Teams resolve through an
//! alias table in which abbreviation, nickname, and full name all key the same id.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{PlayerIdentity, TeamId, TeamIdentity};
use crate::error::{AnalysisError, EntityKind};

/// Searchable set of known players.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    entries: Vec<(String, PlayerIdentity)>,
}

impl PlayerDirectory {
    pub fn new(players: impl IntoIterator<Item = PlayerIdentity>) -> Self {
        let entries = players
            .into_iter()
            .map(|p| (normalize(&p.full_name), p))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a player query.
    ///
    /// A single exact full-name match wins outright, even when the query is
    /// also a substring of other names. Otherwise every substring match is a
    /// candidate: none is `NotFound`, more than one is `Ambiguous`.
    pub fn resolve(&self, query: &str) -> Result<PlayerIdentity, AnalysisError> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(not_found(EntityKind::Player, query));
        }

        let exact: Vec<&PlayerIdentity> = self
            .entries
            .iter()
            .filter(|(name, _)| *name == needle)
            .map(|(_, p)| p)
            .collect();
        if let [only] = exact.as_slice() {
            debug!(query, player = %only.full_name, "player resolved by exact name");
            return Ok((*only).clone());
        }

        let matches: Vec<&PlayerIdentity> = self
            .entries
            .iter()
            .filter(|(name, _)| name.contains(&needle))
            .map(|(_, p)| p)
            .collect();

        match matches.as_slice() {
            [] => Err(not_found(EntityKind::Player, query)),
            [only] => {
                debug!(query, player = %only.full_name, "player resolved by substring");
                Ok((*only).clone())
            }
            many => Err(AnalysisError::Ambiguous {
                kind: EntityKind::Player,
                query: query.to_string(),
                candidates: many.iter().map(|p| p.full_name.clone()).collect(),
            }),
        }
    }
}

/// Searchable set of known teams with a shared alias table.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: HashMap<TeamId, TeamIdentity>,
    aliases: HashMap<String, TeamId>,
}

impl TeamDirectory {
    pub fn new(teams: impl IntoIterator<Item = TeamIdentity>) -> Self {
        let mut by_id = HashMap::new();
        let mut aliases = HashMap::new();
        for team in teams {
            for alias in team.aliases() {
                aliases.insert(normalize(alias), team.id);
            }
            by_id.insert(team.id, team);
        }
        Self {
            teams: by_id,
            aliases,
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get(&self, id: TeamId) -> Option<&TeamIdentity> {
        self.teams.get(&id)
    }

    /// Resolve an abbreviation, nickname, or full name to its team.
    ///
    /// An exact alias hit wins. Otherwise a substring search runs over all
    /// three alias forms and collects distinct team ids; more than one is
    /// `Ambiguous` ("Los Angeles" names two franchises).
    pub fn resolve(&self, query: &str) -> Result<TeamIdentity, AnalysisError> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(not_found(EntityKind::Team, query));
        }

        if let Some(team) = self.aliases.get(&needle).and_then(|id| self.teams.get(id)) {
            debug!(query, team = %team.abbreviation, "team resolved by alias");
            return Ok(team.clone());
        }

        let ids: BTreeSet<TeamId> = self
            .aliases
            .iter()
            .filter(|(alias, _)| alias.contains(&needle))
            .map(|(_, id)| *id)
            .collect();

        let mut found: Vec<&TeamIdentity> = ids.iter().filter_map(|id| self.teams.get(id)).collect();
        match found.len() {
            0 => Err(not_found(EntityKind::Team, query)),
            1 => {
                let team = found[0];
                debug!(query, team = %team.abbreviation, "team resolved by substring");
                Ok(team.clone())
            }
            _ => {
                found.sort_by(|a, b| a.full_name.cmp(&b.full_name));
                Err(AnalysisError::Ambiguous {
                    kind: EntityKind::Team,
                    query: query.to_string(),
                    candidates: found.iter().map(|t| t.to_string()).collect(),
                })
            }
        }
    }
}

/// Both directories, as one resolver for a query's player and opponent.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    pub players: PlayerDirectory,
    pub teams: TeamDirectory,
}

impl IdentityResolver {
    pub fn new(players: PlayerDirectory, teams: TeamDirectory) -> Self {
        Self { players, teams }
    }

    pub fn resolve_player(&self, name: &str) -> Result<PlayerIdentity, AnalysisError> {
        self.players.resolve(name)
    }

    pub fn resolve_team(&self, name: &str) -> Result<TeamIdentity, AnalysisError> {
        self.teams.resolve(name)
    }
}

fn not_found(kind: EntityKind, query: &str) -> AnalysisError {
    AnalysisError::NotFound {
        kind,
        query: query.to_string(),
    }
}

/// Lowercase, collapse whitespace, and fold Latin diacritics to ASCII.
fn normalize(s: &str) -> String {
    let folded: String = s.chars().flat_map(fold_char).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    let base: &str = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "a",
        'ç' | 'ć' | 'č' | 'Ç' | 'Ć' | 'Č' => "c",
        'ď' | 'đ' | 'Ď' | 'Đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "e",
        'ğ' | 'Ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => "i",
        'ł' | 'ľ' | 'Ł' | 'Ľ' => "l",
        'ñ' | 'ń' | 'ň' | 'Ñ' | 'Ń' | 'Ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "o",
        'ř' | 'Ř' => "r",
        'ś' | 'š' | 'ş' | 'Ś' | 'Š' | 'Ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'Ť' | 'Ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ź' | 'ż' | 'ž' | 'Ź' | 'Ż' | 'Ž' => "z",
        _ => "",
    };
    let folded: Vec<char> = if base.is_empty() {
        c.to_lowercase().collect()
    } else {
        base.chars().collect()
    };
    folded.into_iter()
}
