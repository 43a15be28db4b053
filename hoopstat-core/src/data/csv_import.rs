//! Offline provider over a directory of CSV files.
//!
//! Layout:
//!
//! ```text
//! <data_dir>/players.csv                          PERSON_ID,DISPLAY_FIRST_LAST
//! <data_dir>/gamelogs/<player_id>/<season>.csv    Regular Season
//! <data_dir>/gamelogs/<player_id>/<season>_playoffs.csv (etc.)
//! ```
//!
//! Game log files use the remote provider's column names (`Game_ID`,
//! `GAME_DATE`, `MATCHUP`, `WL`, `PTS`, `REB`, `AST`, `BLK`, `STL`). Extra
//! columns are ignored, so raw exports from the stats site load as-is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::nba::parse_game_date;
use super::provider::{ProviderError, StatsProvider};
use super::teams::nba_teams;
use crate::domain::{
    GameId, GameRecord, Outcome, PlayerId, PlayerIdentity, Season, SeasonType, TeamIdentity,
};

#[derive(Debug, Serialize, Deserialize)]
struct PlayerRow {
    #[serde(rename = "PERSON_ID")]
    person_id: u64,
    #[serde(rename = "DISPLAY_FIRST_LAST")]
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GameLogRow {
    #[serde(rename = "Game_ID", alias = "GAME_ID")]
    game_id: String,
    #[serde(rename = "GAME_DATE")]
    game_date: String,
    #[serde(rename = "MATCHUP")]
    matchup: String,
    #[serde(rename = "WL", default)]
    wl: Option<String>,
    #[serde(rename = "PTS")]
    pts: u32,
    #[serde(rename = "REB")]
    reb: u32,
    #[serde(rename = "AST")]
    ast: u32,
    #[serde(rename = "BLK")]
    blk: u32,
    #[serde(rename = "STL")]
    stl: u32,
}

impl GameLogRow {
    fn into_record(self) -> Result<GameRecord, ProviderError> {
        Ok(GameRecord {
            game_id: GameId::new(self.game_id),
            game_date: parse_game_date(&self.game_date)?,
            matchup: self.matchup,
            outcome: self.wl.as_deref().and_then(Outcome::from_code),
            points: self.pts,
            rebounds: self.reb,
            assists: self.ast,
            blocks: self.blk,
            steals: self.stl,
        })
    }

    fn from_record(r: &GameRecord) -> Self {
        Self {
            game_id: r.game_id.0.clone(),
            game_date: r.game_date.format("%Y-%m-%d").to_string(),
            matchup: r.matchup.clone(),
            wl: r.outcome.map(|o| o.code().to_string()),
            pts: r.points,
            reb: r.rebounds,
            ast: r.assists,
            blk: r.blocks,
            stl: r.steals,
        }
    }
}

/// Reads (and optionally writes) the CSV layout above.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    data_dir: PathBuf,
}

impl CsvProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.csv")
    }

    pub fn game_log_path(&self, player_id: PlayerId, season: Season, season_type: SeasonType) -> PathBuf {
        let file = match season_type {
            SeasonType::RegularSeason => format!("{season}.csv"),
            SeasonType::Playoffs => format!("{season}_playoffs.csv"),
            SeasonType::PlayIn => format!("{season}_playin.csv"),
            SeasonType::PreSeason => format!("{season}_preseason.csv"),
        };
        self.data_dir
            .join("gamelogs")
            .join(player_id.to_string())
            .join(file)
    }

    /// Add or replace players in `players.csv`, keeping it sorted by id.
    pub fn store_players(&self, players: &[PlayerIdentity]) -> Result<(), ProviderError> {
        let mut all = if self.players_path().exists() {
            self.players()?
        } else {
            Vec::new()
        };
        for p in players {
            all.retain(|existing| existing.id != p.id);
            all.push(p.clone());
        }
        all.sort_by_key(|p| p.id);

        fs::create_dir_all(&self.data_dir)?;
        let mut wtr = csv::Writer::from_path(self.players_path())?;
        for p in &all {
            wtr.serialize(PlayerRow {
                person_id: p.id.0,
                name: p.full_name.clone(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write a game log snapshot, replacing any existing file.
    pub fn store_game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
        records: &[GameRecord],
    ) -> Result<PathBuf, ProviderError> {
        let path = self.game_log_path(player_id, season, season_type);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&path)?;
        for r in records {
            wtr.serialize(GameLogRow::from_record(r))?;
        }
        wtr.flush()?;
        info!(path = %path.display(), games = records.len(), "stored game log");
        Ok(path)
    }
}

impl StatsProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError> {
        let path = self.players_path();
        debug!(path = %path.display(), "reading player directory");
        let mut rdr = csv::Reader::from_path(&path)?;
        rdr.deserialize::<PlayerRow>()
            .map(|row| -> Result<PlayerIdentity, ProviderError> {
                let r = row?;
                Ok(PlayerIdentity::new(r.person_id, r.name))
            })
            .collect()
    }

    fn teams(&self) -> Result<Vec<TeamIdentity>, ProviderError> {
        Ok(nba_teams())
    }

    fn game_log(
        &self,
        player_id: PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        let path = self.game_log_path(player_id, season, season_type);
        if !path.exists() {
            return Err(ProviderError::MissingGameLog {
                player_id,
                season,
                season_type,
            });
        }
        debug!(path = %path.display(), "reading game log");
        let mut rdr = csv::Reader::from_path(&path)?;
        let mut records = rdr
            .deserialize::<GameLogRow>()
            .map(|row| -> Result<GameRecord, ProviderError> { row?.into_record() })
            .collect::<Result<Vec<_>, ProviderError>>()?;
        records.sort_by(|a, b| a.game_date.cmp(&b.game_date));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_log_path_by_season_type() {
        let p = CsvProvider::new("/data");
        let season: Season = "2023-24".parse().unwrap();
        assert_eq!(
            p.game_log_path(PlayerId(2544), season, SeasonType::RegularSeason),
            Path::new("/data/gamelogs/2544/2023-24.csv")
        );
        assert_eq!(
            p.game_log_path(PlayerId(2544), season, SeasonType::Playoffs),
            Path::new("/data/gamelogs/2544/2023-24_playoffs.csv")
        );
    }

    #[test]
    fn test_row_conversion_keeps_blank_outcome() {
        let row = GameLogRow {
            game_id: "0022300001".into(),
            game_date: "OCT 24, 2023".into(),
            matchup: "LAL @ DEN".into(),
            wl: None,
            pts: 21,
            reb: 8,
            ast: 5,
            blk: 1,
            stl: 1,
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.outcome, None);
        assert_eq!(record.opponent_code().as_deref(), Some("DEN"));
        assert_eq!(GameLogRow::from_record(&record).game_date, "2023-10-24");
    }
}
