//! Public NBA stats API provider.
//!
//! Talks to the `stats.nba.com` JSON endpoints used by the league's own site.
//! Handles the browser-like headers the endpoints insist on, retries with
//! exponential backoff, tabular `resultSets` parsing, and the circuit breaker.
//!
//! The endpoints are undocumented and occasionally change shape. The CSV
//! provider is the offline fallback.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::circuit_breaker::CircuitBreaker;
use super::provider::{ProviderError, StatsProvider};
use super::teams::nba_teams;
use crate::domain::{
    GameId, GameRecord, Outcome, PlayerId, PlayerIdentity, Season, SeasonType, TeamIdentity,
};

pub const DEFAULT_BASE_URL: &str = "https://stats.nba.com/stats";

/// `commonallplayers` with `IsOnlyCurrentSeason=0` lists every player in
/// league history whatever season is passed.
const DIRECTORY_SEASON_START: u16 = 2024;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// ─── Wire format ────────────────────────────────────────────────────

/// Every stats endpoint answers with one or more header/row tables.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: Option<String>,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl StatsResponse {
    fn first_table(self) -> Result<ResultSet, ProviderError> {
        self.result_sets
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseFormatChanged("resultSets is empty".into()))
    }
}

/// Column lookup by header name, so reordered columns don't break parsing.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &[String]) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.to_ascii_uppercase(), i))
                .collect(),
        )
    }

    fn index(&self, name: &str) -> Result<usize, ProviderError> {
        self.0
            .get(&name.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| ProviderError::ResponseFormatChanged(format!("missing column {name}")))
    }
}

fn cell<'a>(row: &'a [Value], idx: usize) -> Result<&'a Value, ProviderError> {
    row.get(idx)
        .ok_or_else(|| ProviderError::ResponseFormatChanged(format!("short row: no column {idx}")))
}

fn cell_str(row: &[Value], idx: usize) -> Result<String, ProviderError> {
    match cell(row, idx)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ProviderError::ResponseFormatChanged(format!(
            "expected text, got {other}"
        ))),
    }
}

/// Counting stats. A null cell (stat not tracked) counts as zero.
fn cell_count(row: &[Value], idx: usize) -> Result<u32, ProviderError> {
    match cell(row, idx)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| ProviderError::ResponseFormatChanged(format!("bad count {n}"))),
        other => Err(ProviderError::ResponseFormatChanged(format!(
            "expected number, got {other}"
        ))),
    }
}

/// Game dates come as `"APR 14, 2024"`; some mirrors send ISO dates.
pub(crate) fn parse_game_date(raw: &str) -> Result<NaiveDate, ProviderError> {
    let trimmed = raw.trim();
    let title: String = trimmed
        .chars()
        .enumerate()
        .map(|(i, c)| if i == 0 { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect();
    NaiveDate::parse_from_str(&title, "%b %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed.get(..10).unwrap_or(trimmed), "%Y-%m-%d"))
        .map_err(|_| ProviderError::ResponseFormatChanged(format!("unparseable game date '{raw}'")))
}

pub(crate) fn parse_game_log(resp: StatsResponse) -> Result<Vec<GameRecord>, ProviderError> {
    let table = resp.first_table()?;
    debug!(table = ?table.name, rows = table.row_set.len(), "parsing game log");
    let cols = Columns::new(&table.headers);
    let game_id = cols.index("Game_ID")?;
    let date = cols.index("GAME_DATE")?;
    let matchup = cols.index("MATCHUP")?;
    let wl = cols.index("WL")?;
    let pts = cols.index("PTS")?;
    let reb = cols.index("REB")?;
    let ast = cols.index("AST")?;
    let blk = cols.index("BLK")?;
    let stl = cols.index("STL")?;

    let mut records = table
        .row_set
        .iter()
        .map(|row| -> Result<GameRecord, ProviderError> {
            let outcome = match cell(row, wl)? {
                Value::String(s) => Outcome::from_code(s),
                _ => None,
            };
            Ok(GameRecord {
                game_id: GameId::new(cell_str(row, game_id)?),
                game_date: parse_game_date(&cell_str(row, date)?)?,
                matchup: cell_str(row, matchup)?,
                outcome,
                points: cell_count(row, pts)?,
                rebounds: cell_count(row, reb)?,
                assists: cell_count(row, ast)?,
                blocks: cell_count(row, blk)?,
                steals: cell_count(row, stl)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Rows arrive newest first.
    records.sort_by(|a, b| {
        a.game_date
            .cmp(&b.game_date)
            .then_with(|| a.game_id.0.cmp(&b.game_id.0))
    });
    Ok(records)
}

pub(crate) fn parse_players(resp: StatsResponse) -> Result<Vec<PlayerIdentity>, ProviderError> {
    let table = resp.first_table()?;
    let cols = Columns::new(&table.headers);
    let id = cols.index("PERSON_ID")?;
    let name = cols.index("DISPLAY_FIRST_LAST")?;

    table
        .row_set
        .iter()
        .map(|row| -> Result<PlayerIdentity, ProviderError> {
            let pid = match cell(row, id)? {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }
            .ok_or_else(|| ProviderError::ResponseFormatChanged("bad PERSON_ID".into()))?;
            Ok(PlayerIdentity::new(pid, cell_str(row, name)?))
        })
        .collect()
}

// ─── Provider ───────────────────────────────────────────────────────

/// Transport settings for [`NbaStatsProvider`].
#[derive(Debug, Clone)]
pub struct NbaStatsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for NbaStatsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay: Duration::from_millis(600),
        }
    }
}

pub struct NbaStatsProvider {
    client: reqwest::blocking::Client,
    config: NbaStatsConfig,
    circuit_breaker: Arc<CircuitBreaker>,
    players: Mutex<Option<Vec<PlayerIdentity>>>,
}

impl NbaStatsProvider {
    pub fn new(
        config: NbaStatsConfig,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            circuit_breaker,
            players: Mutex::new(None),
        })
    }

    pub fn with_defaults() -> Result<Self, ProviderError> {
        Self::new(NbaStatsConfig::default(), Arc::new(CircuitBreaker::default_provider()))
    }

    fn game_log_url(&self, player_id: PlayerId, season: Season, season_type: SeasonType) -> String {
        format!(
            "{}/playergamelog?PlayerID={player_id}&Season={season}&SeasonType={}",
            self.config.base_url.trim_end_matches('/'),
            season_type.as_str().replace(' ', "%20"),
        )
    }

    fn players_url(&self) -> String {
        format!(
            "{}/commonallplayers?LeagueID=00&Season={}&IsOnlyCurrentSeason=0",
            self.config.base_url.trim_end_matches('/'),
            Season::new(DIRECTORY_SEASON_START),
        )
    }

    /// One GET with retry and circuit breaker logic.
    fn fetch_with_retry(&self, url: &str) -> Result<StatsResponse, ProviderError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(ProviderError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.base_delay * 2u32.pow(attempt - 1);
                warn!(attempt, ?delay, url, "retrying stats request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(ProviderError::CircuitBreakerTripped);
            }

            let resp = match self.client.get(url).send() {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(ProviderError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(ProviderError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();

            if status == reqwest::StatusCode::FORBIDDEN {
                self.circuit_breaker.trip();
                return Err(ProviderError::CircuitBreakerTripped);
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                self.circuit_breaker.record_failure();
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                last_error = Some(ProviderError::RateLimited {
                    retry_after_secs: retry_after,
                });
                continue;
            }

            if !status.is_success() {
                self.circuit_breaker.record_failure();
                last_error = Some(ProviderError::Other(format!("HTTP {status} from {url}")));
                continue;
            }

            let parsed: StatsResponse = resp.json().map_err(|e| {
                ProviderError::ResponseFormatChanged(format!("failed to parse response: {e}"))
            })?;
            self.circuit_breaker.record_success();
            return Ok(parsed);
        }

        Err(last_error.unwrap_or_else(|| ProviderError::Other("max retries exceeded".into())))
    }
}

impl StatsProvider for NbaStatsProvider {
    fn name(&self) -> &str {
        "nba_stats"
    }

    fn players(&self) -> Result<Vec<PlayerIdentity>, ProviderError> {
        let mut cached = self.players.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(players) = cached.as_ref() {
            return Ok(players.clone());
        }
        info!("fetching player directory");
        let players = parse_players(self.fetch_with_retry(&self.players_url())?)?;
        info!(count = players.len(), "player directory loaded");
        *cached = Some(players.clone());
        Ok(players)
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
        info!(%player_id, %season, %season_type, "fetching game log");
        let url = self.game_log_url(player_id, season, season_type);
        let records = parse_game_log(self.fetch_with_retry(&url)?)?;
        info!(games = records.len(), "game log fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_LOG: &str = r#"{
        "resource": "playergamelog",
        "resultSets": [{
            "name": "PlayerGameLog",
            "headers": ["SEASON_ID","Player_ID","Game_ID","GAME_DATE","MATCHUP","WL","MIN","PTS","REB","AST","STL","BLK"],
            "rowSet": [
                ["22023", 201939, "0022301195", "APR 14, 2024", "GSW @ UTA", "W", 30, 22, 4, 6, 1, 0],
                ["22023", 201939, "0022301180", "APR 12, 2024", "GSW vs. NOP", "W", 34, 32, 5, 6, 2, 1],
                ["22023", 201939, "0022300061", "OCT 24, 2023", "GSW vs. PHX", "L", 33, 27, 6, 5, 0, null]
            ]
        }]
    }"#;

    const PLAYERS: &str = r#"{
        "resultSets": [{
            "name": "CommonAllPlayers",
            "headers": ["PERSON_ID","DISPLAY_LAST_COMMA_FIRST","DISPLAY_FIRST_LAST","ROSTERSTATUS"],
            "rowSet": [
                [2544, "James, LeBron", "LeBron James", 1],
                [201939, "Curry, Stephen", "Stephen Curry", 1]
            ]
        }]
    }"#;

    #[test]
    fn test_parse_game_log_sorted_chronologically() {
        let resp: StatsResponse = serde_json::from_str(GAME_LOG).unwrap();
        let records = parse_game_log(resp).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].game_date, NaiveDate::from_ymd_opt(2023, 10, 24).unwrap());
        assert_eq!(records[2].game_date, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
        assert_eq!(records[0].blocks, 0);
        assert_eq!(records[0].outcome, Some(Outcome::Loss));
        assert_eq!(records[1].points, 32);
        assert_eq!(records[1].steals, 2);
        assert_eq!(records[2].matchup, "GSW @ UTA");
        assert_eq!(records[2].game_id.0, "0022301195");
    }

    #[test]
    fn test_parse_game_log_missing_column() {
        let body = r#"{"resultSets":[{"headers":["Game_ID","GAME_DATE"],"rowSet":[]}]}"#;
        let resp: StatsResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            parse_game_log(resp),
            Err(ProviderError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn test_parse_players() {
        let resp: StatsResponse = serde_json::from_str(PLAYERS).unwrap();
        let players = parse_players(resp).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].full_name, "LeBron James");
        assert_eq!(players[1].id, PlayerId(201939));
    }

    #[test]
    fn test_parse_game_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 14).unwrap();
        assert_eq!(parse_game_date("APR 14, 2024").unwrap(), expected);
        assert_eq!(parse_game_date("Apr 14, 2024").unwrap(), expected);
        assert_eq!(parse_game_date("2024-04-14T00:00:00").unwrap(), expected);
        assert!(parse_game_date("someday").is_err());
    }

    #[test]
    fn test_urls() {
        let provider = NbaStatsProvider::with_defaults().unwrap();
        let url = provider.game_log_url(PlayerId(2544), "2023-24".parse().unwrap(), SeasonType::RegularSeason);
        assert_eq!(
            url,
            "https://stats.nba.com/stats/playergamelog?PlayerID=2544&Season=2023-24&SeasonType=Regular%20Season"
        );
        assert!(provider.players_url().contains("commonallplayers?LeagueID=00"));
    }

    #[test]
    fn test_open_breaker_refuses_without_network() {
        let breaker = Arc::new(CircuitBreaker::default_provider());
        breaker.trip();
        let provider = NbaStatsProvider::new(NbaStatsConfig::default(), breaker).unwrap();
        assert!(matches!(
            provider.game_log(PlayerId(2544), Season::new(2023), SeasonType::Playoffs),
            Err(ProviderError::CircuitBreakerTripped)
        ));
    }
}
