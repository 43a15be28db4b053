//! Game log filtering by opponent.

use tracing::{debug, warn};

use crate::domain::{GameRecord, TeamIdentity};

/// Keep the games played against `opponent`, or every game when it is `None`.
///
/// The opponent is the team code after the `vs.`/`@` marker, compared
/// case-insensitively with the team's abbreviation. The player's own team
/// (before the marker) never counts. Records whose matchup can't be parsed
/// are dropped from opponent-filtered output. Input order is preserved and
/// the input is not modified.
pub fn filter_by_opponent(records: &[GameRecord], opponent: Option<&TeamIdentity>) -> Vec<GameRecord> {
    let Some(team) = opponent else {
        return records.to_vec();
    };

    let kept: Vec<GameRecord> = records
        .iter()
        .filter(|record| match record.opponent_code() {
            Some(code) => code.eq_ignore_ascii_case(&team.abbreviation),
            None => {
                warn!(
                    game_id = %record.game_id,
                    matchup = %record.matchup,
                    "unparseable matchup, excluded from opponent filter"
                );
                false
            }
        })
        .cloned()
        .collect();

    debug!(
        opponent = %team.abbreviation,
        total = records.len(),
        kept = kept.len(),
        "filtered game log by opponent"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameId;
    use chrono::NaiveDate;

    fn game(day: u32, matchup: &str, points: u32) -> GameRecord {
        GameRecord {
            game_id: GameId::new(format!("00223{day:05}")),
            game_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            matchup: matchup.to_string(),
            outcome: None,
            points,
            rebounds: 0,
            assists: 0,
            blocks: 0,
            steals: 0,
        }
    }

    fn lakers() -> TeamIdentity {
        TeamIdentity::new(1610612747u64, "Los Angeles Lakers", "Lakers", "LAL", "Los Angeles")
    }

    #[test]
    fn test_no_opponent_keeps_everything() {
        let games = vec![game(1, "GSW vs. LAL", 30), game(2, "GSW @ BOS", 20)];
        assert_eq!(filter_by_opponent(&games, None), games);
    }

    #[test]
    fn test_home_and_away_both_match() {
        let games = vec![
            game(1, "GSW vs. LAL", 30),
            game(2, "GSW @ BOS", 20),
            game(3, "GSW @ LAL", 25),
        ];
        let kept = filter_by_opponent(&games, Some(&lakers()));
        let points: Vec<u32> = kept.iter().map(|g| g.points).collect();
        assert_eq!(points, vec![30, 25]);
    }

    #[test]
    fn test_own_team_is_not_the_opponent() {
        let games = vec![game(1, "LAL vs. GSW", 28), game(2, "LAL @ DEN", 31)];
        assert!(filter_by_opponent(&games, Some(&lakers())).is_empty());
    }

    #[test]
    fn test_unparseable_matchup_excluded() {
        let games = vec![game(1, "LAL", 10), game(2, "GSW vs. lal", 12)];
        let kept = filter_by_opponent(&games, Some(&lakers()));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].points, 12);
    }

    #[test]
    fn test_input_not_mutated() {
        let games = vec![game(1, "GSW vs. LAL", 30), game(2, "GSW @ BOS", 20)];
        let before = games.clone();
        let _ = filter_by_opponent(&games, Some(&lakers()));
        assert_eq!(games, before);
    }
}
