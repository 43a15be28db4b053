use chrono::NaiveDate;
use hoopstat_core::data::InMemoryProvider;
use hoopstat_core::domain::{GameId, GameRecord, Outcome, PlayerIdentity, Season, SeasonType};

pub(crate) fn game(day: u32, matchup: &str, outcome: Outcome, points: u32) -> GameRecord {
    GameRecord {
        game_id: GameId::new(format!("00223{day:05}")),
        game_date: NaiveDate::from_ymd_opt(2023, 12, day).unwrap(),
        matchup: matchup.into(),
        outcome: Some(outcome),
        points,
        rebounds: 4 + day % 3,
        assists: 5,
        blocks: day % 2,
        steals: 1,
    }
}

/// Stephen Curry, 2023-24: six games, three against the Lakers
/// (10, 30, 50 points) and one each against SAC, POR, PHX.
pub(crate) fn curry_provider() -> InMemoryProvider {
    let log = vec![
        game(2, "GSW vs. LAL", Outcome::Win, 30),
        game(5, "GSW @ SAC", Outcome::Loss, 24),
        game(9, "GSW @ LAL", Outcome::Loss, 10),
        game(14, "GSW vs. POR", Outcome::Win, 41),
        game(20, "GSW vs. LAL", Outcome::Win, 50),
        game(27, "GSW @ PHX", Outcome::Loss, 18),
    ];
    InMemoryProvider::new()
        .with_player(PlayerIdentity::new(201939u64, "Stephen Curry"))
        .with_player(PlayerIdentity::new(2544u64, "LeBron James"))
        .with_player(PlayerIdentity::new(203999u64, "Nikola Jokić"))
        .with_game_log(201939u64.into(), Season::new(2023), SeasonType::RegularSeason, log)
}
