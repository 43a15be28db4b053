//! End-to-end: config selects the CSV provider, queries run against a
//! snapshot written to a temp directory.

use std::path::Path;

use chrono::NaiveDate;
use proptest::prelude::*;

use hoopstat_core::data::{CsvProvider, InMemoryProvider};
use hoopstat_core::domain::{GameId, GameRecord, Metric, Outcome, PlayerIdentity, Season, SeasonType};
use hoopstat_runner::{
    get_central_tendency, get_distribution, get_game_log, import_json, export_json, run_batch, season_queries,
    HoopstatConfig, Query, QueryError,
};

fn game(month: u32, day: u32, matchup: &str, points: u32, rebounds: u32) -> GameRecord {
    GameRecord {
        game_id: GameId::new(format!("g{month:02}{day:02}")),
        // October through June: the season's second half is the next calendar year
        game_date: NaiveDate::from_ymd_opt(if month < 7 { 2024 } else { 2023 }, month, day).unwrap(),
        matchup: matchup.into(),
        outcome: Some(if points >= 25 { Outcome::Win } else { Outcome::Loss }),
        points,
        rebounds,
        assists: 8,
        blocks: 1,
        steals: 1,
    }
}

fn write_snapshot(dir: &Path) {
    let csv = CsvProvider::new(dir);
    csv.store_players(&[
        PlayerIdentity::new(203999u64, "Nikola Jokić"),
        PlayerIdentity::new(1629029u64, "Luka Dončić"),
        PlayerIdentity::new(2544u64, "LeBron James"),
    ])
    .unwrap();
    csv.store_game_log(
        203999u64.into(),
        Season::new(2023),
        SeasonType::RegularSeason,
        &[
            game(11, 1, "DEN vs. LAL", 10, 12),
            game(11, 8, "DEN @ DAL", 33, 14),
            game(11, 15, "DEN @ LAL", 20, 9),
            game(12, 2, "DEN vs. PHX", 28, 11),
            game(12, 9, "DEN vs. LAL", 30, 16),
            game(12, 25, "DEN @ LAL", 40, 13),
            game(1, 3, "DEN vs. LAL", 50, 10),
        ],
    )
    .unwrap();
    csv.store_game_log(
        203999u64.into(),
        Season::new(2022),
        SeasonType::RegularSeason,
        &[game(11, 2, "DEN @ LAL", 42, 15)],
    )
    .unwrap();
}

fn csv_config(dir: &Path) -> HoopstatConfig {
    HoopstatConfig::from_toml(&format!(
        "[provider]\nkind = \"csv\"\ndata_dir = {:?}\n",
        dir.display().to_string()
    ))
    .unwrap()
}

#[test]
fn test_percentiles_vs_lakers_from_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    for alias in ["LAL", "Lakers", "Los Angeles Lakers", "lakers"] {
        let query = Query::new("jokic", Season::new(2023)).vs(alias);
        let result = get_distribution(provider.as_ref(), &query).unwrap();
        assert_eq!(result.player.full_name, "Nikola Jokić");
        assert_eq!(result.games_played, 5);
        let pts = result.percentiles.get(Metric::Points);
        assert_eq!((pts.p25, pts.p50, pts.p75, pts.p100), (20.0, 30.0, 40.0, 50.0));
    }
}

#[test]
fn test_central_tendency_full_season() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    let report = get_central_tendency(provider.as_ref(), &Query::new("Nikola Jokic", Season::new(2023))).unwrap();
    assert_eq!(report.stats.games_played, 7);
    let assists = report.stats.metrics.get(Metric::Assists);
    assert_eq!(assists.mean, 8.0);
    assert_eq!(assists.std_dev, 0.0);
}

#[test]
fn test_single_game_season() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    let query = Query::new("Jokić", Season::new(2022)).vs("LAL");
    let result = get_distribution(provider.as_ref(), &query).unwrap();
    let pts = result.percentiles.get(Metric::Points);
    assert_eq!((pts.p25, pts.p50, pts.p75, pts.p100), (42.0, 42.0, 42.0, 42.0));

    let ct = get_central_tendency(provider.as_ref(), &query).unwrap();
    assert_eq!(ct.stats.metrics.get(Metric::Points).mean, 42.0);
    assert_eq!(ct.stats.metrics.get(Metric::Points).std_dev, 0.0);
}

#[test]
fn test_missing_snapshot_is_provider_error() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    let err = get_distribution(provider.as_ref(), &Query::new("LeBron", Season::new(2023))).unwrap_err();
    assert!(matches!(err, QueryError::Provider(_)));
}

#[test]
fn test_ambiguous_player_lists_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    // "ic" appears in both Jokić and Dončić once folded
    let err = get_distribution(provider.as_ref(), &Query::new("ic", Season::new(2023))).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Nikola Jokić"), "{message}");
    assert!(message.contains("Luka Dončić"), "{message}");
}

#[test]
fn test_multi_season_batch_and_log() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    let base = Query::new("Jokic", Season::new(2023)).vs("LAL");
    let queries = season_queries(&base, &[Season::new(2022), Season::new(2023)]);
    let items = run_batch(provider.as_ref(), &queries);
    assert_eq!(items[0].outcome.as_ref().unwrap().games_played, 1);
    assert_eq!(items[1].outcome.as_ref().unwrap().games_played, 5);

    let log = get_game_log(provider.as_ref(), &base).unwrap();
    assert_eq!(log.summary.total_games, 5);
    assert_eq!(log.summary.home_games, 3);
    assert_eq!(log.summary.away_games, 2);
    // chronological across the new year
    assert_eq!(log.records.last().unwrap().game_date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
}

#[test]
fn test_exported_json_survives_reimport() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let provider = csv_config(dir.path()).provider.build().unwrap();

    let result = get_distribution(provider.as_ref(), &Query::new("Jokic", Season::new(2023))).unwrap();
    let back = import_json(&export_json(&result).unwrap()).unwrap();
    assert_eq!(back.result, result);
    assert_eq!(back.result.dataset_hash.len(), 64);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distribution_matches_raw_points(points in prop::collection::vec(0u32..70, 1..40)) {
        let log: Vec<GameRecord> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| GameRecord {
                game_id: GameId::new(format!("g{i}")),
                game_date: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap() + chrono::Days::new(i as u64),
                matchup: "BOS vs. NYK".into(),
                outcome: None,
                points: p,
                rebounds: 0,
                assists: 0,
                blocks: 0,
                steals: 0,
            })
            .collect();
        let provider = InMemoryProvider::new()
            .with_player(PlayerIdentity::new(1628369u64, "Jayson Tatum"))
            .with_game_log(1628369u64.into(), Season::new(2023), SeasonType::RegularSeason, log);

        let result = get_distribution(&provider, &Query::new("Tatum", Season::new(2023))).unwrap();
        prop_assert_eq!(result.games_played, points.len());
        prop_assert_eq!(result.series.points.values(), points.as_slice());
        let pts = result.percentiles.points;
        prop_assert_eq!(pts.p100, *points.iter().max().unwrap() as f64);
        prop_assert!(pts.p25 <= pts.p50 && pts.p50 <= pts.p75 && pts.p75 <= pts.p100);

        let filtered = get_distribution(&provider, &Query::new("Tatum", Season::new(2023)).vs("Knicks")).unwrap();
        prop_assert_eq!(filtered.games_played, result.games_played);
        prop_assert_eq!(filtered.percentiles, result.percentiles);
    }
}
