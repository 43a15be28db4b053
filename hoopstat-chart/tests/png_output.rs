//! PNG output: file is written at 300 DPI size and rendering is repeatable.

use hoopstat_chart::{chart_file_name, render, write_png, FigureLayout};
use hoopstat_core::domain::{GameId, GameRecord, PlayerIdentity, Season};
use hoopstat_core::{assemble, QueryScope};

fn result(points: &[u32]) -> hoopstat_core::DistributionResult {
    let records: Vec<GameRecord> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| GameRecord {
            game_id: GameId::new(format!("g{i}")),
            game_date: chrono_date(i as u32 + 1),
            matchup: "BOS vs. NYK".into(),
            outcome: None,
            points: p,
            rebounds: p / 3,
            assists: (p / 4).max(1),
            blocks: (i % 2) as u32,
            steals: 1,
        })
        .collect();
    let scope = QueryScope::new(PlayerIdentity::new(1628369u64, "Jayson Tatum"), Season::new(2023), None);
    assemble(scope, &records).unwrap()
}

fn chrono_date(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert_eq!(&bytes[1..4], b"PNG");
    let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (w, h)
}

#[test]
fn writes_png_at_figure_size() {
    let dir = tempfile::tempdir().unwrap();
    let r = result(&[22, 31, 27, 40, 18, 26]);
    let path = dir.path().join(chart_file_name(&r));
    assert!(path.ends_with("jayson_tatum_2023-24.png"));

    let returned = render(r.clone(), Some(path.as_path())).unwrap();
    assert_eq!(returned, r);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(png_dimensions(&bytes), (4500, 3000));
}

#[test]
fn single_game_renders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.png");
    let layout = FigureLayout::from_result(&result(&[42]));
    write_png(&layout, &path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn same_result_same_image() {
    let dir = tempfile::tempdir().unwrap();
    let r = result(&[10, 20, 30, 40, 50]);
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&FigureLayout::from_result(&r), &a).unwrap();
    write_png(&FigureLayout::from_result(&r), &b).unwrap();
    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}
