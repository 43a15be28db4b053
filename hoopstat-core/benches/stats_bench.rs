//! Criterion benchmarks for the distribution hot path.
//!
//! Benchmarks:
//! 1. Percentile calculator over a season-sized and a career-sized log
//! 2. Central tendency calculator
//! 3. Opponent filter + full assembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hoopstat_core::domain::{GameId, GameRecord, PlayerIdentity, Season, TeamIdentity};
use hoopstat_core::stats::{compute_central_tendency, compute_percentiles};
use hoopstat_core::{assemble, filter_by_opponent, QueryScope};

// ── Helpers ──────────────────────────────────────────────────────────

const OPPONENTS: [&str; 5] = ["LAL", "BOS", "DEN", "MIA", "NYK"];

fn make_records(n: usize) -> Vec<GameRecord> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2023, 10, 24).unwrap();
    (0..n)
        .map(|i| {
            let wave = (i as f64 * 0.7).sin();
            GameRecord {
                game_id: GameId::new(format!("{i:010}")),
                game_date: base_date + chrono::Duration::days(i as i64 * 2),
                matchup: format!("GSW vs. {}", OPPONENTS[i % OPPONENTS.len()]),
                outcome: None,
                points: (25.0 + wave * 10.0) as u32,
                rebounds: (6.0 + wave * 3.0) as u32,
                assists: (5.0 - wave * 2.0) as u32,
                blocks: (i % 3) as u32,
                steals: (i % 4) as u32,
            }
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_calculators(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculators");
    for n in [82usize, 1_500] {
        let records = make_records(n);
        group.bench_with_input(BenchmarkId::new("percentiles", n), &records, |b, r| {
            b.iter(|| compute_percentiles(black_box(r)))
        });
        group.bench_with_input(BenchmarkId::new("central_tendency", n), &records, |b, r| {
            b.iter(|| compute_central_tendency(black_box(r)))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let records = make_records(82);
    let lakers = TeamIdentity::new(1610612747u64, "Los Angeles Lakers", "Lakers", "LAL", "Los Angeles");
    let scope = QueryScope::new(
        PlayerIdentity::new(201939u64, "Stephen Curry"),
        Season::new(2023),
        Some(lakers.clone()),
    );
    c.bench_function("filter_and_assemble", |b| {
        b.iter(|| {
            let filtered = filter_by_opponent(black_box(&records), Some(&lakers));
            assemble(scope.clone(), &filtered)
        })
    });
}

criterion_group!(benches, bench_calculators, bench_pipeline);
criterion_main!(benches);
