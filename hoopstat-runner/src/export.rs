//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! - **JSON**: the full `DistributionResult` in a versioned envelope
//! - **CSV**: the per-game series, or a game log with matchups and outcomes
//! - **Markdown**: central tendency and percentile tables with a consistency
//!   rating per metric
//!
//! Persisted JSON carries a `schema_version`. Newer versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use hoopstat_core::domain::{Metric, MetricSeries};
use hoopstat_core::stats::{CentralTendency, PercentileSet};
use hoopstat_core::DistributionResult;

use crate::query::GameLog;

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Versioned envelope around a distribution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub result: DistributionResult,
}

impl DistributionReport {
    pub fn new(result: DistributionResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            result,
        }
    }
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a result to pretty JSON inside a fresh envelope.
pub fn export_json(result: &DistributionResult) -> Result<String> {
    serde_json::to_string_pretty(&DistributionReport::new(result.clone()))
        .context("failed to serialize distribution report to JSON")
}

/// Deserialize a report from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<DistributionReport> {
    let report: DistributionReport =
        serde_json::from_str(json).context("failed to deserialize distribution report from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// One row per game: game_date, points, rebounds, assists, blocks, steals.
pub fn export_series_csv(result: &DistributionResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["game_date"];
    header.extend(Metric::ALL.iter().map(|m| m.column()));
    wtr.write_record(&header)?;

    for (i, date) in result.game_dates.iter().enumerate() {
        let mut row = vec![date.to_string()];
        for metric in Metric::ALL {
            let series = result.series.get(metric);
            let value = series
                .values()
                .get(i)
                .with_context(|| format!("{metric} series is shorter than the game list"))?;
            row.push(value.to_string());
        }
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Game log with matchup and outcome columns.
pub fn export_game_log_csv(log: &GameLog) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "game_id",
        "game_date",
        "matchup",
        "wl",
        "points",
        "rebounds",
        "assists",
        "blocks",
        "steals",
    ])?;
    for r in &log.records {
        wtr.write_record([
            r.game_id.to_string(),
            r.game_date.to_string(),
            r.matchup.clone(),
            r.outcome.map(|o| o.code().to_string()).unwrap_or_default(),
            r.points.to_string(),
            r.rebounds.to_string(),
            r.assists.to_string(),
            r.blocks.to_string(),
            r.steals.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown reports ───────────────────────────────────────────────

/// How tightly a metric's middle half clusters, judged by its IQR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    VeryConsistent,
    Moderate,
    HighVariance,
}

impl Consistency {
    /// Points swing more than the counting stats, so they get wider bands.
    pub fn rate(metric: Metric, iqr: f64) -> Self {
        let (tight, loose) = match metric {
            Metric::Points => (10.0, 15.0),
            _ => (3.0, 5.0),
        };
        if iqr < tight {
            Consistency::VeryConsistent
        } else if iqr < loose {
            Consistency::Moderate
        } else {
            Consistency::HighVariance
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Consistency::VeryConsistent => "Very consistent",
            Consistency::Moderate => "Moderate variance",
            Consistency::HighVariance => "High variance",
        }
    }
}

/// Generate a Markdown report for one distribution result.
pub fn generate_report(result: &DistributionResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# {} Distribution Report\n\n", result.player.full_name));

    md.push_str("## Scope\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Player | {} |\n", result.player));
    md.push_str(&format!("| Season | {} ({}) |\n", result.season, result.season_type));
    if let Some(team) = &result.opponent {
        md.push_str(&format!("| Opponent | {team} |\n"));
    }
    md.push_str(&format!("| Games | {} |\n", result.games_played));
    if let (Some(first), Some(last)) = (result.game_dates.first(), result.game_dates.last()) {
        md.push_str(&format!("| Dates | {first} to {last} |\n"));
    }
    md.push_str(&format!("| Dataset Hash | {} |\n", result.dataset_hash));
    md.push('\n');

    md.push_str("## Central Tendency\n\n");
    md.push_str("| Stat | Average | Std Dev | CV % |\n");
    md.push_str("| --- | ---: | ---: | ---: |\n");
    for (metric, series) in result.series.iter() {
        md.push_str(&central_row(metric, series));
    }
    md.push('\n');

    md.push_str("## Percentiles\n\n");
    md.push_str("| Stat | 25th | 50th | 75th | Max | IQR | Consistency |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: | --- |\n");
    for (metric, p) in result.percentiles.iter() {
        md.push_str(&percentile_row(metric, p));
    }

    md
}

fn central_row(metric: Metric, series: &MetricSeries) -> String {
    match CentralTendency::from_series(series) {
        Ok(ct) => format!(
            "| {} | {:.1} | {:.1} | {:.1}% |\n",
            metric.label(),
            ct.mean,
            ct.std_dev,
            ct.coefficient_of_variation()
        ),
        Err(_) => format!("| {} | - | - | - |\n", metric.label()),
    }
}

fn percentile_row(metric: Metric, p: &PercentileSet) -> String {
    let iqr = p.iqr();
    format!(
        "| {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {} |\n",
        metric.label(),
        p.p25,
        p.p50,
        p.p75,
        p.p100,
        iqr,
        Consistency::rate(metric, iqr).label()
    )
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one result.
///
/// Creates `{player}[_vs_{opponent}]_{season}_{timestamp}/` under
/// `output_dir` containing `report.json`, `series.csv`, and `report.md`.
/// Returns the created directory.
pub fn save_artifacts(result: &DistributionResult, output_dir: &Path) -> Result<PathBuf> {
    let stem = hoopstat_chart::chart_file_name(result);
    let stem = stem.trim_end_matches(".png");
    let dirname = format!("{stem}_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(result)?)?;
    std::fs::write(run_dir.join("series.csv"), export_series_csv(result)?)?;
    std::fs::write(run_dir.join("report.md"), generate_report(result))?;

    info!(dir = %run_dir.display(), "saved report artifacts");
    Ok(run_dir)
}

/// Load a report from an artifact directory's `report.json`.
pub fn load_artifacts(dir: &Path) -> Result<DistributionReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{get_distribution, get_game_log, Query};
    use crate::test_fixtures::curry_provider;
    use hoopstat_core::domain::Season;

    fn lakers_result() -> DistributionResult {
        let query = Query::new("Curry", Season::new(2023)).vs("LAL");
        get_distribution(&curry_provider(), &query).unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let result = lakers_result();
        let json = export_json(&result).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        let report = import_json(&json).unwrap();
        assert_eq!(report.result, result);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let json = export_json(&lakers_result()).unwrap();
        let bumped = json.replace("\"schema_version\": 1", "\"schema_version\": 99");
        let err = import_json(&bumped).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 99"));
    }

    #[test]
    fn test_series_csv() {
        let csv = export_series_csv(&lakers_result()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "game_date,PTS,REB,AST,BLK,STL");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2023-12-02,30,"));
        assert!(lines[3].starts_with("2023-12-20,50,"));
    }

    #[test]
    fn test_game_log_csv() {
        let log = get_game_log(&curry_provider(), &Query::new("Curry", Season::new(2023))).unwrap();
        let csv = export_game_log_csv(&log).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[2].contains("GSW @ SAC,L,24"));
    }

    #[test]
    fn test_consistency_bands() {
        assert_eq!(Consistency::rate(Metric::Points, 9.9), Consistency::VeryConsistent);
        assert_eq!(Consistency::rate(Metric::Points, 12.0), Consistency::Moderate);
        assert_eq!(Consistency::rate(Metric::Points, 15.0), Consistency::HighVariance);
        assert_eq!(Consistency::rate(Metric::Assists, 2.5), Consistency::VeryConsistent);
        assert_eq!(Consistency::rate(Metric::Rebounds, 4.0), Consistency::Moderate);
        assert_eq!(Consistency::rate(Metric::Steals, 5.0), Consistency::HighVariance);
    }

    #[test]
    fn test_report_tables() {
        let md = generate_report(&lakers_result());
        assert!(md.starts_with("# Stephen Curry Distribution Report"));
        assert!(md.contains("| Opponent | Los Angeles Lakers (LAL) |"));
        assert!(md.contains("| Games | 3 |"));
        // points 10, 30, 50: mean 30, population std 16.3, CV 54.4%
        assert!(md.contains("| Points | 30.0 | 16.3 | 54.4% |"));
        assert!(md.contains("| Points | 20.0 | 30.0 | 40.0 | 50.0 | 20.0 | High variance |"));
    }

    #[test]
    fn test_save_and_load_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let result = lakers_result();
        let run_dir = save_artifacts(&result, dir.path()).unwrap();
        let name = run_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("stephen_curry_vs_los_angeles_lakers_2023-24_"));
        for file in ["report.json", "series.csv", "report.md"] {
            assert!(run_dir.join(file).exists(), "missing {file}");
        }
        assert_eq!(load_artifacts(&run_dir).unwrap().result, result);
    }
}
