//! Hoopstat CLI — player distribution queries from the terminal.
//!
//! Commands:
//! - `stats` — mean and standard deviation per metric
//! - `percentiles` — 25th/50th/75th/max per metric, optional chart and export
//! - `log` — the filtered game log with a win/loss and home/away summary
//! - `compare` — one player across several seasons, queried in parallel
//! - `snapshot` — copy players and game logs from the stats API into a CSV directory
//! - `charts clean` — remove generated chart images

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use hoopstat_chart::chart_file_name;
use hoopstat_core::data::{CircuitBreaker, CsvProvider, NbaStatsProvider, StatsProvider};
use hoopstat_core::domain::{GameRecord, Metric, Season, SeasonType};
use hoopstat_core::resolve::PlayerDirectory;
use hoopstat_core::stats::CentralTendency;
use hoopstat_core::{CentralTendencyReport, DistributionResult};
use hoopstat_runner::batch::BatchRunner;
use hoopstat_runner::{
    export_game_log_csv, export_json, export_series_csv, generate_report, get_central_tendency, get_distribution,
    get_game_log, plot_distribution, save_artifacts, season_queries, GameLog, HoopstatConfig, Query,
};

#[derive(Parser)]
#[command(
    name = "hoopstat",
    version,
    about = "Hoopstat CLI — NBA player stat distributions, optionally against one opponent"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/hoopstat/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read snapshots from this directory instead of the configured provider.
    #[arg(long, global = true, value_name = "DATA_DIR")]
    offline: Option<PathBuf>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Who and when; shared by the query commands.
#[derive(clap::Args)]
struct QueryArgs {
    /// Player name or part of it (e.g. "Curry", "Jokic").
    player: String,

    /// Season as YYYY-YY. Defaults to the configured season.
    #[arg(long, short)]
    season: Option<Season>,

    /// regular, playoffs, playin, or preseason. Defaults to the configured type.
    #[arg(long)]
    season_type: Option<SeasonType>,

    /// Only games against this team (abbreviation, nickname, or full name).
    #[arg(long = "vs", value_name = "TEAM")]
    opponent: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Md,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean and population standard deviation per metric.
    Stats {
        #[command(flatten)]
        query: QueryArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Percentiles per metric, with optional chart and export.
    Percentiles {
        #[command(flatten)]
        query: QueryArgs,

        /// Render the box plot figure (interactive unless --out or --save).
        #[arg(long, default_value_t = false)]
        plot: bool,

        /// Write the figure to this PNG file instead of showing it.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Write the figure under the configured chart directory with its default name.
        #[arg(long, default_value_t = false, conflicts_with = "out")]
        save: bool,

        /// Print the result in this format instead of a table.
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,

        /// Save report.json, series.csv, and report.md under this directory.
        #[arg(long, value_name = "DIR")]
        artifacts: Option<PathBuf>,
    },
    /// Game log with win/loss and home/away summary.
    Log {
        #[command(flatten)]
        query: QueryArgs,

        /// Show only the most recent N games.
        #[arg(long, value_name = "N")]
        last: Option<usize>,

        /// Print CSV instead of a table.
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
    /// One player across several seasons.
    Compare {
        /// Player name or part of it.
        player: String,

        /// Seasons to compare (e.g. 2022-23 2023-24).
        #[arg(long, short, required = true, num_args = 1..)]
        seasons: Vec<Season>,

        #[arg(long)]
        season_type: Option<SeasonType>,

        /// Only games against this team.
        #[arg(long = "vs", value_name = "TEAM")]
        opponent: Option<String>,
    },
    /// Copy players and game logs from the stats API into a CSV directory.
    Snapshot {
        /// Players to snapshot.
        #[arg(required = true)]
        players: Vec<String>,

        #[arg(long, short, required = true, num_args = 1..)]
        seasons: Vec<Season>,

        #[arg(long)]
        season_type: Option<SeasonType>,

        /// Target directory. Defaults to the configured provider.data_dir.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Chart directory management.
    Charts {
        #[command(subcommand)]
        action: ChartsAction,
    },
}

#[derive(Subcommand)]
enum ChartsAction {
    /// Remove generated PNG charts.
    Clean {
        /// Chart directory. Defaults to the configured charts.output_dir.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Actually delete (without this flag, only previews what would be removed).
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = HoopstatConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let offline = cli.offline;

    match cli.command {
        Commands::Stats { query, json } => {
            let provider = open_provider(&config, offline.as_deref())?;
            run_stats(provider.as_ref(), &config, query, json)
        }
        Commands::Percentiles {
            query,
            plot,
            out,
            save,
            export,
            artifacts,
        } => {
            let provider = open_provider(&config, offline.as_deref())?;
            let opts = PercentileOpts {
                plot,
                out,
                save,
                export,
                artifacts,
            };
            run_percentiles(provider.as_ref(), &config, query, opts)
        }
        Commands::Log { query, last, csv } => {
            let provider = open_provider(&config, offline.as_deref())?;
            run_log(provider.as_ref(), &config, query, last, csv)
        }
        Commands::Compare {
            player,
            seasons,
            season_type,
            opponent,
        } => {
            let provider = open_provider(&config, offline.as_deref())?;
            let mut base = Query::new(player, config.query.season)
                .with_season_type(season_type.unwrap_or(config.query.season_type));
            base.opponent = opponent;
            run_compare(provider.as_ref(), &base, &seasons)
        }
        Commands::Snapshot {
            players,
            seasons,
            season_type,
            data_dir,
        } => {
            let target = data_dir.unwrap_or_else(|| config.provider.data_dir.clone());
            let season_type = season_type.unwrap_or(config.query.season_type);
            run_snapshot(&config, &players, &seasons, season_type, &target)
        }
        Commands::Charts { action } => match action {
            ChartsAction::Clean { dir, confirm } => {
                let dir = dir.unwrap_or_else(|| config.charts.output_dir.clone());
                run_charts_clean(&dir, confirm)
            }
        },
    }
}

/// Logs go to stderr so stdout stays clean for tables and exports.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_provider(config: &HoopstatConfig, offline: Option<&Path>) -> Result<Box<dyn StatsProvider>> {
    let provider: Box<dyn StatsProvider> = match offline {
        Some(dir) => Box::new(CsvProvider::new(dir)),
        None => config.provider.build().context("failed to set up stats provider")?,
    };
    info!(provider = provider.name(), "provider ready");
    Ok(provider)
}

fn build_query(args: QueryArgs, config: &HoopstatConfig) -> Query {
    let mut query = Query::new(args.player, args.season.unwrap_or(config.query.season))
        .with_season_type(args.season_type.unwrap_or(config.query.season_type));
    query.opponent = args.opponent;
    query
}

// ─── stats ──────────────────────────────────────────────────────────

fn run_stats(provider: &dyn StatsProvider, config: &HoopstatConfig, args: QueryArgs, json: bool) -> Result<()> {
    let query = build_query(args, config);
    let report = get_central_tendency(provider, &query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_central_tendency(&report);
    }
    Ok(())
}

fn print_central_tendency(report: &CentralTendencyReport) {
    println!();
    println!("=== {} ===", report.scope);
    println!("Games:  {}", report.stats.games_played);
    println!();
    println!("{:<10} {:>8} {:>8} {:>8}", "Stat", "Average", "Std Dev", "CV %");
    println!("{}", "-".repeat(37));
    for (metric, ct) in report.stats.metrics.iter() {
        println!(
            "{:<10} {:>8.1} {:>8.1} {:>7.1}%",
            metric.label(),
            ct.mean,
            ct.std_dev,
            ct.coefficient_of_variation()
        );
    }
    println!();
}

// ─── percentiles ────────────────────────────────────────────────────

struct PercentileOpts {
    plot: bool,
    out: Option<PathBuf>,
    save: bool,
    export: Option<ExportFormat>,
    artifacts: Option<PathBuf>,
}

fn run_percentiles(
    provider: &dyn StatsProvider,
    config: &HoopstatConfig,
    args: QueryArgs,
    opts: PercentileOpts,
) -> Result<()> {
    let query = build_query(args, config);
    let wants_chart = opts.plot || opts.out.is_some() || opts.save;

    let result = if !wants_chart {
        get_distribution(provider, &query)?
    } else if let Some(path) = opts.out.as_deref() {
        let result = plot_distribution(provider, &query, Some(path))?;
        eprintln!("Chart saved to: {}", path.display());
        result
    } else if opts.save {
        let result = get_distribution(provider, &query)?;
        let path = config.charts.output_dir.join(chart_file_name(&result));
        let result = hoopstat_chart::render(result, Some(path.as_path()))?;
        eprintln!("Chart saved to: {}", path.display());
        result
    } else {
        plot_distribution(provider, &query, None)?
    };

    match opts.export {
        Some(ExportFormat::Json) => println!("{}", export_json(&result)?),
        Some(ExportFormat::Csv) => print!("{}", export_series_csv(&result)?),
        Some(ExportFormat::Md) => print!("{}", generate_report(&result)),
        None => print_percentiles(&result),
    }

    if let Some(dir) = &opts.artifacts {
        let run_dir = save_artifacts(&result, dir)?;
        eprintln!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn print_percentiles(result: &DistributionResult) {
    println!();
    println!("=== {} ===", result.scope());
    println!("Games:  {}", result.games_played);
    println!();
    println!(
        "{:<10} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "Stat", "25th", "50th", "75th", "Max", "Min"
    );
    println!("{}", "-".repeat(50));
    for (metric, p) in result.percentiles.iter() {
        let min = result.series.get(metric).min().unwrap_or(0);
        println!(
            "{:<10} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7}",
            metric.label(),
            p.p25,
            p.p50,
            p.p75,
            p.p100,
            min
        );
    }
    println!();
}

// ─── log ────────────────────────────────────────────────────────────

fn run_log(
    provider: &dyn StatsProvider,
    config: &HoopstatConfig,
    args: QueryArgs,
    last: Option<usize>,
    csv: bool,
) -> Result<()> {
    let query = build_query(args, config);
    let mut log = get_game_log(provider, &query)?;
    if let Some(n) = last {
        let skip = log.records.len().saturating_sub(n);
        log.records.drain(..skip);
        log.summary = hoopstat_core::GameLogSummary::from_records(&log.records);
    }

    if csv {
        print!("{}", export_game_log_csv(&log)?);
    } else {
        print_game_log(&log);
    }
    Ok(())
}

fn print_game_log(log: &GameLog) {
    println!();
    println!("=== {} ===", log.scope);
    println!();
    println!(
        "{:<14} {:<14} {:<3} {:>4} {:>4} {:>4} {:>4} {:>4}",
        "Date", "Matchup", "W/L", "PTS", "REB", "AST", "BLK", "STL"
    );
    println!("{}", "-".repeat(60));
    // newest first, like a box score page
    for r in log.records.iter().rev() {
        print_game_row(r);
    }

    let s = &log.summary;
    println!();
    print!("Games: {}   Record: {}-{}", s.total_games, s.wins, s.losses);
    if let Some(pct) = s.win_pct() {
        print!(" ({:.1}%)", pct * 100.0);
    }
    println!("   Home: {}   Away: {}", s.home_games, s.away_games);
    println!();
}

fn print_game_row(r: &GameRecord) {
    println!(
        "{:<14} {:<14} {:<3} {:>4} {:>4} {:>4} {:>4} {:>4}",
        r.game_date.format("%b %d, %Y"),
        r.matchup,
        r.outcome.map(|o| o.code()).unwrap_or("-"),
        r.points,
        r.rebounds,
        r.assists,
        r.blocks,
        r.steals
    );
}

// ─── compare ────────────────────────────────────────────────────────

fn run_compare(provider: &dyn StatsProvider, base: &Query, seasons: &[Season]) -> Result<()> {
    let queries = season_queries(base, seasons);
    let items = BatchRunner::new(provider).run(&queries, get_central_tendency);

    println!();
    print!("{:<9} {:>5}", "Season", "Games");
    for metric in Metric::ALL {
        print!(" {:>12}", metric.label());
    }
    println!();
    println!("{}", "-".repeat(15 + 13 * Metric::ALL.len()));

    let mut failures = 0usize;
    for item in &items {
        match &item.outcome {
            Ok(report) => {
                print!("{:<9} {:>5}", item.query.season.to_string(), report.stats.games_played);
                for metric in Metric::ALL {
                    print!(" {:>12}", format_mean_std(report.stats.metrics.get(metric)));
                }
                println!();
            }
            Err(e) if e.is_no_data() => {
                println!("{:<9} {:>5}  no games", item.query.season.to_string(), 0);
            }
            Err(e) => {
                failures += 1;
                println!("{:<9} error: {e}", item.query.season.to_string());
            }
        }
    }
    println!();

    if failures == items.len() {
        bail!("every season failed for '{}'", base.player);
    }
    Ok(())
}

fn format_mean_std(ct: &CentralTendency) -> String {
    format!("{:.1} ± {:.1}", ct.mean, ct.std_dev)
}

// ─── snapshot ───────────────────────────────────────────────────────

fn run_snapshot(
    config: &HoopstatConfig,
    players: &[String],
    seasons: &[Season],
    season_type: SeasonType,
    target: &Path,
) -> Result<()> {
    let breaker = Arc::new(CircuitBreaker::default_provider());
    let remote = NbaStatsProvider::new(config.provider.nba_config()?, breaker)
        .context("failed to set up stats API client")?;
    let store = CsvProvider::new(target);

    let directory = PlayerDirectory::new(remote.players()?);
    let mut resolved = Vec::with_capacity(players.len());
    for name in players {
        resolved.push(directory.resolve(name)?);
    }
    store.store_players(&resolved)?;

    let mut errors = Vec::new();
    for player in &resolved {
        for &season in seasons {
            match remote.game_log(player.id, season, season_type) {
                Ok(records) => {
                    let path = store.store_game_log(player.id, season, season_type, &records)?;
                    println!("{:<24} {season}  {:>3} games  {}", player.full_name, records.len(), path.display());
                }
                Err(e) => errors.push(format!("{} {season}: {e}", player.full_name)),
            }
        }
    }

    if !errors.is_empty() {
        for e in &errors {
            eprintln!("Error for {e}");
        }
        bail!("{} of {} game logs failed", errors.len(), resolved.len() * seasons.len());
    }
    println!("Snapshot written to: {}", target.display());
    Ok(())
}

// ─── charts clean ───────────────────────────────────────────────────

fn run_charts_clean(dir: &Path, confirm: bool) -> Result<()> {
    if !dir.exists() {
        println!("Chart directory does not exist: {}", dir.display());
        return Ok(());
    }

    let mut to_remove: Vec<(PathBuf, u64)> = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if path.is_file() && is_png {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            to_remove.push((path, size));
        }
    }
    to_remove.sort();

    if to_remove.is_empty() {
        println!("No charts to remove in {}", dir.display());
        return Ok(());
    }

    let total: u64 = to_remove.iter().map(|(_, size)| size).sum();
    println!("Found {} chart(s), {}:", to_remove.len(), format_size(total));
    for (path, size) in &to_remove {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!("  {name} ({})", format_size(*size));
    }

    if !confirm {
        println!();
        println!("Dry run — pass --confirm to actually delete.");
        return Ok(());
    }

    for (path, _) in &to_remove {
        std::fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    }
    println!("Done. Removed {} chart(s).", to_remove.len());
    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
