//! Hoopstat Runner — query orchestration, configuration, batch runs, reports.
//!
//! This crate builds on `hoopstat-core` and `hoopstat-chart` to provide:
//! - The public query surface (distribution, central tendency, plot, game log)
//! - TOML configuration and provider construction
//! - Parallel batch queries with input-order results
//! - JSON, CSV, and Markdown export

pub mod batch;
pub mod config;
pub mod export;
pub mod query;

#[cfg(test)]
mod test_fixtures;

pub use batch::{run_batch, season_queries, BatchItem, BatchRunner};
pub use config::{default_config_path, ConfigError, HoopstatConfig, ProviderKind};
pub use export::{
    export_game_log_csv, export_json, export_series_csv, generate_report, import_json, load_artifacts,
    save_artifacts, Consistency, DistributionReport, SCHEMA_VERSION,
};
pub use query::{
    get_central_tendency, get_distribution, get_game_log, plot_distribution, GameLog, Query, QueryError,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn query_types_are_send_sync() {
        assert_send::<Query>();
        assert_sync::<Query>();
        assert_send::<QueryError>();
        assert_sync::<QueryError>();
    }

    #[test]
    fn result_types_are_send_sync() {
        assert_send::<GameLog>();
        assert_sync::<GameLog>();
        assert_send::<DistributionReport>();
        assert_sync::<DistributionReport>();
        assert_send::<BatchItem<hoopstat_core::DistributionResult>>();
        assert_sync::<BatchItem<hoopstat_core::DistributionResult>>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<HoopstatConfig>();
        assert_sync::<HoopstatConfig>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
    }
}
