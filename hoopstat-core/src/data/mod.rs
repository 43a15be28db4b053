//! Stats providers: remote API, CSV directory, in-memory fixtures.

pub mod circuit_breaker;
pub mod csv_import;
pub mod memory;
pub mod nba;
pub mod provider;
pub mod teams;

pub use circuit_breaker::CircuitBreaker;
pub use csv_import::CsvProvider;
pub use memory::InMemoryProvider;
pub use nba::{NbaStatsConfig, NbaStatsProvider};
pub use provider::{ProviderError, StatsProvider};
pub use teams::nba_teams;
