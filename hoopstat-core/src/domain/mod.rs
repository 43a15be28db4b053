//! Domain types for hoopstat

pub mod game;
pub mod identity;
pub mod ids;
pub mod metric;
pub mod season;

pub use game::{GameRecord, Matchup, MatchupParseError, Outcome, Venue};
pub use identity::{PlayerIdentity, TeamIdentity};
pub use ids::{GameId, PlayerId, TeamId};
pub use metric::{Metric, MetricSeries, PerMetric};
pub use season::{Season, SeasonType};
