//! Hoopstat Core — player distribution and filtering engine.
//!
//! The pipeline is a chain of pure value transformations:
//! - Identity resolution (free-text player/team names to canonical ids)
//! - Game log filtering by opponent
//! - Central tendency (mean, population std dev) and percentile calculators
//! - Result assembly with raw per-metric series and metadata
//!
//! Data comes from a [`data::StatsProvider`]: the public stats API, a CSV
//! directory, or an in-memory fixture. The engine never retries or caches
//! provider calls.

pub mod assemble;
pub mod data;
pub mod domain;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod resolve;
pub mod stats;
pub mod summary;

pub use assemble::{assemble, assemble_central_tendency, CentralTendencyReport, DistributionResult, QueryScope};
pub use error::{AnalysisError, EntityKind};
pub use filter::filter_by_opponent;
pub use resolve::{IdentityResolver, PlayerDirectory, TeamDirectory};
pub use summary::GameLogSummary;
