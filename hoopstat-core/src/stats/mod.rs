//! Distribution statistics over a filtered game log.

pub mod central;
pub mod percentile;

pub use central::{compute_central_tendency, CentralTendency, CentralTendencyResult};
pub use percentile::{compute_percentiles, percentile, PercentileSet};
