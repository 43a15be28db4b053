//! Batch queries — many independent queries against one provider.
//!
//! Queries share nothing but the provider, so they run on the rayon pool.
//! Results come back in input order regardless of completion order, and one
//! failing query never aborts the rest.

use rayon::prelude::*;
use tracing::info;

use hoopstat_core::data::StatsProvider;
use hoopstat_core::domain::Season;
use hoopstat_core::DistributionResult;

use crate::query::{get_distribution, Query, QueryError};

/// One query's outcome, paired with the query that produced it.
#[derive(Debug)]
pub struct BatchItem<T> {
    pub query: Query,
    pub outcome: Result<T, QueryError>,
}

/// Runs a list of queries, in parallel by default.
pub struct BatchRunner<'a> {
    provider: &'a dyn StatsProvider,
    parallel: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(provider: &'a dyn StatsProvider) -> Self {
        Self {
            provider,
            parallel: true,
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run `op` for every query. Output order matches `queries`.
    pub fn run<T, F>(&self, queries: &[Query], op: F) -> Vec<BatchItem<T>>
    where
        T: Send,
        F: Fn(&dyn StatsProvider, &Query) -> Result<T, QueryError> + Send + Sync,
    {
        let provider = self.provider;
        let items: Vec<BatchItem<T>> = if self.parallel {
            queries
                .par_iter()
                .map(|q| BatchItem {
                    query: q.clone(),
                    outcome: op(provider, q),
                })
                .collect()
        } else {
            queries
                .iter()
                .map(|q| BatchItem {
                    query: q.clone(),
                    outcome: op(provider, q),
                })
                .collect()
        };

        let failed = items.iter().filter(|i| i.outcome.is_err()).count();
        info!(
            provider = provider.name(),
            queries = items.len(),
            failed,
            "batch complete"
        );
        items
    }
}

/// Distribution for every query, in parallel, in input order.
pub fn run_batch(
    provider: &dyn StatsProvider,
    queries: &[Query],
) -> Vec<BatchItem<DistributionResult>> {
    BatchRunner::new(provider).run(queries, get_distribution)
}

/// The same query across several seasons, in the order given.
pub fn season_queries(base: &Query, seasons: &[Season]) -> Vec<Query> {
    seasons.iter().map(|&s| base.for_season(s)).collect()
}
