//! The two PageRank estimators over a [`LinkGraph`].
//!
//! [`sample_rank`] simulates a random surfer and counts visits.
//! [`iterate_rank`] solves the PageRank equation by power iteration.
//! Both share the surfer model of [`transition()`].

pub mod iterated;
pub mod sampled;
mod traits;
pub mod transition;

pub use self::traits::*;
pub use self::transition::{transition, Distribution};

use crate::{Error, LinkGraph, RankTable};
use rand::Rng;
use std::collections::BTreeMap;

pub fn sample_rank<N, R>(
    graph: &LinkGraph<N>,
    config: &sampled::Config,
    rng: R,
) -> crate::Result<RankTable<N>>
where
    N: Ord + Clone,
    R: Rng,
{
    let spr = sampled::SampledPageRank::new(graph.graph(), config, rng)?;
    let res = spr.calc()?;
    Ok(graph.rank_table(res.page_rank()))
}

pub fn iterate_rank<N>(
    graph: &LinkGraph<N>,
    config: &iterated::Config,
) -> crate::Result<RankTable<N>>
where
    N: Ord + Clone,
{
    let ipr = iterated::IteratedPageRank::new(graph.graph(), config)?;
    let res = ipr.calc()?;
    tracing::info!(sweeps = res.sweeps, "iteration converged");
    Ok(graph.rank_table(res.page_rank()))
}

impl<N: Ord + Clone> LinkGraph<N> {
    /// Next-page distribution of the random surfer standing on `page`.
    pub fn transition(&self, page: &N, damping: f64) -> crate::Result<BTreeMap<N, f64>> {
        let u = self
            .vertex(page)
            .ok_or_else(|| Error::InvalidInput("page is not in the graph".to_string()))?;
        let dist = transition(self.graph(), &u, damping)?;
        Ok(dist
            .iter()
            .filter_map(|(v, p)| self.label(&v).map(|n| (n.clone(), p)))
            .collect())
    }
}
