use super::{transition::step, PageRank, PageRankResult};
use crate::{
    common::outlinks,
    error::{check_damping, check_not_empty},
    Error,
};
use algograph::graph::{QueryableGraph, VertexId};
use rand::{prelude::*, Rng};
use std::{cell::RefCell, collections::HashMap};

/// Random-surfer estimate: ranks are visit frequencies of one long walk.
pub struct SampledPageRank<R>
where
    R: Rng,
{
    damping: f64,
    samples: usize,
    vertices: Vec<VertexId>,
    outlinks: HashMap<VertexId, Vec<VertexId>, ahash::RandomState>,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<R: Rng> SampledPageRank<R> {
    pub fn new<G: QueryableGraph>(g: &G, config: &Config, rng: R) -> crate::Result<Self> {
        check_damping(config.damping)?;
        check_not_empty(g)?;
        if config.samples == 0 {
            return Err(Error::InvalidInput("samples=0".to_string()));
        }
        let mut vertices: Vec<_> = g.iter_vertices().collect();
        vertices.sort();
        let outlinks = vertices.iter().map(|u| (*u, outlinks(g, u))).collect();
        Ok(Self {
            damping: config.damping,
            samples: config.samples,
            vertices,
            outlinks,
            rng: RefCell::new(rng),
        })
    }
}

impl<R: Rng> PageRank for SampledPageRank<R> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = self.rng.borrow_mut();
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0usize)).collect();
        let mut cur = *self
            .vertices
            .choose(&mut *rng)
            .ok_or_else(|| Error::InvalidInput("graph has no pages".to_string()))?;
        for _ in 0..self.samples {
            *visits.entry(cur).or_insert(0) += 1;
            let outs = self.outlinks.get(&cur).map(Vec::as_slice).unwrap_or(&[]);
            cur = step(&self.vertices, outs, self.damping)?.sample(&mut *rng)?;
        }
        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        tracing::debug!(
            samples = self.samples,
            vertices = self.vertices.len(),
            "random walk finished"
        );
        Ok(Self::Result {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a, G: QueryableGraph> {
    graph: &'a G,
    result: &'a self::Result,
}

impl<G: QueryableGraph> std::fmt::Debug for ResultDebug<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).copied().unwrap_or_default();
            let c = self.result.visits.get(&v).copied().unwrap_or_default();
            writeln!(f, "{v:?}: {p:?}, {c}/{}", self.result.samples)?;
        }
        Ok(())
    }
}
