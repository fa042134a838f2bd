//! Labeled link graph.
//!
//! Pages are arbitrary ordered labels. Each page becomes one vertex of a
//! directed `algograph` graph and each outlink one edge, so the estimators
//! only ever see [`QueryableGraph`].

use crate::{Error, RankTable, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct LinkGraph<N> {
    graph: directed::TreeBackedGraph,
    ids: BTreeMap<N, VertexId>,
    labels: HashMap<VertexId, N, ahash::RandomState>,
}

impl<N: Ord + Clone> LinkGraph<N> {
    /// Builds the graph from a page -> outlinks mapping.
    ///
    /// Every outlink must itself be a key of `links`.
    pub fn from_links(links: &BTreeMap<N, BTreeSet<N>>) -> Result<Self>
    where
        N: std::fmt::Debug,
    {
        let mut graph = directed::TreeBackedGraph::new();
        let ids: BTreeMap<N, VertexId> = links
            .keys()
            .map(|page| (page.clone(), graph.add_vertex()))
            .collect();
        for (page, outs) in links.iter() {
            let u = ids[page];
            for out in outs.iter() {
                let Some(v) = ids.get(out) else {
                    return Err(Error::InvalidInput(format!(
                        "{page:?} links to {out:?}, which is not a page"
                    )));
                };
                graph.add_edge(u, *v);
            }
        }
        let labels = ids.iter().map(|(n, v)| (*v, n.clone())).collect();
        Ok(Self { graph, ids, labels })
    }

    pub fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn vertex(&self, page: &N) -> Option<VertexId> {
        self.ids.get(page).copied()
    }

    pub fn label(&self, v: &VertexId) -> Option<&N> {
        self.labels.get(v)
    }

    pub fn pages(&self) -> impl Iterator<Item = &N> + '_ {
        self.ids.keys()
    }

    pub fn outlinks(&self, page: &N) -> Option<BTreeSet<N>> {
        let u = self.vertex(page)?;
        Some(
            self.graph
                .out_edges(&u)
                .map(|e| self.labels[&e.sink].clone())
                .collect(),
        )
    }

    /// Relabels a vertex-keyed table. Vertices missing from `ranks` get 0.
    pub fn rank_table(&self, ranks: &HashMap<VertexId, f64, ahash::RandomState>) -> RankTable<N> {
        self.ids
            .iter()
            .map(|(page, v)| (page.clone(), ranks.get(v).copied().unwrap_or(0.0)))
            .collect()
    }
}
