use algograph::graph::*;
use std::{collections::HashMap, hash::Hash};

pub fn norm_1<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

pub fn mass<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().sum()
}

/// Every vertex at `1/n`.
pub fn uniform<G: QueryableGraph>(g: &G) -> HashMap<VertexId, f64, ahash::RandomState> {
    let n = g.vertex_size() as f64;
    g.iter_vertices().map(|v| (v, 1.0 / n)).collect()
}

/// Distinct sinks of the out-edges of `u`, in ascending order.
pub fn outlinks<G: QueryableGraph>(g: &G, u: &VertexId) -> Vec<VertexId> {
    let mut vs: Vec<_> = g.out_edges(u).map(|e| e.sink).collect();
    vs.sort();
    vs.dedup();
    vs
}
