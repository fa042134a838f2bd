use crate::{common::outlinks, Error};
use algograph::graph::*;
use rand::{
    distr::{weighted::WeightedIndex, Distribution as _},
    Rng,
};

const MASS_EPSILON: f64 = 1e-9;

/// Probability of moving to each vertex next. Sorted by vertex.
#[derive(Debug, Clone)]
pub struct Distribution {
    probs: Vec<(VertexId, f64)>,
}

impl Distribution {
    /// Accepts non-negative finite probabilities over distinct vertices whose
    /// total is 1.
    pub fn new(mut probs: Vec<(VertexId, f64)>) -> crate::Result<Self> {
        if probs.is_empty() {
            return Err(Error::InvalidInput("empty distribution".to_string()));
        }
        if let Some((v, p)) = probs.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
            return Err(Error::InvalidInput(format!("probability of {v:?} is {p}")));
        }
        let total: f64 = probs.iter().map(|(_, p)| p).sum();
        if (total - 1.0).abs() > MASS_EPSILON {
            return Err(Error::InvalidInput(format!(
                "probabilities sum to {total}"
            )));
        }
        probs.sort_by_key(|(v, _)| *v);
        if probs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(Error::InvalidInput(
                "duplicated vertex in distribution".to_string(),
            ));
        }
        Ok(Self { probs })
    }

    pub fn get(&self, v: &VertexId) -> f64 {
        match self.probs.binary_search_by_key(v, |(u, _)| *u) {
            Ok(i) => self.probs[i].1,
            Err(_) => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.probs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Weighted random choice of the next vertex.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<VertexId> {
        let index = WeightedIndex::<f64>::new(self.probs.iter().map(|(_, p)| *p))
            .map_err(|e| Error::InvalidInput(format!("cannot sample: {e}")))?;
        Ok(self.probs[index.sample(rng)].0)
    }
}

/// The random surfer's next step from `u`.
///
/// With probability `damping` the surfer follows one of `u`'s outlinks,
/// otherwise it jumps to any vertex. A vertex without outlinks is treated
/// as linking to every vertex.
pub fn transition<G: QueryableGraph>(
    g: &G,
    u: &VertexId,
    damping: f64,
) -> crate::Result<Distribution> {
    if !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidInput(format!(
            "damping={damping}, expected a value in [0, 1]"
        )));
    }
    if !g.contains_vertex(u) {
        return Err(Error::InvalidInput(format!("{u:?} is not a vertex")));
    }
    let mut vertices: Vec<_> = g.iter_vertices().collect();
    vertices.sort();
    let outs = outlinks(g, u);
    step(&vertices, &outs, damping)
}

/// `vertices` and `outs` must be sorted.
pub(crate) fn step(
    vertices: &[VertexId],
    outs: &[VertexId],
    damping: f64,
) -> crate::Result<Distribution> {
    let referenced = if outs.is_empty() { vertices } else { outs };
    let jump = (1.0 - damping) / (vertices.len() as f64);
    let follow = damping / (referenced.len() as f64);
    let probs = vertices
        .iter()
        .map(|v| {
            if referenced.binary_search(v).is_ok() {
                (*v, jump + follow)
            } else {
                (*v, jump)
            }
        })
        .collect();
    Distribution::new(probs)
}
