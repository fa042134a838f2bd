use super::*;
use crate::{
    common::*,
    error::{check_damping, check_not_empty},
    Error,
};
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::{BTreeMap, HashMap};

pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    tolerance: f64,
    max_sweeps: usize,
    convergence: Convergence,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    dangling: Vec<VertexId>,
}

/// How the change between two sweeps is measured against the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convergence {
    /// Every vertex moved by less than the tolerance.
    #[default]
    PerNode,
    /// The total movement over all vertices is less than the tolerance.
    L1,
}

impl Convergence {
    pub fn residual(&self, delta: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
        match self {
            Self::PerNode => norm_inf(delta),
            Self::L1 => norm_1(delta),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub tolerance: f64,
    pub max_sweeps: usize,
    pub convergence: Convergence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 0.001,
            max_sweeps: 10_000,
            convergence: Convergence::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub sweeps: usize,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        check_damping(damping)?;
        check_not_empty(g)?;
        let tolerance = config.tolerance;
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(Error::InvalidInput(format!("tolerance={tolerance}")));
        }
        if config.max_sweeps == 0 {
            return Err(Error::InvalidInput("max_sweeps=0".to_string()));
        }
        let mut dangling = vec![];
        let mut transitions = BTreeMap::new();
        for u in g.iter_vertices() {
            let outs = outlinks(g, &u);
            if outs.is_empty() {
                dangling.push(u);
                continue;
            }
            let unit = 1.0 / (outs.len() as f64);
            for v in outs {
                transitions.insert((u, v), unit);
            }
        }
        Ok(Self {
            graph: g,
            damping,
            tolerance,
            max_sweeps: config.max_sweeps,
            convergence: config.convergence,
            transitions,
            dangling,
        })
    }

    /// One simultaneous application of the PageRank equation to `p`.
    ///
    /// Mass on dangling vertices is spread evenly over all vertices.
    pub fn sweep(
        &self,
        p: &HashMap<VertexId, f64, ahash::RandomState>,
    ) -> HashMap<VertexId, f64, ahash::RandomState> {
        let damping = self.damping;
        let n = self.graph.vertex_size() as f64;
        let dangling: f64 = self
            .dangling
            .iter()
            .map(|v| p.get(v).copied().unwrap_or(0.0))
            .sum();
        let base = (1.0 - damping) / n + damping * dangling / n;
        let mut r: HashMap<_, _, ahash::RandomState> =
            self.graph.iter_vertices().map(|v| (v, base)).collect();
        for ((v0, v1), w) in self.transitions.iter() {
            let from = p.get(v0).copied().unwrap_or(0.0);
            if let Some(to) = r.get_mut(v1) {
                *to += damping * from * w;
            }
        }
        r
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut p = uniform(self.graph);
        let mut residual = f64::INFINITY;
        for sweeps in 1..=self.max_sweeps {
            let r = self.sweep(&p);
            let delta: HashMap<_, _, ahash::RandomState> = self
                .graph
                .iter_vertices()
                .map(|v| {
                    let a = p.get(&v).copied().unwrap_or(0.0);
                    let b = r.get(&v).copied().unwrap_or(0.0);
                    (v, a - b)
                })
                .collect();
            residual = self.convergence.residual(&delta);
            tracing::trace!(sweeps, residual, "sweep");
            if residual < self.tolerance {
                tracing::debug!(sweeps, residual, "converged");
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    sweeps,
                });
            }
            p = r;
        }
        tracing::warn!(sweeps = self.max_sweeps, residual, "gave up converging");
        Err(Error::NonConvergence {
            sweeps: self.max_sweeps,
            residual,
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
        writeln!(f, "after {} sweeps", self.result.sweeps)?;
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).copied().unwrap_or_default();
            let d = self.result.delta.get(&v).copied().unwrap_or_default();
            writeln!(f, "{v:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use quickcheck_macros::quickcheck;

    fn solve<'a, G: QueryableGraph>(
        g: &'a G,
        config: &Config,
    ) -> (IteratedPageRank<'a, G>, super::Result) {
        let ipr = IteratedPageRank::new(g, config).unwrap();
        let res = ipr.calc().unwrap();
        (ipr, res)
    }

    #[test]
    fn three_cycle_is_even() {
        let g = link_graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        let (_, res) = solve(g.graph(), &Config::default());
        for p in res.page_rank.values() {
            assert!((p - 1.0 / 3.0).abs() < 1e-3, "{:?}", res.debug(g.graph()));
        }
    }

    #[test]
    fn two_cycle_is_even() {
        let g = cycle(2);
        let (_, res) = solve(g.graph(), &Config::default());
        assert_eq!(res.sweeps, 1);
        for p in res.page_rank.values() {
            assert!((p - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn dangling_mass_is_redistributed() {
        let g = link_graph(&[("A", &["B", "C"]), ("B", &[]), ("C", &["A"])]);
        let (_, res) = solve(g.graph(), &Config::default());
        let at = |page: &str| res.page_rank[&g.vertex(&page.to_string()).unwrap()];
        assert!((mass(&res.page_rank) - 1.0).abs() < 1e-9);
        assert!((at("A") - 0.3941).abs() < 0.005, "{:?}", res.debug(g.graph()));
        assert!((at("B") - 0.3030).abs() < 0.005, "{:?}", res.debug(g.graph()));
        assert!((at("B") - at("C")).abs() < 1e-12);
    }

    #[test]
    fn dangling_sweep_keeps_mass() {
        let g = link_graph(&[("A", &["B"]), ("B", &[]), ("C", &[])]);
        let ipr = IteratedPageRank::new(g.graph(), &Config::default()).unwrap();
        let a = g.vertex(&"A".to_string()).unwrap();
        let start: HashMap<_, _, ahash::RandomState> = g
            .graph()
            .iter_vertices()
            .map(|v| (v, if v == a { 0.0 } else { 0.5 }))
            .collect();
        let next = ipr.sweep(&start);
        assert!((mass(&next) - 1.0).abs() < 1e-12, "{next:?}");
    }

    #[test]
    fn extra_sweep_stays_converged() {
        let g = link_graph(&[("A", &["B", "C"]), ("B", &[]), ("C", &["A"])]);
        for convergence in [Convergence::PerNode, Convergence::L1] {
            let cfg = Config {
                convergence,
                ..Default::default()
            };
            let (ipr, res) = solve(g.graph(), &cfg);
            let next = ipr.sweep(&res.page_rank);
            let delta: HashMap<_, _, ahash::RandomState> = next
                .iter()
                .map(|(v, x)| (*v, x - res.page_rank[v]))
                .collect();
            assert!(convergence.residual(&delta) < cfg.tolerance, "{convergence:?}");
        }
    }

    #[test]
    fn l1_is_stricter() {
        let g = link_graph(&[("A", &["B", "C"]), ("B", &[]), ("C", &["A"])]);
        let (_, per_node) = solve(g.graph(), &Config::default());
        let cfg = Config {
            convergence: Convergence::L1,
            ..Default::default()
        };
        let (_, l1) = solve(g.graph(), &cfg);
        assert_eq!(per_node.sweeps, 10);
        assert_eq!(l1.sweeps, 11);
    }

    #[test]
    fn gives_up_after_max_sweeps() {
        let g = link_graph(&[("A", &["B", "C"]), ("B", &[]), ("C", &["A"])]);
        let cfg = Config {
            tolerance: 1e-12,
            max_sweeps: 3,
            ..Default::default()
        };
        let ipr = IteratedPageRank::new(g.graph(), &cfg).unwrap();
        match ipr.calc() {
            Err(Error::NonConvergence { sweeps, residual }) => {
                assert_eq!(sweeps, 3);
                assert!(residual >= 1e-12);
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn rejects_bad_config() {
        let g = cycle(3);
        let bad = [
            Config {
                damping: 1.0,
                ..Default::default()
            },
            Config {
                damping: 0.0,
                ..Default::default()
            },
            Config {
                tolerance: 0.0,
                ..Default::default()
            },
            Config {
                tolerance: f64::NAN,
                ..Default::default()
            },
            Config {
                max_sweeps: 0,
                ..Default::default()
            },
        ];
        for cfg in bad.iter() {
            let res = IteratedPageRank::new(g.graph(), cfg);
            assert!(matches!(res, Err(Error::InvalidInput(_))), "{cfg:?}");
        }
        let empty = crate::LinkGraph::<usize>::from_links(&Default::default()).unwrap();
        let res = IteratedPageRank::new(empty.graph(), &Config::default());
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[quickcheck]
    fn sums_to_one(g: RandomGraph, damping: Damping) {
        let g = g.graph.graph();
        let cfg = Config {
            damping: damping.0.min(0.95),
            ..Default::default()
        };
        let (ipr, res) = solve(g, &cfg);
        assert!((mass(&res.page_rank) - 1.0).abs() < 1e-9, "{:?}", res.debug(g));
        assert!(res.page_rank.values().all(|p| *p > 0.0));
        let next = ipr.sweep(&res.page_rank);
        assert!((mass(&next) - 1.0).abs() < 1e-9);
    }
}
