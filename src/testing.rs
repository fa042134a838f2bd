use crate::LinkGraph;
use quickcheck::Arbitrary;
use std::collections::{BTreeMap, BTreeSet};

pub fn links(xs: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<String>> {
    xs.iter()
        .map(|(page, outs)| {
            let outs = outs.iter().map(|s| s.to_string()).collect();
            (page.to_string(), outs)
        })
        .collect()
}

pub fn link_graph(xs: &[(&str, &[&str])]) -> LinkGraph<String> {
    LinkGraph::from_links(&links(xs)).unwrap()
}

pub fn cycle(n: usize) -> LinkGraph<usize> {
    let links: BTreeMap<usize, BTreeSet<usize>> = (0..n)
        .map(|i| (i, [(i + 1) % n].into_iter().collect()))
        .collect();
    LinkGraph::from_links(&links).unwrap()
}

#[derive(Debug, Clone)]
pub struct RandomGraph {
    pub graph: LinkGraph<usize>,
}

impl Arbitrary for RandomGraph {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        const N: usize = 10;

        let n: usize = usize::arbitrary(g) % N + 1;
        let mut links: BTreeMap<usize, BTreeSet<usize>> =
            (0..n).map(|u| (u, BTreeSet::new())).collect();
        for _ in 0..(n * 2) {
            let u = usize::arbitrary(g) % n;
            let v = usize::arbitrary(g) % n;
            links.get_mut(&u).unwrap().insert(v);
        }
        Self {
            graph: LinkGraph::from_links(&links).unwrap(),
        }
    }
}

/// A damping factor strictly inside (0, 1).
#[derive(Debug, Clone, Copy)]
pub struct Damping(pub f64);

impl Arbitrary for Damping {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let x = u16::arbitrary(g) % 999 + 1;
        Self(x as f64 / 1000.0)
    }
}
