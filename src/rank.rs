use std::{collections::BTreeMap, fmt};

/// Final per-page ranks of one estimator run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable<N> {
    ranks: BTreeMap<N, f64>,
}

impl<N: Ord> RankTable<N> {
    pub fn get(&self, page: &N) -> Option<f64> {
        self.ranks.get(page).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.ranks.iter().map(|(n, r)| (n, *r))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Largest absolute per-page difference against `other`.
    /// Pages present on only one side count with rank 0 on the other.
    pub fn max_deviation(&self, other: &Self) -> f64 {
        let one_sided = |a: &Self, b: &Self| {
            a.ranks
                .iter()
                .map(|(n, r)| (r - b.get(n).unwrap_or(0.0)).abs())
                .fold(0.0, f64::max)
        };
        one_sided(self, other).max(one_sided(other, self))
    }
}

impl<N: Ord> FromIterator<(N, f64)> for RankTable<N> {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}

impl<N: Ord + fmt::Display> fmt::Display for RankTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, rank) in self.ranks.iter() {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
