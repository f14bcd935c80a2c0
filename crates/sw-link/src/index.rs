//! The `ProximityIndex` trait, the brute-force scan, and index selection.

use std::str::FromStr;

use sw_core::Vec3;

use crate::{LinkError, RTreeIndex, UniformGridIndex};

/// Finds all point pairs closer than a range.
///
/// Implementations must return every `(i, j)` with `i < j` and
/// `points[i].distance(points[j]) < range` (strict), sorted ascending, and
/// nothing else.  Because the output order is fixed, the random inclusion
/// draws that follow are identical whichever index produced the pairs.
///
/// A non-positive or non-finite `range` yields no pairs.
pub trait ProximityIndex: Send + Sync {
    fn candidate_pairs(&mut self, points: &[Vec3], range: f64) -> Vec<(usize, usize)>;

    /// Short name for logs and CLI selection.
    fn name(&self) -> &'static str;
}

impl ProximityIndex for Box<dyn ProximityIndex> {
    fn candidate_pairs(&mut self, points: &[Vec3], range: f64) -> Vec<(usize, usize)> {
        (**self).candidate_pairs(points, range)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[inline]
pub(crate) fn usable_range(range: f64) -> Option<f64> {
    (range.is_finite() && range > 0.0).then_some(range * range)
}

// ── BruteForceIndex ───────────────────────────────────────────────────────────

/// The O(n²) pair scan.  Fine up to about a thousand agents.
///
/// With the `parallel` feature the outer loop runs on Rayon's pool.
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForceIndex;

impl ProximityIndex for BruteForceIndex {
    fn candidate_pairs(&mut self, points: &[Vec3], range: f64) -> Vec<(usize, usize)> {
        let Some(r2) = usable_range(range) else { return Vec::new() };
        let n = points.len();

        #[cfg(not(feature = "parallel"))]
        {
            let mut pairs = Vec::new();
            for i in 0..n {
                let p = points[i];
                for j in (i + 1)..n {
                    if p.distance_sq(points[j]) < r2 {
                        pairs.push((i, j));
                    }
                }
            }
            pairs
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `collect` keeps the sequential order of the outer range.
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| {
                    let p = points[i];
                    ((i + 1)..n)
                        .filter(move |&j| p.distance_sq(points[j]) < r2)
                        .map(move |j| (i, j))
                })
                .collect()
        }
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}

// ── IndexKind ─────────────────────────────────────────────────────────────────

/// Runtime choice of proximity index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum IndexKind {
    #[default]
    BruteForce,
    Grid,
    RTree,
}

impl IndexKind {
    pub fn boxed(self) -> Box<dyn ProximityIndex> {
        match self {
            IndexKind::BruteForce => Box::new(BruteForceIndex),
            IndexKind::Grid       => Box::new(UniformGridIndex::default()),
            IndexKind::RTree      => Box::new(RTreeIndex),
        }
    }
}

impl FromStr for IndexKind {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brute-force" | "brute" | "bruteforce" => Ok(IndexKind::BruteForce),
            "grid"                                 => Ok(IndexKind::Grid),
            "rtree" | "r-tree"                     => Ok(IndexKind::RTree),
            other => Err(LinkError::UnknownIndex(other.to_owned())),
        }
    }
}
