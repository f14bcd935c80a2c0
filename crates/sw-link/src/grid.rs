//! Uniform grid bucketed by the communication range.

use sw_core::Vec3;

use crate::ProximityIndex;
use crate::index::usable_range;

#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<Cell, Vec<usize>>;
#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<Cell, Vec<usize>>;

type Cell = (i64, i64, i64);

/// Cell coordinates are clamped to this band so neighbour keys never
/// overflow.  Far-out points share the edge cells; the exact distance test
/// still decides every pair.
const CELL_LIMIT: f64 = 4.0e15;

/// Buckets points into cubes of side `range`; only the 27 surrounding cells
/// are checked per point.
///
/// The bucket map is kept between calls so steady-state ticks do not
/// reallocate.
#[derive(Debug, Default)]
pub struct UniformGridIndex {
    cells: CellMap,
}

impl UniformGridIndex {
    #[inline]
    fn cell_of(p: Vec3, range: f64) -> Cell {
        let axis = |v: f64| (v / range).floor().clamp(-CELL_LIMIT, CELL_LIMIT) as i64;
        (axis(p.x), axis(p.y), axis(p.z))
    }
}

impl ProximityIndex for UniformGridIndex {
    fn candidate_pairs(&mut self, points: &[Vec3], range: f64) -> Vec<(usize, usize)> {
        let Some(r2) = usable_range(range) else { return Vec::new() };

        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        for (i, &p) in points.iter().enumerate() {
            self.cells.entry(Self::cell_of(p, range)).or_default().push(i);
        }

        let mut pairs = Vec::new();
        for (i, &p) in points.iter().enumerate() {
            let (cx, cy, cz) = Self::cell_of(p, range);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let key = (cx + dx, cy + dy, cz + dz);
                        let Some(bucket) = self.cells.get(&key) else { continue };
                        pairs.extend(
                            bucket
                                .iter()
                                .copied()
                                .filter(|&j| j > i && p.distance_sq(points[j]) < r2)
                                .map(|j| (i, j)),
                        );
                    }
                }
            }
        }
        // Drop buckets that stayed empty so a wandering swarm does not grow
        // the map without bound.
        self.cells.retain(|_, b| !b.is_empty());

        pairs.sort_unstable();
        pairs
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}
