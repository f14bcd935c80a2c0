//! R-tree backed proximity index (via `rstar`).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sw_core::Vec3;

use crate::ProximityIndex;
use crate::index::usable_range;

/// Entry stored in the R-tree: a 3-D point and its position in the input
/// slice.
#[derive(Clone)]
struct PointEntry {
    point: [f64; 3],
    index: usize,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PointEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Bulk-loads an R-tree each tick and runs one radius query per point.
#[derive(Copy, Clone, Debug, Default)]
pub struct RTreeIndex;

impl ProximityIndex for RTreeIndex {
    fn candidate_pairs(&mut self, points: &[Vec3], range: f64) -> Vec<(usize, usize)> {
        let Some(r2) = usable_range(range) else { return Vec::new() };

        let entries: Vec<PointEntry> = points
            .iter()
            .enumerate()
            .map(|(index, p)| PointEntry { point: p.to_array(), index })
            .collect();
        let tree = RTree::bulk_load(entries);

        let mut pairs = Vec::new();
        for (i, p) in points.iter().enumerate() {
            let query = p.to_array();
            // `locate_within_distance` is inclusive; re-check strictly.
            pairs.extend(
                tree.locate_within_distance(query, r2)
                    .filter(|e| e.index > i && e.distance_2(&query) < r2)
                    .map(|e| (i, e.index)),
            );
        }
        pairs.sort_unstable();
        pairs
    }

    fn name(&self) -> &'static str {
        "rtree"
    }
}
