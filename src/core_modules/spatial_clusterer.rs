// THEORY:
// The `spatial_clusterer` is the grouping stage of the difference engine. It turns
// a cloud of differing coordinates into the smallest set of bounding rectangles a
// human can look at, so that nearby changes are highlighted as one region.
//
// Algorithm:
// 1.  **Row-Major Sweep**: points are sorted by (y, x) and visited in that order.
// 2.  **Join Rectangle**: every point starts life as its own 1x1 rectangle at the end
//     of the live list. This is the "join rectangle" that may grow by absorbing
//     other live rectangles.
// 3.  **Match Window**: the join rectangle grown by the clustering threshold on
//     every side (clamped at zero). Any live rectangle reaching into the window is
//     close enough to belong to the same cluster. The window is never materialised
//     as a `Rectangle`; `Rectangle::is_within` compares the per-axis gaps with
//     saturating arithmetic so thresholds up to `u32::MAX` are safe.
// 4.  **Restart on Merge**: after each merge the window grows, and it may now reach a
//     rectangle that sits earlier in the live list than anything examined so far.
//     The scan therefore restarts from the front after every merge and only stops
//     once a full pass finds nothing. Without the restart, a cluster that grows
//     into range of an already-finished neighbour would leave two rectangles where
//     one is required.
//
// Worst case cost is O(n^2) in the number of live rectangles per point, which is
// dominated by the number of clusters, not the number of points.

use crate::core_modules::geometry::{Coordinate, Rectangle};

/// Tunables for the clustering stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterOptions {
    /// Maximum per-axis gap, in pixels, between a point or cluster and another
    /// cluster for both to be grouped together. With 0 only overlapping
    /// rectangles merge; with 1 the grouping is 8-connected.
    pub clustering_threshold: u32,
}

impl ClusterOptions {
    pub fn new(clustering_threshold: u32) -> Self {
        Self { clustering_threshold }
    }
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self { clustering_threshold: 10 }
    }
}

pub mod spatial_clusterer {
    use super::*;

    /// Groups `points` into bounding rectangles such that no two returned
    /// rectangles lie within the clustering threshold of each other.
    /// The order of the returned rectangles carries no meaning.
    pub fn cluster(points: &[Coordinate], options: &ClusterOptions) -> Vec<Rectangle> {
        if points.is_empty() {
            return Vec::new();
        }

        let threshold = options.clustering_threshold;
        let mut sorted = points.to_vec();
        sorted.sort_unstable();

        let mut live: Vec<Rectangle> = Vec::new();
        for point in sorted {
            live.push(Rectangle::unit(point));
            if live.len() == 1 {
                continue;
            }

            let mut join_index = live.len() - 1;
            while let Some(target) = find_within(&live, join_index, threshold) {
                let merged = live[target].union(&live[join_index]);
                live.remove(join_index);

                // Removing the join slot shifts every later slot down by one.
                let target = if join_index < target { target - 1 } else { target };
                live[target] = merged;

                log::trace!("cluster: merged {:?} into slot {}", point, target);

                join_index = target;
            }
        }

        log::debug!(
            "cluster: {} points grouped into {} regions (threshold {})",
            points.len(),
            live.len(),
            threshold
        );
        live
    }

    /// First live rectangle, other than the join rectangle, inside its match window.
    fn find_within(live: &[Rectangle], join_index: usize, threshold: u32) -> Option<usize> {
        let join = &live[join_index];
        live.iter()
            .enumerate()
            .find(|&(index, rect)| index != join_index && join.is_within(rect, threshold))
            .map(|(index, _)| index)
    }
}
