//! Nearest-centroid assignment
//!
//! Points are always matched against the *target* positions of the live
//! slots, never the animated current positions, so membership does not lag
//! behind or oscillate with the animation.

use kmeans3d_core::{ClusterState, NearestCentroidSearch, Point3f, PointBuffer};
use rayon::prelude::*;

/// Linear scan over a set of centroids
///
/// Ties on distance go to the lowest index: only a strictly smaller
/// distance replaces the current best.
pub struct BruteForceCentroids<'a> {
    centroids: &'a [Point3f],
}

impl<'a> BruteForceCentroids<'a> {
    pub fn new(centroids: &'a [Point3f]) -> Self {
        Self { centroids }
    }
}

impl NearestCentroidSearch for BruteForceCentroids<'_> {
    fn nearest(&self, query: &Point3f) -> Option<usize> {
        let mut best = None;
        let mut best_distance = f32::INFINITY;

        for (idx, centroid) in self.centroids.iter().enumerate() {
            let distance = nalgebra::distance_squared(query, centroid);
            if best.is_none() || distance < best_distance {
                best = Some(idx);
                best_distance = distance;
            }
        }

        best
    }
}

/// Summary of one assignment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentStats {
    /// Points distributed across the slots
    pub points: usize,
    /// Number of slots considered
    pub active_k: usize,
    /// Live slots that received no points
    pub empty_clusters: usize,
}

/// Partition `points` among the live slots of `state` by nearest target
///
/// Every slot's membership, live or not, is reset first so stale members
/// never survive a decrease of `active_k`.
///
/// # Arguments
/// * `points` - Scene population
/// * `state` - Cluster state whose memberships are rebuilt in place
///
/// # Returns
/// * `AssignmentStats` - Counts describing the new partition
pub fn assign(points: &PointBuffer, state: &mut ClusterState) -> AssignmentStats {
    let targets = state.target_positions();
    let search = BruteForceCentroids::new(&targets);
    let nearest: Vec<Option<usize>> = points.iter().map(|p| search.nearest(p)).collect();
    distribute(points, &nearest, state)
}

/// Parallel variant of [`assign`] with identical results
///
/// Nearest indices are computed on the rayon pool; points are then appended
/// sequentially in input order so membership order matches [`assign`].
pub fn assign_parallel(points: &PointBuffer, state: &mut ClusterState) -> AssignmentStats {
    let targets = state.target_positions();
    let search = BruteForceCentroids::new(&targets);
    let nearest: Vec<Option<usize>> = points
        .as_slice()
        .par_iter()
        .map(|p| search.nearest(p))
        .collect();
    distribute(points, &nearest, state)
}

fn distribute(points: &PointBuffer, nearest: &[Option<usize>], state: &mut ClusterState) -> AssignmentStats {
    for slot in state.all_slots_mut() {
        slot.members.reset();
    }

    let slots = state.active_slots_mut();
    for (point, idx) in points.iter().zip(nearest) {
        // active_k >= 1 is guaranteed by ClusterState, so every point has a slot
        if let Some(idx) = idx {
            slots[*idx].members.append(*point);
        }
    }

    let stats = AssignmentStats {
        points: points.len(),
        active_k: state.active_k(),
        empty_clusters: state.active_slots().iter().filter(|s| s.members.is_empty()).count(),
    };
    log::debug!(
        "Assigned {} points to {} clusters ({} empty)",
        stats.points,
        stats.active_k,
        stats.empty_clusters
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn state_with_targets(targets: &[Point3f]) -> ClusterState {
        let mut state = ClusterState::new(16, targets.len()).unwrap();
        for (slot, target) in state.active_slots_mut().iter_mut().zip(targets) {
            slot.target_position = *target;
        }
        state
    }

    fn random_points(rng: &mut StdRng, n: usize) -> PointBuffer {
        (0..n)
            .map(|_| {
                Point3f::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                )
            })
            .collect()
    }

    fn sorted(points: &[Point3f]) -> Vec<[u32; 3]> {
        let mut keys: Vec<[u32; 3]> = points
            .iter()
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_brute_force_nearest() {
        let centroids = [
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(10.0, 0.0, 0.0),
            Point3f::new(0.0, 10.0, 0.0),
        ];
        let search = BruteForceCentroids::new(&centroids);
        assert_eq!(search.nearest(&Point3f::new(1.0, 1.0, 0.0)), Some(0));
        assert_eq!(search.nearest(&Point3f::new(9.0, 2.0, 0.0)), Some(1));
        assert_eq!(search.nearest(&Point3f::new(1.0, 8.0, 1.0)), Some(2));
        assert_eq!(BruteForceCentroids::new(&[]).nearest(&Point3f::origin()), None);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let centroids = [
            Point3f::new(-1.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(-1.0, 0.0, 0.0),
        ];
        let search = BruteForceCentroids::new(&centroids);
        assert_eq!(search.nearest(&Point3f::origin()), Some(0));
        assert_eq!(search.nearest(&Point3f::new(-1.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn test_assign_uses_target_not_current() {
        let mut state = state_with_targets(&[Point3f::new(0.0, 0.0, 0.0), Point3f::new(10.0, 0.0, 0.0)]);
        // Displayed positions swapped mid-animation
        state.active_slots_mut()[0].current_position = Point3f::new(10.0, 0.0, 0.0);
        state.active_slots_mut()[1].current_position = Point3f::new(0.0, 0.0, 0.0);

        let points = PointBuffer::from_points(vec![Point3f::new(1.0, 0.0, 0.0)]);
        assign(&points, &mut state);
        assert_eq!(state.active_slots()[0].members.len(), 1);
        assert!(state.active_slots()[1].members.is_empty());
    }

    #[test]
    fn test_every_point_goes_to_its_nearest_target() {
        let mut rng = StdRng::seed_from_u64(21);
        let targets: Vec<Point3f> = random_points(&mut rng, 5).into_iter().collect();
        let mut state = state_with_targets(&targets);
        let points = random_points(&mut rng, 500);

        assign(&points, &mut state);

        for (idx, slot) in state.active_slots().iter().enumerate() {
            for p in slot.members.iter() {
                let own = nalgebra::distance_squared(p, &targets[idx]);
                for (other, target) in targets.iter().enumerate() {
                    let d = nalgebra::distance_squared(p, target);
                    assert!(
                        own < d || (own == d && idx <= other),
                        "point {:?} closer to {} than {}",
                        p,
                        other,
                        idx
                    );
                }
            }
        }
    }

    #[test]
    fn test_partition_is_complete() {
        let mut rng = StdRng::seed_from_u64(22);
        let points = random_points(&mut rng, 300);

        for k in [1, 2, 7, 16] {
            let targets: Vec<Point3f> = random_points(&mut rng, k).into_iter().collect();
            let mut state = state_with_targets(&targets);
            let stats = assign(&points, &mut state);

            assert_eq!(stats.points, 300);
            assert_eq!(state.total_members(), points.len());

            let union: Vec<Point3f> = state
                .active_slots()
                .iter()
                .flat_map(|s| s.members.iter().copied())
                .collect();
            assert_eq!(sorted(&union), sorted(points.as_slice()));
        }
    }

    #[test]
    fn test_assign_clears_inactive_slots() {
        let mut state = state_with_targets(&[Point3f::origin(), Point3f::new(5.0, 0.0, 0.0)]);
        let points = PointBuffer::from_points(vec![Point3f::new(4.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)]);
        assign(&points, &mut state);
        assert_eq!(state.active_slots()[1].members.len(), 1);

        state.set_active_k(1);
        let stats = assign(&points, &mut state);
        assert_eq!(stats.empty_clusters, 0);
        assert_eq!(state.active_slots()[0].members.len(), 2);
        assert!(state.all_slots()[1].members.is_empty());
    }

    #[test]
    fn test_empty_cluster_counted() {
        let mut state = state_with_targets(&[Point3f::origin(), Point3f::new(100.0, 0.0, 0.0)]);
        let points = PointBuffer::from_points(vec![Point3f::new(1.0, 0.0, 0.0)]);
        let stats = assign(&points, &mut state);
        assert_eq!(stats.empty_clusters, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(23);
        let targets: Vec<Point3f> = random_points(&mut rng, 9).into_iter().collect();
        let points = random_points(&mut rng, 2000);

        let mut sequential = state_with_targets(&targets);
        let mut parallel = state_with_targets(&targets);
        let a = assign(&points, &mut sequential);
        let b = assign_parallel(&points, &mut parallel);

        assert_eq!(a, b);
        assert_eq!(sequential, parallel);
    }
}
