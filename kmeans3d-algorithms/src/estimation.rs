//! Centroid re-estimation

use kmeans3d_core::{AnimationClock, ClusterState, Error, Palette, Point3f, Result};
use rand::Rng;

use crate::reseed;

/// Summary of one re-estimation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EstimationStats {
    /// Slots whose target moved to the mean of their members
    pub moved: usize,
    /// Empty slots that were re-randomized
    pub reseeded: usize,
}

/// Recompute target positions and colors for every live slot
///
/// Each slot first anchors its animation at the currently displayed
/// position and color. Non-empty slots then target the mean of their
/// members; empty slots are scattered uniformly in
/// `[-cluster_radius * active_k, cluster_radius * active_k]` per axis so
/// they can attract points again. Every slot gets its palette color and the
/// clock restarts once all slots are updated.
///
/// Memberships are left untouched: callers re-run assignment against the
/// new targets to keep the two consistent.
///
/// Fails without touching any slot if the re-seeding cube is not finite.
pub fn update_centroids<R: Rng + ?Sized>(
    state: &mut ClusterState,
    clock: &mut AnimationClock,
    rng: &mut R,
    cluster_radius: f32,
    palette: &Palette,
) -> Result<EstimationStats> {
    let bound = checked_bound(cluster_radius * state.active_k() as f32)?;
    let mut rng = reseed(rng);
    let mut stats = EstimationStats::default();

    for (idx, slot) in state.active_slots_mut().iter_mut().enumerate() {
        slot.anchor();

        slot.target_position = match slot.members.centroid() {
            Some(mean) => {
                stats.moved += 1;
                mean
            }
            None => {
                stats.reseeded += 1;
                sample_cube(&mut rng, bound)
            }
        };
        slot.target_color = palette.color_for(idx);
    }

    clock.reset();
    log::debug!(
        "Updated {} centroids ({} from members, {} re-seeded)",
        stats.moved + stats.reseeded,
        stats.moved,
        stats.reseeded
    );
    Ok(stats)
}

/// Scatter every live slot uniformly in `[-bound, bound]` per axis
///
/// Current, old and target snapshots are set together, so no animation
/// runs from the previous positions. A non-finite bound is rejected and
/// leaves the slots as they were.
pub fn randomize_centroids<R: Rng + ?Sized>(
    state: &mut ClusterState,
    rng: &mut R,
    bound: f32,
    palette: &Palette,
) -> Result<()> {
    let bound = checked_bound(bound)?;
    let mut rng = reseed(rng);

    for (idx, slot) in state.active_slots_mut().iter_mut().enumerate() {
        slot.place_at(sample_cube(&mut rng, bound));
        slot.paint(palette.color_for(idx));
    }

    log::info!("Randomized {} centroids within +/-{}", state.active_k(), bound);
    Ok(())
}

/// Uniform point in the axis-aligned cube `[-bound, bound]^3`
pub fn random_point_in_cube<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> Result<Point3f> {
    let bound = checked_bound(bound)?;
    Ok(sample_cube(rng, bound))
}

/// Absolute bound whose full width `2 * bound` is still finite
fn checked_bound(bound: f32) -> Result<f32> {
    let bound = bound.abs();
    if (2.0 * bound).is_finite() {
        Ok(bound)
    } else {
        Err(Error::InvalidParameter(format!("cube bound must be finite with a finite width, got {bound}")))
    }
}

fn sample_cube<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> Point3f {
    Point3f::new(
        rng.gen_range(-bound..=bound),
        rng.gen_range(-bound..=bound),
        rng.gen_range(-bound..=bound),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kmeans3d_core::{Color, PointBuffer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clock() -> AnimationClock {
        AnimationClock::finished(0.5).unwrap()
    }

    #[test]
    fn test_target_is_mean_of_members() {
        let mut state = ClusterState::new(8, 2).unwrap();
        state.active_slots_mut()[0].members = PointBuffer::from_points(vec![
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(3.0, 5.0, -1.0),
            Point3f::new(2.0, 0.0, 3.0),
        ]);
        state.active_slots_mut()[1].members = PointBuffer::from_points(vec![Point3f::new(-4.0, 2.0, 9.0)]);

        let mut clock = clock();
        let mut rng = StdRng::seed_from_u64(31);
        let stats = update_centroids(&mut state, &mut clock, &mut rng, 10.0, &Palette::default()).unwrap();

        assert_eq!(stats, EstimationStats { moved: 2, reseeded: 0 });
        let target = state.active_slots()[0].target_position;
        assert_relative_eq!(target.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(target.z, 1.0, epsilon = 1e-5);
        assert_eq!(state.active_slots()[1].target_position, Point3f::new(-4.0, 2.0, 9.0));
    }

    #[test]
    fn test_empty_slot_reseeded_within_bound() {
        let radius = 5.0;
        let mut rng = StdRng::seed_from_u64(32);
        let palette = Palette::default();

        for k in 1..=6 {
            let mut state = ClusterState::new(8, k).unwrap();
            let mut clock = clock();
            let stats = update_centroids(&mut state, &mut clock, &mut rng, radius, &palette).unwrap();
            assert_eq!(stats.reseeded, k);

            let bound = radius * k as f32;
            for slot in state.active_slots() {
                let t = slot.target_position;
                assert!(t.x.abs() <= bound && t.y.abs() <= bound && t.z.abs() <= bound);
            }
        }
    }

    #[test]
    fn test_update_anchors_old_and_resets_clock() {
        let mut state = ClusterState::new(4, 1).unwrap();
        {
            let slot = &mut state.active_slots_mut()[0];
            slot.current_position = Point3f::new(7.0, 7.0, 7.0);
            slot.current_color = Color::WHITE;
            slot.members = PointBuffer::from_points(vec![Point3f::origin()]);
        }
        let mut clock = clock();
        assert!(clock.is_finished());

        update_centroids(&mut state, &mut clock, &mut StdRng::seed_from_u64(33), 1.0, &Palette::default()).unwrap();

        let slot = &state.active_slots()[0];
        assert_eq!(slot.old_position, Point3f::new(7.0, 7.0, 7.0));
        assert_eq!(slot.old_color, Color::WHITE);
        assert_eq!(slot.target_color, Color::RED);
        assert_eq!(slot.target_position, Point3f::origin());
        // Current is untouched until the next tick
        assert_eq!(slot.current_position, Point3f::new(7.0, 7.0, 7.0));
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_update_skips_inactive_slots() {
        let mut state = ClusterState::new(4, 2).unwrap();
        state.all_slots_mut()[3].target_position = Point3f::new(1.0, 2.0, 3.0);
        update_centroids(&mut state, &mut clock(), &mut StdRng::seed_from_u64(34), 10.0, &Palette::default()).unwrap();
        assert_eq!(state.all_slots()[3].target_position, Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(state.all_slots()[3].target_color, Color::default());
    }

    #[test]
    fn test_randomize_sets_all_snapshots() {
        let mut state = ClusterState::new(32, 25).unwrap();
        let palette = Palette::default();
        randomize_centroids(&mut state, &mut StdRng::seed_from_u64(35), 100.0, &palette).unwrap();

        for (idx, slot) in state.active_slots().iter().enumerate() {
            assert_eq!(slot.current_position, slot.target_position);
            assert_eq!(slot.old_position, slot.target_position);
            let p = slot.target_position;
            assert!(p.x.abs() <= 100.0 && p.y.abs() <= 100.0 && p.z.abs() <= 100.0);
            assert_eq!(slot.current_color, palette.color_for(idx));
            assert_eq!(slot.old_color, slot.target_color);
        }
        assert_eq!(state.active_slots()[21].target_color, Color::RED);
        assert_eq!(state.all_slots()[25].current_position, Point3f::origin());
    }

    #[test]
    fn test_random_point_degenerate_bound() {
        let mut rng = StdRng::seed_from_u64(36);
        assert_eq!(random_point_in_cube(&mut rng, 0.0).unwrap(), Point3f::origin());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mut rng = StdRng::seed_from_u64(37);
        let palette = Palette::default();
        let mut state = ClusterState::new(4, 3).unwrap();
        randomize_centroids(&mut state, &mut rng, 10.0, &palette).unwrap();
        let before = state.clone();

        for bound in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, f32::MAX] {
            assert!(matches!(
                randomize_centroids(&mut state, &mut rng, bound, &palette),
                Err(Error::InvalidParameter(_))
            ));
            assert!(random_point_in_cube(&mut rng, bound).is_err());
        }
        assert_eq!(state, before);

        let mut clock = clock();
        assert!(update_centroids(&mut state, &mut clock, &mut rng, f32::INFINITY, &palette).is_err());
        assert_eq!(state, before);
        assert!(clock.is_finished());
    }

    #[test]
    fn test_negative_bound_uses_magnitude() {
        let mut state = ClusterState::new(4, 4).unwrap();
        randomize_centroids(&mut state, &mut StdRng::seed_from_u64(38), -5.0, &Palette::default()).unwrap();
        for slot in state.active_slots() {
            let p = slot.target_position;
            assert!(p.x.abs() <= 5.0 && p.y.abs() <= 5.0 && p.z.abs() <= 5.0);
        }
    }
}
