//! Centroid animation driven by host frame deltas

use kmeans3d_core::{AnimationClock, ClusterState, Lerp, Result};

use crate::focus::FocusTransition;

/// Owns the centroid animation clock and the camera focus transition
///
/// Interpolation is linear with clamped progress: at phase 0 every live slot
/// shows its `old` snapshot, at phase 1 its `target`. Because re-estimation
/// anchors `old` at the displayed value before choosing new targets, a new
/// segment can start at any time without a visible jump.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    clock: AnimationClock,
    focus: FocusTransition,
}

impl AnimationController {
    pub fn new(animation_duration: f32, focus_duration: f32) -> Result<Self> {
        Ok(Self {
            clock: AnimationClock::finished(animation_duration)?,
            focus: FocusTransition::new(focus_duration)?,
        })
    }

    /// Advance both clocks by `dt` seconds and refresh displayed state
    pub fn tick(&mut self, dt: f32, state: &mut ClusterState) {
        self.clock.advance(dt);
        self.apply(state);
        self.focus.tick(dt);
        log::trace!("Animation phase {:.3}", self.clock.phase());
    }

    /// Write interpolated positions and colors for the current phase
    pub fn apply(&self, state: &mut ClusterState) {
        let t = self.clock.phase();
        for slot in state.active_slots_mut() {
            slot.current_position = Lerp::lerp(&slot.old_position, &slot.target_position, t);
            slot.current_color = slot.old_color.lerp(&slot.target_color, t);
        }
    }

    pub fn phase(&self) -> f32 {
        self.clock.phase()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Mutable clock, handed to centroid re-estimation so it can restart it
    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    pub fn focus(&self) -> &FocusTransition {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusTransition {
        &mut self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kmeans3d_core::{Color, Point3f};

    fn moving_state() -> ClusterState {
        let mut state = ClusterState::new(4, 2).unwrap();
        for slot in state.active_slots_mut() {
            slot.old_position = Point3f::new(0.0, 0.0, 0.0);
            slot.target_position = Point3f::new(10.0, -10.0, 4.0);
            slot.old_color = Color::new(0, 0, 0, 255);
            slot.target_color = Color::new(200, 100, 50, 255);
        }
        state
    }

    fn restarted(duration: f32) -> AnimationController {
        let mut controller = AnimationController::new(duration, 1.0).unwrap();
        controller.clock_mut().reset();
        controller
    }

    #[test]
    fn test_phase_zero_shows_old() {
        let mut state = moving_state();
        let mut controller = restarted(0.5);
        controller.tick(0.0, &mut state);
        for slot in state.active_slots() {
            assert_eq!(slot.current_position, slot.old_position);
            assert_eq!(slot.current_color, slot.old_color);
        }
    }

    #[test]
    fn test_full_duration_shows_target() {
        let mut state = moving_state();
        let mut controller = restarted(0.5);
        controller.tick(0.3, &mut state);
        controller.tick(0.3, &mut state);
        assert_eq!(controller.clock().elapsed(), 0.5);
        for slot in state.active_slots() {
            assert_eq!(slot.current_position, slot.target_position);
            assert_eq!(slot.current_color, slot.target_color);
        }
    }

    #[test]
    fn test_intermediate_phase_lies_on_segment() {
        let mut state = moving_state();
        let mut controller = restarted(2.0);
        let mut last = 0.0;

        for _ in 0..7 {
            controller.tick(0.25, &mut state);
            let t = controller.phase();
            assert!((0.0..=1.0).contains(&t));
            assert!(t >= last);
            last = t;

            let slot = &state.active_slots()[0];
            let expected = slot.old_position + (slot.target_position - slot.old_position) * t;
            assert_relative_eq!(slot.current_position, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_inactive_slots_not_animated() {
        let mut state = moving_state();
        state.all_slots_mut()[3].target_position = Point3f::new(1.0, 1.0, 1.0);
        let mut controller = restarted(0.5);
        controller.tick(1.0, &mut state);
        assert_eq!(state.all_slots()[3].current_position, Point3f::origin());
    }

    #[test]
    fn test_tick_drives_focus() {
        let mut state = moving_state();
        let mut controller = AnimationController::new(0.5, 1.0).unwrap();
        controller.focus_mut().retarget(Point3f::new(0.0, 4.0, 0.0));
        controller.tick(0.5, &mut state);
        assert_relative_eq!(controller.focus().current().y, 2.0);
    }
}
