//! Camera focus transitions

use kmeans3d_core::{AnimationClock, Lerp, Point3f, Result};
use serde::{Deserialize, Serialize};

/// A focus point that glides from `start` to `end` over its own clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTransition {
    start: Point3f,
    end: Point3f,
    current: Point3f,
    clock: AnimationClock,
}

impl FocusTransition {
    /// A settled transition resting at the origin
    pub fn new(duration: f32) -> Result<Self> {
        Ok(Self {
            start: Point3f::origin(),
            end: Point3f::origin(),
            current: Point3f::origin(),
            clock: AnimationClock::finished(duration)?,
        })
    }

    /// Start gliding from the current focus towards `end`
    pub fn retarget(&mut self, end: Point3f) {
        self.start = self.current;
        self.end = end;
        self.clock.reset();
    }

    /// Jump straight to `point` with no transition
    pub fn snap_to(&mut self, point: Point3f) {
        self.start = point;
        self.end = point;
        self.current = point;
        self.clock.finish();
    }

    pub fn tick(&mut self, dt: f32) {
        self.clock.advance(dt);
        self.current = Lerp::lerp(&self.start, &self.end, self.clock.phase());
    }

    /// Focus point to render this frame
    pub fn current(&self) -> Point3f {
        self.current
    }

    /// Where the running transition ends
    pub fn target(&self) -> Point3f {
        self.end
    }

    pub fn is_active(&self) -> bool {
        !self.clock.is_finished()
    }
}
