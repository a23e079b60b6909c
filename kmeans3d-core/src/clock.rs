//! Clamped animation clock

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Elapsed-time accumulator bounded to `[0, duration]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClockData")]
pub struct AnimationClock {
    elapsed: f32,
    duration: f32,
}

#[derive(Deserialize)]
struct ClockData {
    elapsed: f32,
    duration: f32,
}

impl TryFrom<ClockData> for AnimationClock {
    type Error = Error;

    fn try_from(data: ClockData) -> Result<Self> {
        let mut clock = Self::new(data.duration)?;
        if !(0.0..=data.duration).contains(&data.elapsed) {
            return Err(Error::InvalidParameter(format!(
                "elapsed time must be in [0, {}], got {}",
                data.duration, data.elapsed
            )));
        }
        clock.elapsed = data.elapsed;
        Ok(clock)
    }
}

impl AnimationClock {
    /// Create a clock at zero elapsed time
    pub fn new(duration: f32) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "animation duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            elapsed: 0.0,
            duration,
        })
    }

    /// Create a clock that has already run to completion
    pub fn finished(duration: f32) -> Result<Self> {
        let mut clock = Self::new(duration)?;
        clock.finish();
        Ok(clock)
    }

    /// Add `dt` seconds, clamping to the duration. Negative and NaN deltas count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Restart the segment from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Jump to the end of the segment
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Normalized progress in `[0, 1]`
    pub fn phase(&self) -> f32 {
        self.elapsed / self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
