//! Host commands and run modes

use serde::{Deserialize, Serialize};

/// Whether the simulation steps on its own every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunMode {
    /// Steps only on explicit request
    #[default]
    Idle,
    /// One re-estimation and assignment per frame, regardless of animation progress
    AutoStepping,
}

impl RunMode {
    pub fn toggled(self) -> Self {
        match self {
            RunMode::Idle => RunMode::AutoStepping,
            RunMode::AutoStepping => RunMode::Idle,
        }
    }
}

/// A discrete request from the host, applied at the next operation boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Add a cluster slot, stop auto-stepping and reassign
    IncrementK,
    /// Remove a cluster slot, stop auto-stepping and reassign
    DecrementK,
    /// Set the number of live slots (clamped) and reassign
    SetK(usize),
    /// Replace the point population at the current radius and reassign
    Regenerate,
    /// Scatter centroids within the configured bound and reassign
    RandomizeCentroids,
    /// One re-estimation plus assignment
    Step,
    ToggleAutoStep,
    /// Focus the next centroid, cycling through the live slots
    SelectNextCentroid,
    /// Drop the selection and snap the focus back to the origin
    ClearSelection,
    GrowRadius,
    ShrinkRadius,
}
