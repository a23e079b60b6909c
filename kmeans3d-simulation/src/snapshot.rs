//! Read-only per-frame view for renderers

use kmeans3d_core::{Color, Point3f};
use serde::Serialize;

use crate::command::RunMode;

/// Everything a renderer needs to draw one frame
///
/// Borrows member lists from the simulation; only live slots are included.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub active_k: usize,
    pub mode: RunMode,
    pub cluster_radius: f32,
    /// Centroid animation progress in `[0, 1]`
    pub phase: f32,
    pub selected: Option<usize>,
    /// Point the camera should look at
    pub focus: Point3f,
    pub clusters: Vec<ClusterView<'a>>,
}

/// One live cluster as it should be displayed
#[derive(Debug, Clone, Serialize)]
pub struct ClusterView<'a> {
    pub index: usize,
    pub position: Point3f,
    pub color: Color,
    pub members: &'a [Point3f],
}

impl FrameSnapshot<'_> {
    /// Total number of points across all drawn clusters
    pub fn point_count(&self) -> usize {
        self.clusters.iter().map(|c| c.members.len()).sum()
    }

    pub fn selected_cluster(&self) -> Option<&ClusterView<'_>> {
        self.selected.and_then(|idx| self.clusters.get(idx))
    }
}
