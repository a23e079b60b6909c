//! Centroid slots and the fixed-size arena that holds them

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::point::Point3f;
use crate::point_buffer::PointBuffer;

/// One cluster representative with its animation snapshots and members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentroidSlot {
    /// Animated position shown to the user
    pub current_position: Point3f,
    /// Start of the running animation segment
    pub old_position: Point3f,
    /// Algorithmically correct position the animation converges to
    pub target_position: Point3f,
    pub current_color: Color,
    pub old_color: Color,
    pub target_color: Color,
    /// Points currently assigned to this slot
    pub members: PointBuffer,
}

impl CentroidSlot {
    /// Set current, old and target position to the same point
    pub fn place_at(&mut self, position: Point3f) {
        self.current_position = position;
        self.old_position = position;
        self.target_position = position;
    }

    /// Set current, old and target color to the same value
    pub fn paint(&mut self, color: Color) {
        self.current_color = color;
        self.old_color = color;
        self.target_color = color;
    }

    /// Anchor the next animation segment at what is displayed right now
    pub fn anchor(&mut self) {
        self.old_position = self.current_position;
        self.old_color = self.current_color;
    }
}

/// Number of live centroid slots plus storage for all `k_max` of them
///
/// Slots at or beyond `active_k` keep their storage but are never iterated
/// for assignment or rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClusterStateData")]
pub struct ClusterState {
    active_k: usize,
    slots: Vec<CentroidSlot>,
}

/// Unchecked wire form of [`ClusterState`]
#[derive(Deserialize)]
struct ClusterStateData {
    active_k: usize,
    slots: Vec<CentroidSlot>,
}

impl TryFrom<ClusterStateData> for ClusterState {
    type Error = Error;

    fn try_from(data: ClusterStateData) -> Result<Self> {
        if data.slots.is_empty() {
            return Err(Error::InvalidParameter("cluster state needs at least one slot".to_string()));
        }
        if !(1..=data.slots.len()).contains(&data.active_k) {
            return Err(Error::InvalidParameter(format!(
                "active_k must be in [1, {}], got {}",
                data.slots.len(),
                data.active_k
            )));
        }
        Ok(Self {
            active_k: data.active_k,
            slots: data.slots,
        })
    }
}

impl ClusterState {
    /// Allocate `k_max` zeroed slots with `initial_k` of them live (clamped)
    pub fn new(k_max: usize, initial_k: usize) -> Result<Self> {
        if k_max == 0 {
            return Err(Error::InvalidParameter("k_max must be at least 1".to_string()));
        }
        let mut slots = Vec::with_capacity(k_max);
        slots.resize_with(k_max, CentroidSlot::default);
        Ok(Self {
            active_k: initial_k.clamp(1, k_max),
            slots,
        })
    }

    pub fn active_k(&self) -> usize {
        self.active_k
    }

    pub fn k_max(&self) -> usize {
        self.slots.len()
    }

    /// Set the number of live slots, clamped to `[1, k_max]`
    ///
    /// Never touches slot contents. Returns the value actually applied.
    pub fn set_active_k(&mut self, k: usize) -> usize {
        self.active_k = k.clamp(1, self.k_max());
        self.active_k
    }

    pub fn increment_k(&mut self) -> usize {
        self.set_active_k(self.active_k.saturating_add(1))
    }

    pub fn decrement_k(&mut self) -> usize {
        self.set_active_k(self.active_k.saturating_sub(1))
    }

    /// Live slots, in index order
    pub fn active_slots(&self) -> &[CentroidSlot] {
        &self.slots[..self.active_k]
    }

    pub fn active_slots_mut(&mut self) -> &mut [CentroidSlot] {
        &mut self.slots[..self.active_k]
    }

    /// Every slot including inactive ones
    pub fn all_slots(&self) -> &[CentroidSlot] {
        &self.slots
    }

    pub fn all_slots_mut(&mut self) -> &mut [CentroidSlot] {
        &mut self.slots
    }

    /// A live slot by index
    pub fn slot(&self, index: usize) -> Option<&CentroidSlot> {
        self.active_slots().get(index)
    }

    /// Target positions of the live slots, used for assignment
    pub fn target_positions(&self) -> Vec<Point3f> {
        self.active_slots().iter().map(|s| s.target_position).collect()
    }

    /// Total number of points assigned across live slots
    pub fn total_members(&self) -> usize {
        self.active_slots().iter().map(|s| s.members.len()).sum()
    }
}
