//! Growable point storage used for the scene population and cluster membership

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered, duplicate-permitting, growable sequence of points
///
/// Each buffer exclusively owns its storage. Capacity doubles on overflow,
/// and [`PointBuffer::reset`] hands the allocation back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointBuffer {
    points: Vec<Point3f>,
}

impl PointBuffer {
    /// Create a new empty buffer without allocating
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a buffer with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer from a vector of points
    pub fn from_points(points: Vec<Point3f>) -> Self {
        Self { points }
    }

    /// Append a point, growing storage geometrically when full
    pub fn append(&mut self, point: Point3f) {
        self.points.push(point);
    }

    /// Drop all points and release the backing storage
    pub fn reset(&mut self) {
        self.points = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3f> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point3f] {
        &self.points
    }

    /// Componentwise arithmetic mean, `None` for an empty buffer
    pub fn centroid(&self) -> Option<Point3f> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3f::zeros(), |acc, p| acc + p.coords);
        Some(Point3f::from(sum / self.points.len() as f32))
    }
}

impl Index<usize> for PointBuffer {
    type Output = Point3f;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for PointBuffer {
    type Item = Point3f;
    type IntoIter = std::vec::IntoIter<Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointBuffer {
    type Item = &'a Point3f;
    type IntoIter = std::slice::Iter<'a, Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Extend<Point3f> for PointBuffer {
    fn extend<I: IntoIterator<Item = Point3f>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<Point3f> for PointBuffer {
    fn from_iter<I: IntoIterator<Item = Point3f>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
