//! Core traits for kmeans3d

use crate::{color::Color, point::*, point_buffer::PointBuffer};

/// Linear interpolation between two values of the same type
pub trait Lerp {
    /// Blend from `self` (at `t = 0`) to `other` (at `t = 1`)
    ///
    /// Implementations return the endpoints exactly for `t <= 0` and `t >= 1`.
    /// For `Point3f` call it as `Lerp::lerp(..)`; nalgebra's inherent
    /// `Point3::lerp` takes precedence over method syntax.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for Point3f {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t <= 0.0 {
            *self
        } else if t >= 1.0 {
            *other
        } else {
            Point3f::from(self.coords + (other.coords - self.coords) * t)
        }
    }
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t <= 0.0 {
            *self
        } else if t >= 1.0 {
            *other
        } else {
            self + (other - self) * t
        }
    }
}

impl Lerp for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| {
            <f32 as Lerp>::lerp(&(a as f32), &(b as f32), t).round().clamp(0.0, 255.0) as u8
        };
        Color::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            channel(self.a, other.a),
        )
    }
}

/// Trait for nearest-centroid lookup
///
/// Implementations must return the index of the closest centroid by
/// Euclidean distance, with exact ties going to the lowest index.
pub trait NearestCentroidSearch {
    /// Index of the nearest centroid, `None` if there are no centroids
    fn nearest(&self, query: &Point3f) -> Option<usize>;
}

/// Trait for point sets with a spatial extent
pub trait Bounded {
    /// Axis-aligned bounding box as `(min, max)`
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Center of the bounding box
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

impl Bounded for PointBuffer {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let mut iter = self.iter();
        let first = match iter.next() {
            Some(p) => *p,
            None => return (Point3f::origin(), Point3f::origin()),
        };

        iter.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p)))
    }
}
