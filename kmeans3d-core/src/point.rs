//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Convert spherical coordinates to a Cartesian point
///
/// `theta` is the inclination measured from the +Z axis and `phi` the
/// azimuth in the XY plane, both in radians.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Point3f {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Point3f::new(
        radius * sin_theta * cos_phi,
        radius * sin_theta * sin_phi,
        radius * cos_theta,
    )
}
