//! Core data structures and traits for kmeans3d
//!
//! This crate provides the fundamental types shared by the clustering and
//! animation layers: points, colors, point buffers, centroid slots, the
//! animation clock, configuration and the error type.

pub mod point;
pub mod color;
pub mod point_buffer;
pub mod cluster;
pub mod clock;
pub mod config;
pub mod traits;
pub mod error;

pub use point::*;
pub use color::*;
pub use point_buffer::*;
pub use cluster::*;
pub use clock::*;
pub use config::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

/// Hard upper bound on the number of centroid slots
pub const K_MAX: usize = 256;
