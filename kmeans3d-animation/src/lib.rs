//! # kmeans3d Animation
//!
//! Turns discrete algorithm steps into continuous transitions. Centroid
//! positions and colors are blended linearly from their `old` snapshot to
//! their `target`, and the camera focus point glides between centroids.

pub mod controller;
pub mod focus;

pub use controller::*;
pub use focus::*;
