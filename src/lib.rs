//! # kmeans3d
//!
//! Animated, steerable k-means clustering of 3D point sets.
//!
//! This is the umbrella crate that provides convenient access to all kmeans3d
//! functionality. Use the individual crates for finer control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, colors, point buffers, centroid slots, configuration
//! - **Algorithms**: Scene generation, nearest-centroid assignment, centroid re-estimation
//! - **Animation**: Centroid and camera-focus interpolation
//! - **Simulation**: The owned context a host loop drives frame by frame
//!
//! ## Quick Start
//!
//! ```rust
//! use kmeans3d::prelude::*;
//!
//! let config = SimulationConfig::default()
//!     .with_seed(1)
//!     .with_initial_k(4)
//!     .with_samples_per_cluster(100);
//! let mut sim = Simulation::with_scene(config).unwrap();
//!
//! sim.apply(Command::Step).unwrap();
//! sim.tick(0.25);
//!
//! for cluster in sim.snapshot().clusters {
//!     println!("{} points around {:?}", cluster.members.len(), cluster.position);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables algorithms, animation and simulation
//! - `algorithms`: Clustering algorithms
//! - `animation`: Interpolation layer
//! - `simulation`: Owned simulation context (implies the other two)

// Re-export core functionality
pub use kmeans3d_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use kmeans3d_algorithms as algorithms;

#[cfg(feature = "animation")]
pub use kmeans3d_animation as animation;

#[cfg(feature = "simulation")]
pub use kmeans3d_simulation as simulation;

/// Convenient imports for common use cases
pub mod prelude {
    pub use kmeans3d_core::*;

    #[cfg(feature = "algorithms")]
    pub use kmeans3d_algorithms::*;

    #[cfg(feature = "animation")]
    pub use kmeans3d_animation::*;

    #[cfg(feature = "simulation")]
    pub use kmeans3d_simulation::*;
}
