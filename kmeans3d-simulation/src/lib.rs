//! # kmeans3d Simulation
//!
//! A single owned context that ties the clustering core together. A host
//! (window loop, headless runner, test) creates a [`Simulation`], feeds it
//! frame deltas and [`Command`]s, and reads a [`FrameSnapshot`] back for
//! drawing.
//!
//! ```rust
//! use kmeans3d_core::SimulationConfig;
//! use kmeans3d_simulation::{Command, Simulation};
//!
//! fn main() -> kmeans3d_core::Result<()> {
//!     let config = SimulationConfig::default()
//!         .with_seed(7)
//!         .with_initial_k(3)
//!         .with_samples_per_cluster(100);
//!     let mut sim = Simulation::with_scene(config)?;
//!
//!     sim.apply(Command::ToggleAutoStep)?;
//!     for _ in 0..10 {
//!         sim.frame(1.0 / 60.0)?;
//!     }
//!
//!     let snapshot = sim.snapshot();
//!     assert_eq!(snapshot.clusters.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod simulation;
pub mod snapshot;

pub use command::*;
pub use simulation::*;
pub use snapshot::*;
