//! The owned simulation context

use kmeans3d_algorithms::{
    assign, assign_parallel, randomize_centroids, update_centroids, AssignmentStats,
    EstimationStats, SceneGenerator,
};
use kmeans3d_animation::AnimationController;
use kmeans3d_core::{
    ClusterState, Palette, Point3f, PointBuffer, Result, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::command::{Command, RunMode};
use crate::snapshot::{ClusterView, FrameSnapshot};

/// Statistics from one [`Simulation::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStats {
    pub estimation: EstimationStats,
    pub assignment: AssignmentStats,
}

/// Point population, centroid slots, animation state and random source
///
/// All operations are synchronous and take effect immediately; a host calls
/// [`Simulation::frame`] once per rendered frame and reads
/// [`Simulation::snapshot`] to draw.
pub struct Simulation {
    config: SimulationConfig,
    rng: StdRng,
    generator: SceneGenerator,
    palette: Palette,
    points: PointBuffer,
    clusters: ClusterState,
    animation: AnimationController,
    mode: RunMode,
    selected: Option<usize>,
    cluster_radius: f32,
}

impl Simulation {
    /// Create an empty simulation: no points, all slots zeroed
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            generator: SceneGenerator::new(config.generation.clone())?,
            palette: config.palette(),
            points: PointBuffer::new(),
            clusters: ClusterState::new(config.k_max, config.initial_k)?,
            animation: AnimationController::new(config.animation_duration, config.focus_duration)?,
            mode: RunMode::Idle,
            selected: None,
            cluster_radius: config.cluster_radius,
            config,
        })
    }

    /// Create a simulation with randomized centroids and a generated scene
    pub fn with_scene(config: SimulationConfig) -> Result<Self> {
        let mut sim = Self::new(config)?;
        sim.randomize_centroids(sim.default_randomize_bound())?;
        sim.regenerate(sim.cluster_radius)?;
        Ok(sim)
    }

    /// Set the number of live slots, clamped to `[1, k_max]`
    ///
    /// Memberships are not rebuilt; call [`Simulation::reassign`] afterwards.
    pub fn set_active_k(&mut self, k: usize) -> usize {
        let applied = self.clusters.set_active_k(k);
        if self.selected.is_some_and(|idx| idx >= applied) {
            self.selected = None;
        }
        log::info!("Active k set to {} (requested {})", applied, k);
        applied
    }

    pub fn increment_k(&mut self) -> usize {
        let k = self.clusters.active_k().saturating_add(1);
        self.resize_interactively(k)
    }

    pub fn decrement_k(&mut self) -> usize {
        let k = self.clusters.active_k().saturating_sub(1);
        self.resize_interactively(k)
    }

    fn resize_interactively(&mut self, k: usize) -> usize {
        self.set_mode(RunMode::Idle);
        let applied = self.set_active_k(k);
        self.reassign();
        applied
    }

    /// Replace the point population and rebuild every membership
    ///
    /// One blob is generated per live slot.
    pub fn regenerate(&mut self, cluster_radius: f32) -> Result<()> {
        let points = self
            .generator
            .generate(&mut self.rng, cluster_radius, self.clusters.active_k())?;

        self.points.reset();
        self.points = points;
        self.cluster_radius = cluster_radius;
        self.reassign();
        Ok(())
    }

    /// Scatter every live slot in `[-bound, bound]` per axis without animating
    ///
    /// A non-finite bound is rejected and the centroids stay where they are.
    pub fn randomize_centroids(&mut self, bound: f32) -> Result<()> {
        randomize_centroids(&mut self.clusters, &mut self.rng, bound, &self.palette)
    }

    /// Default bound for [`Simulation::randomize_centroids`]
    pub fn default_randomize_bound(&self) -> f32 {
        self.cluster_radius * self.config.randomize_bound_factor
    }

    /// Rebuild memberships against the current targets
    pub fn reassign(&mut self) -> AssignmentStats {
        if self.config.parallel_assignment {
            assign_parallel(&self.points, &mut self.clusters)
        } else {
            assign(&self.points, &mut self.clusters)
        }
    }

    /// One re-estimation followed by reassignment
    ///
    /// With a centroid selected, the focus is retargeted at its displayed
    /// position so the camera follows it.
    pub fn step(&mut self) -> Result<StepStats> {
        let estimation = update_centroids(
            &mut self.clusters,
            self.animation.clock_mut(),
            &mut self.rng,
            self.cluster_radius,
            &self.palette,
        )?;
        let assignment = self.reassign();

        if let Some(position) = self.selected_position() {
            self.animation.focus_mut().retarget(position);
        }

        Ok(StepStats {
            estimation,
            assignment,
        })
    }

    /// Advance animations only
    pub fn tick(&mut self, dt: f32) {
        self.animation.tick(dt, &mut self.clusters);
    }

    /// Per-frame entry point: animate, then step if auto-stepping
    pub fn frame(&mut self, dt: f32) -> Result<Option<StepStats>> {
        self.tick(dt);
        match self.mode {
            RunMode::AutoStepping => self.step().map(Some),
            RunMode::Idle => Ok(None),
        }
    }

    pub fn toggle_auto_step(&mut self) -> RunMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    fn set_mode(&mut self, mode: RunMode) {
        if self.mode != mode {
            log::info!("Run mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Select the next live centroid and glide the focus to it
    pub fn select_next_centroid(&mut self) -> usize {
        let k = self.clusters.active_k();
        let idx = self.selected.map_or(0, |idx| (idx + 1) % k);
        self.selected = Some(idx);
        if let Some(position) = self.selected_position() {
            self.animation.focus_mut().retarget(position);
        }
        log::debug!("Selected centroid {}", idx);
        idx
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.animation.focus_mut().snap_to(Point3f::origin());
    }

    fn selected_position(&self) -> Option<Point3f> {
        self.selected
            .and_then(|idx| self.clusters.slot(idx))
            .map(|slot| slot.current_position)
    }

    pub fn grow_radius(&mut self) -> f32 {
        self.cluster_radius += self.config.radius_step;
        self.cluster_radius
    }

    /// Shrink the radius, never below the configured minimum
    pub fn shrink_radius(&mut self) -> f32 {
        self.cluster_radius = (self.cluster_radius - self.config.radius_step).max(self.config.min_cluster_radius);
        self.cluster_radius
    }

    /// Apply a host command
    pub fn apply(&mut self, command: Command) -> Result<()> {
        log::trace!("Applying {:?}", command);
        match command {
            Command::IncrementK => {
                self.increment_k();
            }
            Command::DecrementK => {
                self.decrement_k();
            }
            Command::SetK(k) => {
                self.set_active_k(k);
                self.reassign();
            }
            Command::Regenerate => self.regenerate(self.cluster_radius)?,
            Command::RandomizeCentroids => {
                self.randomize_centroids(self.default_randomize_bound())?;
                self.reassign();
            }
            Command::Step => {
                self.step()?;
            }
            Command::ToggleAutoStep => {
                self.toggle_auto_step();
            }
            Command::SelectNextCentroid => {
                self.select_next_centroid();
            }
            Command::ClearSelection => self.clear_selection(),
            Command::GrowRadius => {
                self.grow_radius();
            }
            Command::ShrinkRadius => {
                self.shrink_radius();
            }
        }
        Ok(())
    }

    /// Borrowed view of the displayed state
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            active_k: self.clusters.active_k(),
            mode: self.mode,
            cluster_radius: self.cluster_radius,
            phase: self.animation.phase(),
            selected: self.selected,
            focus: self.animation.focus().current(),
            clusters: self
                .clusters
                .active_slots()
                .iter()
                .enumerate()
                .map(|(index, slot)| ClusterView {
                    index,
                    position: slot.current_position,
                    color: slot.current_color,
                    members: slot.members.as_slice(),
                })
                .collect(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    pub fn clusters(&self) -> &ClusterState {
        &self.clusters
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn cluster_radius(&self) -> f32 {
        self.cluster_radius
    }

    pub fn active_k(&self) -> usize {
        self.clusters.active_k()
    }
}
