//! Simulation and scene generation configuration

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::error::{Error, Result};
use crate::K_MAX;

/// How points are scattered around a generated cluster center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JitterModel {
    /// Uniform angles, radius uniform in `[0, cluster_radius]`
    Uniform,
    /// Uniform angles, radius drawn from `|N(0, stddev)|`
    HalfNormal,
}

/// How many points each generated cluster receives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleCount {
    /// Exactly the nominal number of samples
    Fixed,
    /// Uniform in `[min_fraction * nominal, nominal]`
    UniformBand { min_fraction: f32 },
}

/// Parameters for synthetic scene generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Cluster centers lie on a sphere of `cluster_radius * sphere_radius_factor`
    pub sphere_radius_factor: f32,
    /// Half-normal standard deviation as a fraction of `cluster_radius`
    pub stddev_factor: f32,
    /// Nominal number of points per cluster
    pub samples_per_cluster: usize,
    pub sample_count: SampleCount,
    pub jitter: JitterModel,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sphere_radius_factor: 2.0,
            stddev_factor: 0.5,
            samples_per_cluster: 2000,
            sample_count: SampleCount::Fixed,
            jitter: JitterModel::HalfNormal,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("sphere_radius_factor", self.sphere_radius_factor)?;
        require_positive("stddev_factor", self.stddev_factor)?;
        if self.samples_per_cluster == 0 {
            return Err(Error::InvalidConfig("samples_per_cluster must be at least 1".to_string()));
        }
        if let SampleCount::UniformBand { min_fraction } = self.sample_count {
            if !(min_fraction > 0.0 && min_fraction <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "sample band min_fraction must be in (0, 1], got {min_fraction}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a [`ClusterState`](crate::ClusterState)-driven simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the injected random source, `None` to draw one from entropy
    pub seed: Option<u64>,
    pub cluster_radius: f32,
    /// Floor for interactive radius shrinking
    pub min_cluster_radius: f32,
    /// Radius change per grow/shrink command
    pub radius_step: f32,
    pub initial_k: usize,
    pub k_max: usize,
    /// Seconds for a centroid animation segment
    pub animation_duration: f32,
    /// Seconds for a camera-focus transition
    pub focus_duration: f32,
    /// Centroid randomization bound as a multiple of `cluster_radius`
    pub randomize_bound_factor: f32,
    /// Uniform alpha for cluster colors, `None` for opaque
    pub display_alpha: Option<f32>,
    /// Run nearest-centroid scans on the rayon pool
    pub parallel_assignment: bool,
    pub generation: GenerationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cluster_radius: 50.0,
            min_cluster_radius: 10.0,
            radius_step: 1.0,
            initial_k: 12,
            k_max: K_MAX,
            animation_duration: 0.5,
            focus_duration: 1.0,
            randomize_bound_factor: 2.0,
            display_alpha: Some(0.9),
            parallel_assignment: false,
            generation: GenerationConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cluster_radius(mut self, cluster_radius: f32) -> Self {
        self.cluster_radius = cluster_radius;
        self
    }

    pub fn with_initial_k(mut self, initial_k: usize) -> Self {
        self.initial_k = initial_k;
        self
    }

    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max;
        self
    }

    pub fn with_animation_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    pub fn with_samples_per_cluster(mut self, samples: usize) -> Self {
        self.generation.samples_per_cluster = samples;
        self
    }

    pub fn with_parallel_assignment(mut self, enabled: bool) -> Self {
        self.parallel_assignment = enabled;
        self
    }

    /// Palette matching the configured display alpha
    pub fn palette(&self) -> Palette {
        match self.display_alpha {
            Some(alpha) => Palette::with_alpha(alpha),
            None => Palette::default(),
        }
    }

    /// Check every field, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        require_positive("cluster_radius", self.cluster_radius)?;
        require_positive("min_cluster_radius", self.min_cluster_radius)?;
        require_positive("radius_step", self.radius_step)?;
        require_positive("animation_duration", self.animation_duration)?;
        require_positive("focus_duration", self.focus_duration)?;
        require_positive("randomize_bound_factor", self.randomize_bound_factor)?;

        if self.k_max == 0 {
            return Err(Error::InvalidConfig("k_max must be at least 1".to_string()));
        }
        if self.initial_k == 0 || self.initial_k > self.k_max {
            return Err(Error::InvalidConfig(format!(
                "initial_k must be in [1, {}], got {}",
                self.k_max, self.initial_k
            )));
        }
        if let Some(alpha) = self.display_alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidConfig(format!(
                    "display_alpha must be in [0, 1], got {alpha}"
                )));
            }
        }

        self.generation.validate()
    }
}

fn require_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.k_max, 256);
        assert_eq!(config.initial_k, 12);
        assert_eq!(config.generation.jitter, JitterModel::HalfNormal);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert!(SimulationConfig::default().with_cluster_radius(0.0).validate().is_err());
        assert!(SimulationConfig::default().with_initial_k(0).validate().is_err());
        assert!(SimulationConfig::default().with_k_max(4).validate().is_err());
        assert!(SimulationConfig::default().with_animation_duration(-1.0).validate().is_err());
        assert!(SimulationConfig::default().with_samples_per_cluster(0).validate().is_err());

        let mut config = SimulationConfig::default();
        config.display_alpha = Some(1.5);
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.generation.sample_count = SampleCount::UniformBand { min_fraction: 0.0 };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_palette_follows_alpha() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.palette().color_for(0).a, 229);
        config.display_alpha = None;
        assert_eq!(config.palette().color_for(0).a, 255);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "seed": 7, "initial_k": 4, "generation": { "jitter": "Uniform" } }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_k, 4);
        assert_eq!(config.cluster_radius, 50.0);
        assert_eq!(config.generation.jitter, JitterModel::Uniform);
        assert_eq!(config.generation.samples_per_cluster, 2000);
    }
}
