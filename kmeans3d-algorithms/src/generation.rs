//! Synthetic scene generation
//!
//! A scene is a set of roughly spherical point blobs whose centers are spread
//! uniformly over the surface of a sphere around the origin.

use kmeans3d_core::{
    spherical_to_cartesian, Error, GenerationConfig, JitterModel, Point3f, PointBuffer, Result,
    SampleCount,
};
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::reseed;

/// Produces fresh point populations from a [`GenerationConfig`]
#[derive(Debug, Clone, Default)]
pub struct SceneGenerator {
    config: GenerationConfig,
}

impl SceneGenerator {
    /// Create a generator after validating its configuration
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Radius of the sphere that cluster centers are placed on
    pub fn sphere_radius(&self, cluster_radius: f32) -> f32 {
        cluster_radius * self.config.sphere_radius_factor
    }

    /// Standard deviation of the half-normal jitter
    pub fn stddev(&self, cluster_radius: f32) -> f32 {
        cluster_radius * self.config.stddev_factor
    }

    /// Generate `k` clusters of points
    ///
    /// The random source is re-seeded from `rng` before sampling. The
    /// returned buffer is new; discarding the previous population is the
    /// caller's job.
    ///
    /// # Arguments
    /// * `rng` - Injected random source
    /// * `cluster_radius` - Scale of a single cluster; must be positive
    /// * `k` - Number of clusters; zero yields an empty buffer
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cluster_radius: f32,
        k: usize,
    ) -> Result<PointBuffer> {
        if !(cluster_radius.is_finite() && cluster_radius > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cluster_radius must be positive, got {cluster_radius}"
            )));
        }

        let mut rng = reseed(rng);
        let sphere_radius = self.sphere_radius(cluster_radius);

        let centers: Vec<Point3f> = (0..k)
            .map(|_| sample_sphere_surface(&mut rng, sphere_radius))
            .collect();

        let mut points = PointBuffer::with_capacity(k * self.config.samples_per_cluster);
        for center in &centers {
            let count = self.cluster_size(&mut rng);
            points.extend((0..count).map(|_| self.jitter(&mut rng, center, cluster_radius)));
        }

        log::info!(
            "Generated {} points in {} clusters (cluster radius {}, sphere radius {})",
            points.len(),
            k,
            cluster_radius,
            sphere_radius
        );
        Ok(points)
    }

    fn cluster_size<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let nominal = self.config.samples_per_cluster;
        match self.config.sample_count {
            SampleCount::Fixed => nominal,
            SampleCount::UniformBand { min_fraction } => {
                let low = ((nominal as f32 * min_fraction).ceil() as usize).clamp(1, nominal);
                rng.gen_range(low..=nominal)
            }
        }
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R, center: &Point3f, cluster_radius: f32) -> Point3f {
        let theta = rng.gen_range(0.0..TAU);
        let phi = rng.gen_range(0.0..TAU);
        let radius = match self.config.jitter {
            JitterModel::Uniform => rng.gen_range(0.0..=cluster_radius),
            JitterModel::HalfNormal => half_normal(rng, self.stddev(cluster_radius)),
        };
        *center + spherical_to_cartesian(radius, theta, phi).coords
    }
}

/// Uniform sample on the surface of a sphere centered at the origin
///
/// Uses the inverse-CDF construction `theta = acos(1 - 2u)`, `phi = 2*pi*v`.
pub fn sample_sphere_surface<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Point3f {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = (1.0 - 2.0 * u).clamp(-1.0, 1.0).acos();
    let phi = 2.0 * PI * v;
    spherical_to_cartesian(radius, theta, phi)
}

/// Gaussian sample via the Box-Muller transform
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R, mean: f32, stddev: f32) -> f32 {
    // (0, 1] so the logarithm stays finite
    let u1 = 1.0 - rng.gen::<f32>();
    let u2: f32 = rng.gen();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * stddev + mean
}

/// Absolute value of a zero-mean Gaussian sample
pub fn half_normal<R: Rng + ?Sized>(rng: &mut R, stddev: f32) -> f32 {
    box_muller(rng, 0.0, stddev).abs()
}
