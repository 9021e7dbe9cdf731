//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml` file.
//! Every section has defaults, so a file only needs the keys it changes.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags of the runner (override both)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 500.0
//! height = 500.0
//! particle_count = 300
//! type_count = 10
//! arrangement = "concentric"
//! seed = 42
//!
//! [physics]
//! speed = 0.001
//! friction = 0.999
//! force_law = "absolute"
//!
//! [matrix]
//! attraction = "random"
//! distribution = "uniform"
//! ```

use particle_data::{
    Arrangement, DistanceMetric, ForceLawKind, MatrixStrategy, RadiusStrategy,
    SampleDistribution,
};
use serde::{Deserialize, Serialize};

use crate::force::ForceParams;

/// Largest number of particle types addressable by a `u8` type id.
pub const TYPE_ID_LIMIT: usize = 256;

/// World extent, population and layout.
///
/// Changing `particle_count` or `type_count` only takes effect after the
/// particle store is rebuilt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub particle_count: usize,
    pub max_particles: usize,
    pub type_count: usize,
    /// Side length of the allocated matrices. Fixed for the lifetime of a run.
    pub max_types: usize,
    pub arrangement: Arrangement,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            particle_count: 300,
            max_particles: 10_000,
            type_count: 10,
            max_types: 100,
            arrangement: Arrangement::Random,
            seed: None,
        }
    }
}

/// Scalar physics constants. Changes apply on the next tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub speed: f64,
    pub friction: f64,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub distance_metric: DistanceMetric,
    pub force_law: ForceLawKind,
    /// Worker threads for the tick pool; 0 lets rayon decide.
    pub workers: usize,
    /// Minimum particles handed to a single rayon task.
    pub min_chunk_len: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            speed: 0.001,
            friction: 0.999,
            repel_radius: 0.5,
            repel_strength: 2.0,
            distance_metric: DistanceMetric::Manhattan,
            force_law: ForceLawKind::Default,
            workers: 0,
            min_chunk_len: 64,
        }
    }
}

/// Matrix generation and editing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MatrixConfig {
    pub attraction: MatrixStrategy,
    pub radii: RadiusStrategy,
    pub distribution: SampleDistribution,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Diagonal value written by the cluster strategy.
    pub cluster_self: f64,
    /// Off-diagonal value written by the cluster strategy.
    pub cluster_other: f64,
    /// Clamp point writes from the editor to [-1, 1].
    pub clamp_edits: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            attraction: MatrixStrategy::Cluster,
            radii: RadiusStrategy::Equal,
            distribution: SampleDistribution::Normal,
            min_radius: 100.0,
            max_radius: 200.0,
            cluster_self: 1.0,
            cluster_other: 0.0,
            clamp_edits: true,
        }
    }
}

impl MatrixConfig {
    /// True when switching to `other` changes how the attraction matrix is generated.
    #[must_use]
    pub fn attraction_inputs_differ(&self, other: &Self) -> bool {
        self.attraction != other.attraction
            || self.distribution != other.distribution
            || self.cluster_self != other.cluster_self
            || self.cluster_other != other.cluster_other
    }

    /// True when switching to `other` changes how the radius matrix is generated.
    #[must_use]
    pub fn radius_inputs_differ(&self, other: &Self) -> bool {
        self.radii != other.radii
            || self.distribution != other.distribution
            || self.min_radius != other.min_radius
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub matrix: MatrixConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - World extents must be positive and finite
    /// - `1 <= type_count <= max_types <= 256`
    /// - `1 <= particle_count <= max_particles`
    /// - Physics scalars must be finite and non-negative (friction above 1 is allowed)
    /// - `0 < min_radius <= max_radius`
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.width.is_finite() && self.world.width > 0.0,
            "World width must be positive"
        );
        anyhow::ensure!(
            self.world.height.is_finite() && self.world.height > 0.0,
            "World height must be positive"
        );
        anyhow::ensure!(self.world.type_count >= 1, "Type count must be at least 1");
        anyhow::ensure!(
            self.world.type_count <= self.world.max_types,
            "Type count {} exceeds max types {}",
            self.world.type_count,
            self.world.max_types
        );
        anyhow::ensure!(
            self.world.max_types <= TYPE_ID_LIMIT,
            "Max types too large (max {TYPE_ID_LIMIT})"
        );
        anyhow::ensure!(
            self.world.particle_count >= 1,
            "Particle count must be at least 1"
        );
        anyhow::ensure!(
            self.world.particle_count <= self.world.max_particles,
            "Particle count {} exceeds max particles {}",
            self.world.particle_count,
            self.world.max_particles
        );

        // Physics validation
        anyhow::ensure!(
            self.physics.speed.is_finite() && self.physics.speed >= 0.0,
            "Speed must be non-negative"
        );
        anyhow::ensure!(
            self.physics.friction.is_finite() && self.physics.friction >= 0.0,
            "Friction must be non-negative"
        );
        anyhow::ensure!(
            self.physics.repel_radius.is_finite() && self.physics.repel_radius >= 0.0,
            "Repel radius must be non-negative"
        );
        anyhow::ensure!(
            self.physics.repel_strength.is_finite() && self.physics.repel_strength >= 0.0,
            "Repel strength must be non-negative"
        );
        anyhow::ensure!(
            self.physics.min_chunk_len >= 1,
            "Minimum chunk length must be positive"
        );

        // Matrix validation
        anyhow::ensure!(
            self.matrix.min_radius.is_finite() && self.matrix.min_radius > 0.0,
            "Min radius must be positive"
        );
        anyhow::ensure!(
            self.matrix.max_radius.is_finite() && self.matrix.max_radius >= self.matrix.min_radius,
            "Max radius must be at least min radius"
        );
        anyhow::ensure!(
            self.matrix.cluster_self.is_finite() && self.matrix.cluster_other.is_finite(),
            "Cluster constants must be finite"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Repulsion parameters consumed by the force laws.
    #[must_use]
    pub fn force_params(&self) -> ForceParams {
        ForceParams {
            repel_radius: self.physics.repel_radius,
            repel_strength: self.physics.repel_strength,
        }
    }

    /// Stable hash of everything that shapes the dynamics, used to tag runs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.physics.speed).as_bytes());
        hasher.update(format!("{:?}", self.physics.friction).as_bytes());
        hasher.update(format!("{:?}", self.physics.repel_radius).as_bytes());
        hasher.update(format!("{:?}", self.physics.repel_strength).as_bytes());
        hasher.update(self.physics.distance_metric.name().as_bytes());
        hasher.update(self.physics.force_law.name().as_bytes());
        hasher.update(format!("{:?}", self.matrix).as_bytes());
        hex::encode(hasher.finalize())
    }
}
