//! # Particle Core
//!
//! The simulation engine behind particle life: many typed point particles
//! pushing and pulling on each other according to type-pair rules.
//!
//! This crate contains:
//! - Attraction and radius matrices with their generation strategies
//! - The family of force laws that read those matrices
//! - Arrangement generators that populate the particle store
//! - Pairwise force accumulation on a wrapped world
//! - Integration with wraparound and friction
//! - A live matrix editor that is safe to use while ticks run
//!
//! ## Example
//!
//! ```
//! use particle_core::config::AppConfig;
//! use particle_core::matrix::InteractionMatrices;
//! use particle_core::force::ForceLaw;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let matrices = InteractionMatrices::generate(config.world.max_types, &config.matrix, &mut rng);
//!
//! // Two particles of the same type, well outside the repel radius, attract.
//! let f = ForceLaw::Default.force(25.0, 3, 3, &matrices, &config.force_params());
//! assert!(f > 0.0);
//! ```

/// Pairwise force accumulation with mirror images
pub mod accumulator;
/// Initial particle layouts
pub mod arrangement;
/// Configuration management for simulation parameters
pub mod config;
/// Live matrix edits with snapshot publishing
pub mod editor;
/// Error types
pub mod error;
/// Force laws and the per-type law table
pub mod force;
/// Velocity and position integration
pub mod integrator;
/// Attraction and radius matrices
pub mod matrix;
/// Performance metrics collection and logging
pub mod metrics;

pub use accumulator::{ForceField, PointAttractor};
pub use config::AppConfig;
pub use editor::{EditOp, MatrixEditor, MatrixHandle};
pub use error::{Result, SimError};
pub use force::{ForceLaw, ForceLawTable, ForceParams};
pub use integrator::Motion;
pub use matrix::{InteractionMatrices, TypeMatrix};
pub use metrics::{init_logging, Metrics};
pub use particle_data::Particle;
