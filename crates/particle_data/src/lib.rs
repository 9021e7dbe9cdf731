//! # Particle Data
//!
//! Plain data shared by the particle life engine and its consumers: the particle
//! record itself and the named selections (arrangements, force laws, metrics and
//! matrix strategies) that configuration files and the command line refer to.

pub mod data;

pub use data::particle::Particle;
pub use data::selection::{
    Arrangement, DistanceMetric, ForceLawKind, MatrixStrategy, ParseSelectionError,
    RadiusStrategy, SampleDistribution,
};
