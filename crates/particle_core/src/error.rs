//! Error types for the simulation core.
//!
//! Configuration mistakes are surfaced as values of [`SimError`] at the
//! configuration boundary. Numerical edge cases inside a tick are handled
//! locally and never reach this type.

use particle_data::ParseSelectionError;
use thiserror::Error;

/// Main error type for particle_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A selection name (arrangement, force law, strategy) was not recognised.
    #[error(transparent)]
    UnknownSelection(#[from] ParseSelectionError),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A matrix cell outside the allocated square was addressed.
    #[error("Matrix index ({row}, {col}) out of range for size {size}")]
    IndexOutOfRange { row: usize, col: usize, size: usize },

    /// A particle type outside the allocated type range was addressed.
    #[error("Type {type_id} out of range (max types {max_types})")]
    TypeOutOfRange { type_id: usize, max_types: usize },
}

/// Result type alias for particle_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new invalid-configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
