pub use particle_core::{EditOp, ForceLaw, InteractionMatrices, MatrixHandle, Particle, PointAttractor};
pub mod accumulator {
    pub use particle_core::accumulator::*;
}
pub mod arrangement {
    pub use particle_core::arrangement::*;
}
pub mod editor {
    pub use particle_core::editor::*;
}
pub mod error {
    pub use particle_core::error::*;
}
pub mod force {
    pub use particle_core::force::*;
}
pub mod integrator {
    pub use particle_core::integrator::*;
}
pub mod matrix {
    pub use particle_core::matrix::*;
}
pub mod metrics {
    pub use particle_core::metrics::*;
}
pub mod selection {
    pub use particle_data::data::selection::*;
}

pub mod config;
pub mod simulation;
