//! The simulation facade consumed by rendering, UI and the headless runner.
//!
//! A [`Simulation`] owns the particle store, the per-type force laws and the
//! tick lifecycle. The interaction matrices live behind a shared
//! [`MatrixHandle`] so an editor on another thread can change them while
//! ticks are running.

use particle_core::force::ForceLawTable;
use particle_core::{AppConfig, InteractionMatrices, MatrixHandle, Metrics, Particle, PointAttractor};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub mod edit;
pub mod init;
pub mod update;

pub use update::TickStats;

pub struct Simulation {
    pub tick: u64,
    config: AppConfig,
    particles: Vec<Particle>,
    editor: MatrixHandle,
    laws: ForceLawTable,
    rng: ChaCha8Rng,
    pool: rayon::ThreadPool,
    metrics: Metrics,
    rebuild_pending: bool,
    attractor: Option<PointAttractor>,
    delta_buffer: Vec<(f64, f64)>,
}

impl Simulation {
    /// Read-only view of the particle store for rendering.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The matrices the next tick will use.
    #[must_use]
    pub fn matrices(&self) -> Arc<InteractionMatrices> {
        self.editor.snapshot()
    }

    /// A handle another thread can use to edit the matrices.
    #[must_use]
    pub fn matrix_handle(&self) -> MatrixHandle {
        Arc::clone(&self.editor)
    }

    /// Threads in the tick pool.
    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[must_use]
    pub fn force_laws(&self) -> &ForceLawTable {
        &self.laws
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The external point attractor applied on every tick, if any.
    #[must_use]
    pub fn attractor(&self) -> Option<PointAttractor> {
        self.attractor
    }

    /// True when a count change is waiting for the next rebuild.
    #[must_use]
    pub fn rebuild_pending(&self) -> bool {
        self.rebuild_pending
    }

    /// Mean particle speed, zero for an empty store.
    #[must_use]
    pub fn mean_speed(&self) -> f64 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles.iter().map(Particle::speed).sum::<f64>() / self.particles.len() as f64
    }
}
