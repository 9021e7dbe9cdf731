use anyhow::Context;
use particle_core::arrangement::arrange;
use particle_core::force::ForceLawTable;
use particle_core::{AppConfig, InteractionMatrices, MatrixEditor, Metrics};
use particle_data::Arrangement;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Simulation;

fn build_pool(workers: usize) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("particle-worker-{i}"))
        .build()
        .context("failed to build tick worker pool")
}

impl Simulation {
    /// Validates `config`, generates the matrices and force laws, and
    /// populates the particle store with the configured arrangement.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let max_types = config.world.max_types;
        let matrices = InteractionMatrices::generate(max_types, &config.matrix, &mut rng);
        let laws = ForceLawTable::uniform(config.physics.force_law, max_types, &mut rng);
        let editor = MatrixEditor::new(matrices, config.matrix.clone(), rng.gen()).into_handle();
        let pool = build_pool(config.physics.workers)?;

        tracing::info!(
            fingerprint = %config.fingerprint(),
            types = config.world.type_count,
            particles = config.world.particle_count,
            force_law = %config.physics.force_law,
            metric = %config.physics.distance_metric,
            workers = pool.current_num_threads(),
            "Simulation created"
        );

        let mut sim = Self {
            tick: 0,
            config,
            particles: Vec::new(),
            editor,
            laws,
            rng,
            pool,
            metrics: Metrics::new(),
            rebuild_pending: false,
            attractor: None,
            delta_buffer: Vec::new(),
        };
        sim.rebuild(sim.config.world.arrangement)?;
        Ok(sim)
    }

    /// Replaces the whole configuration.
    ///
    /// Scalar physics changes apply on the next tick. Count, extent or
    /// arrangement changes mark a rebuild for the next tick. A matrix is
    /// regenerated only when its strategy, distribution or strategy constants
    /// change; edit-only settings keep the published matrices. A force law
    /// change gives every type a fresh law instance. `max_types` is fixed for
    /// the lifetime of the simulation. On error nothing is changed.
    pub fn configure(&mut self, config: AppConfig) -> anyhow::Result<()> {
        config.validate()?;
        anyhow::ensure!(
            config.world.max_types == self.config.world.max_types,
            "Max types is fixed at {} for this simulation",
            self.config.world.max_types
        );
        let pool = if config.physics.workers != self.config.physics.workers {
            Some(build_pool(config.physics.workers)?)
        } else {
            None
        };

        let old = std::mem::replace(&mut self.config, config);
        let new = &self.config;

        if new.matrix != old.matrix {
            self.editor.set_config(new.matrix.clone(), &mut self.rng);
        }
        if new.physics.force_law != old.physics.force_law {
            self.laws =
                ForceLawTable::uniform(new.physics.force_law, new.world.max_types, &mut self.rng);
        }
        if let Some(pool) = pool {
            self.pool = pool;
        }
        if new.world != old.world {
            self.rebuild_pending = true;
        }

        tracing::info!(
            fingerprint = %self.config.fingerprint(),
            rebuild_pending = self.rebuild_pending,
            workers = self.pool.current_num_threads(),
            "Simulation reconfigured"
        );
        Ok(())
    }

    /// Discards every particle and repopulates the store with `arrangement`
    /// using the configured counts and world extent.
    pub fn rebuild(&mut self, arrangement: Arrangement) -> anyhow::Result<()> {
        let world = &self.config.world;
        self.particles = arrange(
            arrangement,
            world.particle_count,
            world.type_count,
            world.width,
            world.height,
            &mut self.rng,
        )?;
        self.config.world.arrangement = arrangement;
        self.rebuild_pending = false;
        self.metrics.increment_counter("rebuilds");

        tracing::info!(
            arrangement = %arrangement,
            requested = self.config.world.particle_count,
            produced = self.particles.len(),
            "Particle store rebuilt"
        );
        Ok(())
    }
}
