use particle_core::accumulator::{accumulate_all, ForceField};
use particle_core::integrator::{integrate_all, Motion};
use serde::Serialize;
use std::time::Instant;

use super::Simulation;

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickStats {
    pub tick: u64,
    pub particles: usize,
    pub mean_speed: f64,
    /// Editor version of the matrices the tick read.
    pub matrix_version: u64,
    pub duration_us: u64,
}

impl Simulation {
    /// Advances the simulation by one tick.
    ///
    /// The tick runs in two phases on the worker pool, each a full barrier:
    /// 1. Every particle accumulates its velocity change from the positions
    ///    at the start of the tick.
    /// 2. Every particle applies that change, wraps, advances and is damped.
    ///
    /// Phase 1 also adds the pull of the point attractor, when one is set.
    /// The matrices are captured once before phase 1; edits made while the
    /// tick runs are seen by the next tick. A pending rebuild runs first.
    pub fn step(&mut self) -> anyhow::Result<TickStats> {
        if self.rebuild_pending {
            self.rebuild(self.config.world.arrangement)?;
        }

        let start = Instant::now();
        let (matrices, matrix_version) = self.editor.versioned_snapshot();

        let world = &self.config.world;
        let physics = &self.config.physics;
        let field = ForceField {
            matrices: &matrices,
            laws: &self.laws,
            params: self.config.force_params(),
            metric: physics.distance_metric,
            width: world.width,
            height: world.height,
            attractor: self.attractor,
        };
        let motion = Motion {
            speed: physics.speed,
            friction: physics.friction,
            width: world.width,
            height: world.height,
        };
        let min_chunk_len = physics.min_chunk_len;

        let mut deltas = std::mem::take(&mut self.delta_buffer);
        let particles = &mut self.particles;
        self.pool.install(|| {
            accumulate_all(&*particles, &field, min_chunk_len, &mut deltas);
            integrate_all(particles, &deltas, &motion, min_chunk_len);
        });
        self.delta_buffer = deltas;

        self.tick += 1;
        let duration = start.elapsed();
        self.metrics.record_tick(duration, self.particles.len());

        Ok(TickStats {
            tick: self.tick,
            particles: self.particles.len(),
            mean_speed: self.mean_speed(),
            matrix_version,
            duration_us: duration.as_micros() as u64,
        })
    }

    /// Runs `ticks` steps and returns the stats of the last one.
    pub fn run(&mut self, ticks: u64) -> anyhow::Result<Option<TickStats>> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.step()?);
        }
        Ok(last)
    }
}
