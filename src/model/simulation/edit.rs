use particle_core::{EditOp, ForceLaw, ForceLawTable, Particle, PointAttractor, Result, SimError};
use particle_data::ForceLawKind;

use super::Simulation;

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid_config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

impl Simulation {
    /// Applies one matrix edit and returns the editor version it produced.
    ///
    /// Equivalent to calling [`MatrixEditor::apply`](particle_core::MatrixEditor::apply)
    /// on [`Simulation::matrix_handle`]; the next tick sees the result.
    pub fn edit_matrix(&self, op: EditOp) -> Result<u64> {
        let version = self.editor.apply(op)?;
        self.metrics.increment_counter("matrix_edits");
        Ok(version)
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.config.physics.speed = non_negative("speed", speed)?;
        Ok(())
    }

    /// Friction above 1 is accepted and feeds energy into the system.
    pub fn set_friction(&mut self, friction: f64) -> Result<()> {
        self.config.physics.friction = non_negative("friction", friction)?;
        Ok(())
    }

    pub fn set_repel_radius(&mut self, radius: f64) -> Result<()> {
        self.config.physics.repel_radius = non_negative("repel radius", radius)?;
        Ok(())
    }

    pub fn set_repel_strength(&mut self, strength: f64) -> Result<()> {
        self.config.physics.repel_strength = non_negative("repel strength", strength)?;
        Ok(())
    }

    /// Changes the number of active types. The particle store is rebuilt with
    /// the configured arrangement at the start of the next tick.
    pub fn set_type_count(&mut self, type_count: usize) -> Result<()> {
        let max_types = self.config.world.max_types;
        if type_count == 0 || type_count > max_types {
            return Err(SimError::invalid_config(format!(
                "type count {type_count} outside 1..={max_types}"
            )));
        }
        if type_count != self.config.world.type_count {
            self.config.world.type_count = type_count;
            self.rebuild_pending = true;
        }
        Ok(())
    }

    /// Changes the particle count. Takes effect on the next rebuild, which
    /// runs at the start of the next tick.
    pub fn set_particle_count(&mut self, particle_count: usize) -> Result<()> {
        let max_particles = self.config.world.max_particles;
        if particle_count == 0 || particle_count > max_particles {
            return Err(SimError::invalid_config(format!(
                "particle count {particle_count} outside 1..={max_particles}"
            )));
        }
        if particle_count != self.config.world.particle_count {
            self.config.world.particle_count = particle_count;
            self.rebuild_pending = true;
        }
        Ok(())
    }

    /// Gives one type a fresh instance of `kind`.
    pub fn set_force_law(&mut self, type_id: usize, kind: ForceLawKind) -> Result<()> {
        let law = ForceLaw::from_kind(kind, &mut self.rng);
        self.laws.set(type_id, law)?;
        tracing::debug!(type_id, force_law = %kind, "Force law replaced");
        Ok(())
    }

    /// Gives every type a fresh instance of `kind`.
    pub fn set_force_law_all(&mut self, kind: ForceLawKind) {
        self.laws = ForceLawTable::uniform(kind, self.config.world.max_types, &mut self.rng);
        self.config.physics.force_law = kind;
    }

    /// Sets or clears the point every particle is pulled toward on the
    /// following ticks.
    pub fn set_attractor(&mut self, attractor: Option<PointAttractor>) -> Result<()> {
        if let Some(a) = attractor {
            if !(a.x.is_finite() && a.y.is_finite() && a.strength.is_finite()) {
                return Err(SimError::invalid_config("attractor must be finite"));
            }
        }
        self.attractor = attractor;
        Ok(())
    }

    /// Replaces the particle store with caller-supplied particles, e.g. a
    /// hand-placed scene. Clears any pending rebuild.
    pub fn load_particles(&mut self, particles: Vec<Particle>) -> Result<()> {
        let type_count = self.config.world.type_count;
        if let Some(p) = particles.iter().find(|p| usize::from(p.type_id) >= type_count) {
            return Err(SimError::TypeOutOfRange {
                type_id: usize::from(p.type_id),
                max_types: type_count,
            });
        }
        if particles.iter().any(|p| !p.is_finite()) {
            return Err(SimError::invalid_config("particle state must be finite"));
        }
        self.particles = particles;
        self.rebuild_pending = false;
        Ok(())
    }
}
