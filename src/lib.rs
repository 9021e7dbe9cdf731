//! Particle life: typed point particles on a wrapped 2-D world, pushed and
//! pulled by per-type-pair attraction rules.
//!
//! The numerical core lives in the `particle_core` and `particle_data`
//! crates. This crate adds the [`model::simulation::Simulation`] facade that
//! owns the particle store and tick lifecycle, plus config file loading for
//! the headless runner.

pub mod model;
