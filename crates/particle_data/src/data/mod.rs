//! Core data structures for the particle life simulation.

pub mod particle;
pub mod selection;
