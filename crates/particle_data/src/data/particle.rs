use serde::{Deserialize, Serialize};

/// A single typed point particle.
///
/// Positions live in world units on a toroidal plane; `type_id` selects the
/// row of the attraction and radius matrices that governs the particle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub type_id: u8,
}

impl Particle {
    /// Creates a particle at rest.
    #[must_use]
    pub fn new(x: f64, y: f64, type_id: u8) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            type_id,
        }
    }

    #[must_use]
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Euclidean length of the velocity vector.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}
