//! Position integration with wraparound and friction.

use particle_data::Particle;
use rayon::prelude::*;

/// Per-tick integration constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub speed: f64,
    pub friction: f64,
    pub width: f64,
    pub height: f64,
}

/// Teleports a particle that left the world to the opposite edge.
///
/// Only one world extent of overshoot is corrected per call.
#[inline]
pub fn wrap(p: &mut Particle, width: f64, height: f64) {
    if p.x < 0.0 {
        p.x = width;
    } else if p.x > width {
        p.x = 0.0;
    }

    if p.y < 0.0 {
        p.y = height;
    } else if p.y > height {
        p.y = 0.0;
    }
}

/// Wrap, advance by `velocity * speed`, then damp velocity by `friction`.
#[inline]
pub fn integrate(p: &mut Particle, motion: &Motion) {
    wrap(p, motion.width, motion.height);

    p.x += p.vx * motion.speed;
    p.y += p.vy * motion.speed;

    p.vx *= motion.friction;
    p.vy *= motion.friction;
}

/// Adds each accumulated delta to its particle's velocity and integrates, in
/// parallel. `deltas` must be index-aligned with `particles`.
pub fn integrate_all(
    particles: &mut [Particle],
    deltas: &[(f64, f64)],
    motion: &Motion,
    min_chunk_len: usize,
) {
    debug_assert_eq!(particles.len(), deltas.len());
    particles
        .par_iter_mut()
        .zip(deltas.par_iter())
        .with_min_len(min_chunk_len.max(1))
        .for_each(|(p, (dvx, dvy))| {
            p.vx += dvx;
            p.vy += dvy;
            integrate(p, motion);
        });
}
