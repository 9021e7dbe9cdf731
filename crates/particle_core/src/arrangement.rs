//! Initial particle layouts.
//!
//! `Concentric`, `Row` and `Grid` split the population by integer division and
//! may return fewer particles than requested. Every other layout returns
//! exactly `count` particles.

use particle_data::{Arrangement, Particle};
use rand::Rng;
use std::f64::consts::TAU;

use crate::config::TYPE_ID_LIMIT;
use crate::error::{Result, SimError};

/// Jitter applied to layouts that would otherwise stack particles exactly.
const SMALL_JITTER: f64 = 1.0;
/// Jitter used by the filled circle and row layouts.
const WIDE_JITTER: f64 = 20.0;
/// Horizontal shift of the row bands.
const ROW_OFFSET: f64 = 20.0;

/// Builds a fresh particle population.
pub fn arrange<R: Rng + ?Sized>(
    arrangement: Arrangement,
    count: usize,
    type_count: usize,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    if type_count == 0 || type_count > TYPE_ID_LIMIT {
        return Err(SimError::invalid_config(format!(
            "type count {type_count} outside 1..={TYPE_ID_LIMIT}"
        )));
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    let mut particles = Vec::with_capacity(count);
    let random_type = |rng: &mut R| rng.gen_range(0..type_count) as u8;
    let jitter = |rng: &mut R, amount: f64| amount * (rng.gen::<f64>() - 0.5);

    match arrangement {
        Arrangement::Random => {
            for _ in 0..count {
                let x = rng.gen::<f64>() * width;
                let y = rng.gen::<f64>() * height;
                particles.push(Particle::new(x, y, random_type(rng)));
            }
        }
        Arrangement::Circle => {
            for i in 0..count {
                let angle = i as f64 * TAU / count as f64;
                let x = cx + angle.cos() * cx;
                let y = cy + angle.sin() * cy;
                particles.push(Particle::new(x, y, random_type(rng)));
            }
        }
        Arrangement::FilledCircle => {
            for i in 0..count {
                let angle = i as f64 * TAU / count as f64;
                let x = cx + angle.cos() * cx + jitter(rng, WIDE_JITTER);
                let y = cy + angle.sin() * cy + jitter(rng, WIDE_JITTER);
                particles.push(Particle::new(x, y, random_type(rng)));
            }
        }
        Arrangement::Concentric => {
            let per_ring = count / type_count;
            for ring in 0..type_count {
                let scale = ring as f64 / type_count as f64;
                for i in 0..per_ring {
                    let angle = i as f64 * TAU / per_ring as f64;
                    let x = cx + angle.cos() * cx * scale + jitter(rng, SMALL_JITTER);
                    let y = cy + angle.sin() * cy * scale + jitter(rng, SMALL_JITTER);
                    particles.push(Particle::new(x, y, ring as u8));
                }
            }
        }
        Arrangement::Line => {
            for i in 0..count {
                let x = i as f64 * width / count as f64;
                let y = cy + jitter(rng, SMALL_JITTER);
                particles.push(Particle::new(x, y, random_type(rng)));
            }
        }
        Arrangement::Grid => {
            let spacing = (count as f64).sqrt();
            let side = spacing as usize;
            for gx in 0..side {
                for gy in 0..side {
                    let x = gx as f64 * width / spacing + jitter(rng, SMALL_JITTER);
                    let y = gy as f64 * height / spacing + jitter(rng, SMALL_JITTER);
                    particles.push(Particle::new(x, y, random_type(rng)));
                }
            }
        }
        Arrangement::Row => {
            let per_band = count / type_count;
            let band = width / type_count as f64;
            for t in 0..type_count {
                for _ in 0..per_band {
                    let x = band * (t as f64 + rng.gen::<f64>()) - ROW_OFFSET;
                    let y = cy + jitter(rng, WIDE_JITTER);
                    particles.push(Particle::new(x, y, t as u8));
                }
            }
        }
        Arrangement::Point => {
            for _ in 0..count {
                let x = cx + jitter(rng, SMALL_JITTER);
                let y = cy + jitter(rng, SMALL_JITTER);
                particles.push(Particle::new(x, y, random_type(rng)));
            }
        }
    }

    Ok(particles)
}
