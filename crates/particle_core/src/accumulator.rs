//! Pairwise force accumulation on a wrapped world.
//!
//! Each neighbour is evaluated at its direct position and at four mirror
//! images shifted by one world width or height along a single axis. Corner
//! images are not evaluated, so wraparound is exact along one axis at a time
//! and approximate near the corners of the world.
//!
//! An optional [`PointAttractor`] adds one more term per particle, evaluated at
//! its direct position only.

use particle_data::{DistanceMetric, Particle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::force::{ForceLaw, ForceLawTable, ForceParams, MIN_DISTANCE};
use crate::matrix::InteractionMatrices;

/// A fixed point in the world, such as a cursor, that every particle feels.
///
/// Positive `strength` pulls particles toward the point, negative pushes them
/// away. The pull falls off as `strength / d` and ignores particle types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointAttractor {
    pub x: f64,
    pub y: f64,
    pub strength: f64,
}

impl PointAttractor {
    /// Velocity change for a particle at `p`.
    #[inline]
    #[must_use]
    pub fn pull(&self, p: &Particle, metric: DistanceMetric) -> (f64, f64) {
        let dx = self.x - p.x;
        let dy = self.y - p.y;
        let d = metric.distance(dx, dy).max(MIN_DISTANCE);
        let magnitude = self.strength / d;
        (dx / d * magnitude, dy / d * magnitude)
    }
}

/// Everything a tick needs to turn positions into velocity changes.
#[derive(Clone, Copy)]
pub struct ForceField<'a> {
    pub matrices: &'a InteractionMatrices,
    pub laws: &'a ForceLawTable,
    pub params: ForceParams,
    pub metric: DistanceMetric,
    pub width: f64,
    pub height: f64,
    pub attractor: Option<PointAttractor>,
}

impl ForceField<'_> {
    /// Direct image followed by the four single-axis mirrors.
    #[inline]
    fn image_offsets(&self) -> [(f64, f64); 5] {
        [
            (0.0, 0.0),
            (self.width, 0.0),
            (-self.width, 0.0),
            (0.0, self.height),
            (0.0, -self.height),
        ]
    }
}

/// Calls `visit(j, dx, dy, d)` for every image of every particle other than
/// `i`, in ascending `j` order.
///
/// `(dx, dy)` points from particle `i` to the image and `d` is already clamped
/// to [`MIN_DISTANCE`].
pub fn visit_images<F>(i: usize, particles: &[Particle], field: &ForceField<'_>, mut visit: F)
where
    F: FnMut(usize, f64, f64, f64),
{
    let origin = &particles[i];
    let offsets = field.image_offsets();

    for (j, other) in particles.iter().enumerate() {
        if j == i {
            continue;
        }
        for (ox, oy) in offsets {
            let dx = other.x + ox - origin.x;
            let dy = other.y + oy - origin.y;
            let d = field.metric.distance(dx, dy).max(MIN_DISTANCE);
            visit(j, dx, dy, d);
        }
    }
}

/// Velocity change felt by particle `i` this tick.
#[must_use]
pub fn accumulate(i: usize, particles: &[Particle], field: &ForceField<'_>) -> (f64, f64) {
    let origin = particles[i];
    let law = field.laws.law(origin.type_id);

    let (mut ax, mut ay) = (0.0, 0.0);
    if !matches!(law, ForceLaw::Inert) {
        visit_images(i, particles, field, |j, dx, dy, d| {
            let magnitude = law.force(
                d,
                origin.type_id,
                particles[j].type_id,
                field.matrices,
                &field.params,
            );
            ax += dx / d * magnitude;
            ay += dy / d * magnitude;
        });
    }
    if let Some(attractor) = field.attractor {
        let (px, py) = attractor.pull(&origin, field.metric);
        ax += px;
        ay += py;
    }
    (ax, ay)
}

/// Accumulates every particle in parallel into `deltas`.
///
/// Each entry depends only on the immutable positions, so the result is the
/// same for any thread count.
pub fn accumulate_all(
    particles: &[Particle],
    field: &ForceField<'_>,
    min_chunk_len: usize,
    deltas: &mut Vec<(f64, f64)>,
) {
    (0..particles.len())
        .into_par_iter()
        .with_min_len(min_chunk_len.max(1))
        .map(|i| accumulate(i, particles, field))
        .collect_into_vec(deltas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_data::ForceLawKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        matrices: InteractionMatrices,
        laws: ForceLawTable,
    }

    impl Fixture {
        fn new(kind: ForceLawKind) -> Self {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            let mut matrices = InteractionMatrices::zeros(2);
            matrices.attraction.fill(1.0);
            Self {
                matrices,
                laws: ForceLawTable::uniform(kind, 2, &mut rng),
            }
        }

        fn field(&self, metric: DistanceMetric) -> ForceField<'_> {
            ForceField {
                matrices: &self.matrices,
                laws: &self.laws,
                params: ForceParams {
                    repel_radius: 1.0,
                    repel_strength: 2.0,
                },
                metric,
                width: 100.0,
                height: 100.0,
                attractor: None,
            }
        }
    }

    #[test]
    fn test_self_pairs_never_visited() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Manhattan);
        let particles: Vec<Particle> = (0..6)
            .map(|k| Particle::new(10.0 * k as f64, 5.0, 0))
            .collect();

        for i in 0..particles.len() {
            let mut visited = Vec::new();
            visit_images(i, &particles, &field, |j, _, _, _| visited.push(j));
            assert!(!visited.contains(&i));
            assert_eq!(visited.len(), 5 * (particles.len() - 1));
        }
    }

    #[test]
    fn test_single_particle_feels_nothing() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Euclidean);
        let particles = [Particle::new(50.0, 50.0, 0)];
        assert_eq!(accumulate(0, &particles, &field), (0.0, 0.0));
    }

    #[test]
    fn test_attraction_points_toward_neighbour() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Euclidean);
        let particles = [Particle::new(40.0, 50.0, 0), Particle::new(50.0, 50.0, 1)];
        let (ax, ay) = accumulate(0, &particles, &field);
        assert!(ax > 0.0, "expected pull toward +x, got {ax}");
        assert!(ay.abs() < 1e-12);
    }

    #[test]
    fn test_repulsion_pushes_away() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Euclidean);
        let particles = [Particle::new(50.0, 50.0, 0), Particle::new(50.5, 50.0, 0)];
        let (ax, _) = accumulate(0, &particles, &field);
        assert!(ax < 0.0);
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Euclidean);
        let particles = [Particle::new(20.0, 20.0, 0), Particle::new(20.0, 20.0, 1)];
        let (ax, ay) = accumulate(0, &particles, &field);
        assert!(ax.is_finite() && ay.is_finite());
    }

    #[test]
    fn test_mirror_image_is_nearest_across_edge() {
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Euclidean);
        let particles = [Particle::new(2.0, 50.0, 0), Particle::new(98.0, 50.0, 0)];
        let mut nearest = f64::INFINITY;
        visit_images(0, &particles, &field, |_, _, _, d| nearest = nearest.min(d));
        assert!((nearest - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_inert_law_short_circuits() {
        let fixture = Fixture::new(ForceLawKind::Inert);
        let field = fixture.field(DistanceMetric::Manhattan);
        let particles = [Particle::new(1.0, 1.0, 0), Particle::new(1.1, 1.0, 1)];
        assert_eq!(accumulate(0, &particles, &field), (0.0, 0.0));
        assert_eq!(field.laws.law(1), &ForceLaw::Inert);
    }

    #[test]
    fn test_attractor_pulls_even_inert_particles() {
        let fixture = Fixture::new(ForceLawKind::Inert);
        let field = ForceField {
            attractor: Some(PointAttractor {
                x: 60.0,
                y: 50.0,
                strength: 2.0,
            }),
            ..fixture.field(DistanceMetric::Euclidean)
        };
        let particles = [Particle::new(50.0, 50.0, 0), Particle::new(70.0, 50.0, 1)];
        let (ax, ay) = accumulate(0, &particles, &field);
        assert!((ax - 0.2).abs() < 1e-12);
        assert_eq!(ay, 0.0);
        let (bx, _) = accumulate(1, &particles, &field);
        assert!((bx + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_negative_attractor_repels() {
        let attractor = PointAttractor {
            x: 0.0,
            y: 0.0,
            strength: -1.0,
        };
        let (px, py) = attractor.pull(&Particle::new(3.0, 4.0, 0), DistanceMetric::Euclidean);
        assert!(px > 0.0 && py > 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let particles = crate::arrangement::arrange(
            particle_data::Arrangement::Random,
            200,
            2,
            100.0,
            100.0,
            &mut rng,
        )
        .unwrap();
        let fixture = Fixture::new(ForceLawKind::Default);
        let field = fixture.field(DistanceMetric::Manhattan);

        let mut deltas = Vec::new();
        accumulate_all(&particles, &field, 7, &mut deltas);
        for (i, delta) in deltas.iter().enumerate() {
            assert_eq!(*delta, accumulate(i, &particles, &field));
        }
    }
}
