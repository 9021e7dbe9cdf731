//! Force laws between typed particles.
//!
//! Every law splits into a short-range repulsion core and a longer-range
//! tail. The core is always repulsive so particles never collapse onto each
//! other; the tail is where the attraction matrix shapes emergent behaviour.
//! A positive result attracts the acting particle toward its neighbour, a
//! negative result pushes it away.

use particle_data::ForceLawKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::matrix::{standard_normal, InteractionMatrices};

/// Distances below this are treated as this value.
pub const MIN_DISTANCE: f64 = 1e-6;

/// Snake law repulsion cutoff.
const SNAKE_REPEL_DISTANCE: f64 = 10.0;

/// Repulsion core parameters shared by all laws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceParams {
    pub repel_radius: f64,
    pub repel_strength: f64,
}

/// A force law instance.
///
/// `Simple` carries the coefficient drawn when the instance was created, so two
/// instances of the same kind may behave differently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForceLaw {
    Default,
    Absolute,
    Cluster,
    Snake,
    Simple { coefficient: f64 },
    Inert,
}

impl ForceLaw {
    /// Creates a fresh instance of `kind`, drawing any frozen state from `rng`.
    pub fn from_kind<R: Rng + ?Sized>(kind: ForceLawKind, rng: &mut R) -> Self {
        match kind {
            ForceLawKind::Default => ForceLaw::Default,
            ForceLawKind::Absolute => ForceLaw::Absolute,
            ForceLawKind::Cluster => ForceLaw::Cluster,
            ForceLawKind::Snake => ForceLaw::Snake,
            ForceLawKind::Simple => ForceLaw::Simple {
                coefficient: standard_normal(rng),
            },
            ForceLawKind::Inert => ForceLaw::Inert,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ForceLawKind {
        match self {
            ForceLaw::Default => ForceLawKind::Default,
            ForceLaw::Absolute => ForceLawKind::Absolute,
            ForceLaw::Cluster => ForceLawKind::Cluster,
            ForceLaw::Snake => ForceLawKind::Snake,
            ForceLaw::Simple { .. } => ForceLawKind::Simple,
            ForceLaw::Inert => ForceLawKind::Inert,
        }
    }

    /// Signed force magnitude felt by a particle of type `t` from one of type
    /// `ot` at distance `d`.
    ///
    /// `t` and `ot` must be below `matrices.max_types()`.
    #[inline]
    #[must_use]
    pub fn force(
        &self,
        d: f64,
        t: u8,
        ot: u8,
        matrices: &InteractionMatrices,
        params: &ForceParams,
    ) -> f64 {
        let d = d.max(MIN_DISTANCE);
        let (ti, oi) = (usize::from(t), usize::from(ot));
        let repel_radius = params.repel_radius;

        match self {
            ForceLaw::Default => {
                if d < repel_radius {
                    return -params.repel_strength / d;
                }
                matrices.attraction.get(ti, oi) / d
            }
            ForceLaw::Absolute => {
                let h = matrices.attraction.get(ti, oi);
                let k = matrices.radius.get(ti, oi);

                if d < repel_radius {
                    return -(params.repel_strength / (d / repel_radius + 1.0))
                        + repel_radius / 2.0;
                }
                if d < repel_radius + 2.0 / k {
                    return -h * (k * d - k * repel_radius - 1.0) + h;
                }
                0.0
            }
            ForceLaw::Cluster => {
                if d < repel_radius {
                    return -params.repel_strength / d;
                }
                if t == ot {
                    0.3 / d
                } else {
                    0.0
                }
            }
            ForceLaw::Snake => {
                if d < SNAKE_REPEL_DISTANCE {
                    return -1.0 / d;
                }
                if t == ot || u16::from(t) == u16::from(ot) + 1 {
                    0.5 / (d * 10.0)
                } else {
                    0.0
                }
            }
            ForceLaw::Simple { coefficient } => {
                if d < repel_radius {
                    return -params.repel_strength / d;
                }
                coefficient / d
            }
            ForceLaw::Inert => 0.0,
        }
    }
}

/// One force law per particle type, selected by the acting particle's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceLawTable {
    laws: Vec<ForceLaw>,
}

impl ForceLawTable {
    /// Gives every type its own fresh instance of `kind`.
    pub fn uniform<R: Rng + ?Sized>(kind: ForceLawKind, max_types: usize, rng: &mut R) -> Self {
        Self {
            laws: (0..max_types).map(|_| ForceLaw::from_kind(kind, rng)).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn law(&self, type_id: u8) -> &ForceLaw {
        &self.laws[usize::from(type_id)]
    }

    pub fn set(&mut self, type_id: usize, law: ForceLaw) -> Result<()> {
        let max_types = self.laws.len();
        let slot = self
            .laws
            .get_mut(type_id)
            .ok_or(SimError::TypeOutOfRange {
                type_id,
                max_types,
            })?;
        *slot = law;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.laws.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForceLaw> {
        self.laws.iter()
    }
}
