//! Type-pair matrices driving the force laws.
//!
//! Both matrices are allocated once at `max_types × max_types`; only the
//! top-left `type_count` square is consulted while the simulation runs, so the
//! live type count can change without reallocating.

use particle_data::{MatrixStrategy, RadiusStrategy, SampleDistribution};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MatrixConfig;
use crate::error::{Result, SimError};

/// Dense square matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl TypeMatrix {
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    #[must_use]
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reads a cell. Callers guarantee `row, col < size`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    /// Bounds-checked read.
    pub fn try_get(&self, row: usize, col: usize) -> Result<f64> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// Iterates over `(row, col, value)` for every allocated cell.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, v)| (idx / self.size, idx % self.size, *v))
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(SimError::IndexOutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> f64) {
        let size = self.size;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(idx / size, idx % size);
        }
    }
}

/// The attraction and radius matrices, always published together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMatrices {
    pub attraction: TypeMatrix,
    pub radius: TypeMatrix,
}

impl InteractionMatrices {
    #[must_use]
    pub fn zeros(max_types: usize) -> Self {
        Self {
            attraction: TypeMatrix::zeros(max_types),
            radius: TypeMatrix::zeros(max_types),
        }
    }

    /// Builds both matrices using the configured strategies.
    pub fn generate<R: Rng + ?Sized>(max_types: usize, config: &MatrixConfig, rng: &mut R) -> Self {
        let mut matrices = Self::zeros(max_types);
        matrices.generate_attraction(config.attraction, config, rng);
        matrices.generate_radius(config.radii, config, rng);
        matrices
    }

    #[must_use]
    pub fn max_types(&self) -> usize {
        self.attraction.size()
    }

    /// Refills the attraction matrix.
    ///
    /// `random` draws `2 * sample - 1` per cell; `cluster` writes
    /// `cluster_self` on the diagonal and `cluster_other` elsewhere.
    pub fn generate_attraction<R: Rng + ?Sized>(
        &mut self,
        strategy: MatrixStrategy,
        config: &MatrixConfig,
        rng: &mut R,
    ) {
        match strategy {
            MatrixStrategy::Random => self
                .attraction
                .fill_with(|_, _| signed_sample(config.distribution, rng)),
            MatrixStrategy::Cluster => self.attraction.fill_with(|row, col| {
                if row == col {
                    config.cluster_self
                } else {
                    config.cluster_other
                }
            }),
        }
    }

    /// Refills the radius matrix.
    pub fn generate_radius<R: Rng + ?Sized>(
        &mut self,
        strategy: RadiusStrategy,
        config: &MatrixConfig,
        rng: &mut R,
    ) {
        match strategy {
            RadiusStrategy::Random => self
                .radius
                .fill_with(|_, _| signed_sample(config.distribution, rng)),
            RadiusStrategy::Equal => self.radius.fill(config.min_radius),
        }
    }
}

/// `2 * sample - 1` with `sample` drawn from the given distribution.
///
/// Uniform samples land in `[-1, 1)`; normal samples are unbounded.
pub fn signed_sample<R: Rng + ?Sized>(distribution: SampleDistribution, rng: &mut R) -> f64 {
    let sample = match distribution {
        SampleDistribution::Uniform => rng.gen::<f64>(),
        SampleDistribution::Normal => standard_normal(rng),
    };
    2.0 * sample - 1.0
}

/// Standard normal sample via the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::EPSILON);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
