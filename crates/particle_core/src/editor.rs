//! Live edit surface for the interaction matrices.
//!
//! The matrices are published as an immutable `Arc` behind a reader-writer
//! lock. Readers take the lock only long enough to clone the `Arc`, then work
//! on that snapshot without further locking. Writers hold the write lock for
//! one whole edit and mutate through `Arc::make_mut`, which copies the
//! matrices first whenever a reader still holds the previous snapshot. A
//! reader therefore sees either the state before an edit or after it, never a
//! mix of both.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::MatrixConfig;
use crate::error::{Result, SimError};
use crate::matrix::InteractionMatrices;

/// Cloneable, thread-safe handle to a [`MatrixEditor`].
pub type MatrixHandle = Arc<MatrixEditor>;

/// A single edit applied atomically to the published matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditOp {
    /// Writes one attraction cell, clamped to [-1, 1] when `clamp_edits` is on.
    Set { row: usize, col: usize, value: f64 },
    /// Adds `delta` to one attraction cell and clamps to [-1, 1].
    Nudge { row: usize, col: usize, delta: f64 },
    /// Writes every attraction cell.
    Fill { value: f64 },
    /// Zeroes the attraction matrix.
    Reset,
    /// Uniform `2u - 1` in every attraction cell.
    Randomize,
    /// Re-runs the configured attraction strategy.
    Regenerate,
    /// Writes one radius cell, unclamped.
    SetRadius { row: usize, col: usize, value: f64 },
}

struct EditorState {
    published: Arc<InteractionMatrices>,
    config: MatrixConfig,
    rng: ChaCha8Rng,
    version: u64,
}

pub struct MatrixEditor {
    state: RwLock<EditorState>,
}

impl MatrixEditor {
    #[must_use]
    pub fn new(matrices: InteractionMatrices, config: MatrixConfig, seed: u64) -> Self {
        Self {
            state: RwLock::new(EditorState {
                published: Arc::new(matrices),
                config,
                rng: ChaCha8Rng::seed_from_u64(seed),
                version: 0,
            }),
        }
    }

    #[must_use]
    pub fn into_handle(self) -> MatrixHandle {
        Arc::new(self)
    }

    /// The currently published matrices. Later edits never alter the
    /// returned value.
    #[must_use]
    pub fn snapshot(&self) -> Arc<InteractionMatrices> {
        Arc::clone(&self.read().published)
    }

    /// The published matrices together with the version they belong to, read
    /// under a single lock acquisition.
    #[must_use]
    pub fn versioned_snapshot(&self) -> (Arc<InteractionMatrices>, u64) {
        let state = self.read();
        (Arc::clone(&state.published), state.version)
    }

    /// Number of edits applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.read().version
    }

    #[must_use]
    pub fn max_types(&self) -> usize {
        self.read().published.max_types()
    }

    /// Applies one edit and returns the new version.
    pub fn apply(&self, op: EditOp) -> Result<u64> {
        let mut guard = self.write();
        let state = &mut *guard;
        let size = state.published.max_types();

        match op {
            EditOp::Set { row, col, value } => {
                check_index(row, col, size)?;
                let value = if state.config.clamp_edits {
                    value.clamp(-1.0, 1.0)
                } else {
                    value
                };
                Arc::make_mut(&mut state.published)
                    .attraction
                    .set(row, col, value)?;
            }
            EditOp::Nudge { row, col, delta } => {
                let current = state.published.attraction.try_get(row, col)?;
                Arc::make_mut(&mut state.published).attraction.set(
                    row,
                    col,
                    (current + delta).clamp(-1.0, 1.0),
                )?;
            }
            EditOp::Fill { value } => {
                Arc::make_mut(&mut state.published).attraction.fill(value);
            }
            EditOp::Reset => {
                Arc::make_mut(&mut state.published).attraction.fill(0.0);
            }
            EditOp::Randomize => {
                let matrices = Arc::make_mut(&mut state.published);
                let rng = &mut state.rng;
                for row in 0..size {
                    for col in 0..size {
                        matrices
                            .attraction
                            .set(row, col, 2.0 * rng.gen::<f64>() - 1.0)?;
                    }
                }
            }
            EditOp::Regenerate => {
                let strategy = state.config.attraction;
                Arc::make_mut(&mut state.published).generate_attraction(
                    strategy,
                    &state.config,
                    &mut state.rng,
                );
            }
            EditOp::SetRadius { row, col, value } => {
                check_index(row, col, size)?;
                Arc::make_mut(&mut state.published)
                    .radius
                    .set(row, col, value)?;
            }
        }

        state.version += 1;
        tracing::debug!(op = ?op, version = state.version, "Matrix edit applied");
        Ok(state.version)
    }

    /// Swaps in a new matrix config and returns the current version.
    ///
    /// Only a matrix whose generation inputs changed is regenerated from
    /// `rng`; the other keeps every edit. Settings that only affect editing,
    /// such as `clamp_edits`, never touch the published matrices.
    pub fn set_config<R: Rng + ?Sized>(&self, config: MatrixConfig, rng: &mut R) -> u64 {
        let mut guard = self.write();
        let state = &mut *guard;
        let attraction = state.config.attraction_inputs_differ(&config);
        let radius = state.config.radius_inputs_differ(&config);
        state.config = config;

        if attraction || radius {
            let matrices = Arc::make_mut(&mut state.published);
            if attraction {
                matrices.generate_attraction(state.config.attraction, &state.config, rng);
            }
            if radius {
                matrices.generate_radius(state.config.radii, &state.config, rng);
            }
            state.version += 1;
        }
        tracing::debug!(attraction, radius, version = state.version, "Matrix config updated");
        state.version
    }

    fn read(&self) -> RwLockReadGuard<'_, EditorState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EditorState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn check_index(row: usize, col: usize, size: usize) -> Result<()> {
    if row >= size || col >= size {
        return Err(SimError::IndexOutOfRange { row, col, size });
    }
    Ok(())
}
