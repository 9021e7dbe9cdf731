//! Named selections used by configuration files and the command line.
//!
//! Every selection parses from its lowercase name and serializes back to it.
//! An unrecognised name is always an error; there is no fallback variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a selection name does not match any known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseSelectionError {
    pub kind: &'static str,
    pub name: String,
    pub expected: String,
}

macro_rules! selection {
    (
        $(#[$meta:meta])*
        $ty:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $name:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $ty {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ParseSelectionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == needle)
                    .ok_or_else(|| ParseSelectionError {
                        kind: $kind,
                        name: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.name())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ParseSelectionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.name()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

selection! {
    /// Initial layout used when the particle store is rebuilt.
    Arrangement, "arrangement" {
        /// Uniform over the whole world.
        Random => "random",
        /// Evenly spaced on an ellipse touching the world edges.
        Circle => "circle",
        /// Circle outline with a wide positional jitter.
        FilledCircle => "f_circle",
        /// One ring per type, growing outward.
        Concentric => "concentric",
        /// A horizontal line through the centre.
        Line => "line",
        /// Square grid covering the world.
        Grid => "grid",
        /// Per-type bands along the horizontal centre line.
        Row => "row",
        /// Everything packed at the centre.
        Point => "point",
    }
}

selection! {
    /// Force law applied between a particle and its neighbours.
    ForceLawKind, "force law" {
        Default => "default",
        /// Compact-support law driven by the radius matrix.
        Absolute => "absolute",
        Cluster => "cluster",
        Snake => "snake",
        /// One frozen random coefficient for every type pair.
        Simple => "simple",
        /// Produces no force at all.
        Inert => "inert",
    }
}

selection! {
    /// Distance metric used by the force accumulator.
    DistanceMetric, "distance metric" {
        Euclidean => "euclidean",
        Manhattan => "manhattan",
    }
}

selection! {
    /// Attraction matrix generation strategy.
    MatrixStrategy, "attraction strategy" {
        Random => "random",
        /// Same-type cells one constant, cross-type cells another.
        Cluster => "cluster",
    }
}

selection! {
    /// Radius matrix generation strategy.
    RadiusStrategy, "radius strategy" {
        Random => "random",
        /// Every cell set to the configured minimum radius.
        Equal => "equal",
    }
}

selection! {
    /// Distribution backing random matrix cells.
    SampleDistribution, "sample distribution" {
        Uniform => "uniform",
        Normal => "normal",
    }
}

impl DistanceMetric {
    /// Distance for a displacement `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
            DistanceMetric::Manhattan => dx.abs() + dy.abs(),
        }
    }
}
