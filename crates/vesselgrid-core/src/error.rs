//! Error types for vesselgrid geometry.

use thiserror::Error;

use crate::axis::Axis;

/// Configuration errors raised while planning a lattice or a set of rods.
///
/// Every variant is fatal for a generation pass and is reported before any
/// primitive reaches the scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A lattice axis was given a negative cell count.
    #[error("negative cell count {count} on the {axis} axis")]
    NegativeCount { axis: Axis, count: i64 },

    /// The base cell size must be finite and strictly positive.
    #[error("base cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    /// The gap between cells must be finite and non-negative.
    #[error("cell gap must be non-negative, got {0}")]
    InvalidGap(f64),

    /// The target extent must be finite and strictly positive.
    #[error("target extent must be positive, got {0}")]
    InvalidExtent(f64),

    /// The fitted cell scale, pitch, or centring shift came out as NaN or
    /// infinite, or the scale was not positive.
    #[error("lattice geometry is not finite and positive, got {0}")]
    NonFiniteScale(f64),

    /// Radial thresholds must satisfy `0 <= inner < outer`.
    #[error("invalid zone thresholds: inner {inner}, outer {outer}")]
    InvalidThresholds { inner: f64, outer: f64 },

    /// Tick spacing must be finite, strictly positive, and coarse enough to
    /// stay within [`MAX_MARKS_PER_ROD`](crate::MAX_MARKS_PER_ROD).
    #[error("mark spacing {0} is not positive or too fine for the rod length")]
    InvalidMarkSpacing(f64),

    /// A rod dimension was negative or non-finite.
    #[error("rod {name} must be finite and non-negative, got {value}")]
    InvalidRodDimension { name: &'static str, value: f64 },
}

/// A specialized Result type for vesselgrid geometry.
pub type Result<T> = std::result::Result<T, GridError>;
