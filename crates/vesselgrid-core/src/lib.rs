//! Core geometry for vesselgrid.
//!
//! This crate holds the pure, scene-independent parts of the generator:
//! - [`GridLayout`] plans a centred lattice that fits a target extent
//! - [`RadialZoneClassifier`] bands cells by distance from a principal axis
//! - [`VisibilityPolicy`] decides which bands reach the scene
//! - [`AxisRodBuilder`] lays out reference rods and their tick markers
//!
//! [`compute_grid`] and [`compute_rod_marks`] are the entry points used for
//! testing and reuse without a scene backend.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod axis;
pub mod error;
pub mod grid;
pub mod layout;
pub mod rods;
pub mod zone;

pub use axis::Axis;
pub use error::{GridError, Result};
pub use grid::{compute_grid, compute_lattice, Cell, GridElement};
pub use layout::{GridLayout, GridSpec};
pub use rods::{
    compute_rod_marks, AxisMaterials, AxisRodBuilder, Rod, RodConfig, Tick, MAX_MARKS_PER_ROD,
};
pub use zone::{RadialZoneClassifier, VisibilityPolicy, Zone, ZoneThresholds};

// Re-export glam types for convenience
pub use glam::{DVec3, UVec3};
