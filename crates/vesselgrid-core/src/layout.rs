//! Lattice layout planning.
//!
//! A [`GridSpec`] asks for `nx × ny × nz` cells of a base size separated by a
//! gap, uniformly scaled so that the X run of the lattice spans a target
//! extent. [`GridLayout::plan`] resolves the scale and the centring shifts so
//! that cell centres are symmetric about the origin on every axis, whatever
//! the parity of the counts.

use glam::{DVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{GridError, Result};

/// Requested lattice dimensions and spacing.
///
/// Counts are signed so that a negative count coming from configuration is
/// representable and reported as [`GridError::NegativeCount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Cells along X.
    pub nx: i32,
    /// Cells along Y.
    pub ny: i32,
    /// Cells along Z.
    pub nz: i32,
    /// Edge length of an unscaled cell.
    pub base_cell_size: f64,
    /// Unscaled spacing between neighbouring cells.
    pub gap: f64,
    /// Physical span the X run of cells is fitted to.
    pub target_extent: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            nx: 10,
            ny: 10,
            nz: 10,
            base_cell_size: 2.0,
            gap: 0.2,
            target_extent: 2.0,
        }
    }
}

impl GridSpec {
    /// Creates a spec with the default cell size and gap.
    pub fn new(nx: i32, ny: i32, nz: i32, target_extent: f64) -> Self {
        Self {
            nx,
            ny,
            nz,
            target_extent,
            ..Self::default()
        }
    }

    /// Creates a cubic spec with `n` cells per axis.
    pub fn cube(n: i32, target_extent: f64) -> Self {
        Self::new(n, n, n, target_extent)
    }

    /// Sets the base cell size and gap.
    #[must_use]
    pub fn with_spacing(mut self, base_cell_size: f64, gap: f64) -> Self {
        self.base_cell_size = base_cell_size;
        self.gap = gap;
        self
    }

    /// Checks counts and spacing, returning the counts as unsigned values.
    pub fn validate(&self) -> Result<UVec3> {
        let count = |axis: Axis, n: i32| {
            u32::try_from(n).map_err(|_| GridError::NegativeCount {
                axis,
                count: i64::from(n),
            })
        };
        let counts = UVec3::new(
            count(Axis::X, self.nx)?,
            count(Axis::Y, self.ny)?,
            count(Axis::Z, self.nz)?,
        );

        if !(self.base_cell_size.is_finite() && self.base_cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(self.base_cell_size));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(GridError::InvalidGap(self.gap));
        }
        if !(self.target_extent.is_finite() && self.target_extent > 0.0) {
            return Err(GridError::InvalidExtent(self.target_extent));
        }

        Ok(counts)
    }
}

/// A resolved lattice: cell scale, pitch, and centring shifts.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    counts: UVec3,
    base_cell_size: f64,
    /// Uniform scale applied to every cell (`sz`).
    cell_scale: f64,
    /// Distance between neighbouring cell centres (`dd`).
    pitch: f64,
    /// Per-axis offset subtracted from `index * pitch`.
    shift: DVec3,
}

impl GridLayout {
    /// Plans the layout for `spec`.
    ///
    /// Any zero count yields an empty layout without computing a scale.
    pub fn plan(spec: &GridSpec) -> Result<Self> {
        let counts = spec.validate()?;

        if counts.min_element() == 0 {
            log::debug!("empty lattice {}x{}x{}", counts.x, counts.y, counts.z);
            return Ok(Self {
                counts,
                base_cell_size: spec.base_cell_size,
                cell_scale: 0.0,
                pitch: 0.0,
                shift: DVec3::ZERO,
            });
        }

        let base = spec.base_cell_size;
        let gap = spec.gap;
        let run = |n: u32| f64::from(n) * base + f64::from(n - 1) * gap;

        let cell_scale = spec.target_extent / run(counts.x);
        if !(cell_scale.is_finite() && cell_scale > 0.0) {
            return Err(GridError::NonFiniteScale(cell_scale));
        }

        let pitch = cell_scale * (base + gap);
        let half_cell = cell_scale * base / 2.0;
        let shift = DVec3::new(
            cell_scale * run(counts.x) / 2.0 - half_cell,
            cell_scale * run(counts.y) / 2.0 - half_cell,
            cell_scale * run(counts.z) / 2.0 - half_cell,
        );

        let layout = Self {
            counts,
            base_cell_size: base,
            cell_scale,
            pitch,
            shift,
        };

        // A finite scale can still overflow once multiplied out to the far corner.
        let last = counts - UVec3::ONE;
        let far = layout.position(last.x, last.y, last.z);
        if let Some(bad) = [pitch, shift.x, shift.y, shift.z, far.x, far.y, far.z]
            .into_iter()
            .find(|v| !v.is_finite())
        {
            return Err(GridError::NonFiniteScale(bad));
        }
        Ok(layout)
    }

    /// Resolved cell counts per axis.
    #[must_use]
    pub fn counts(&self) -> UVec3 {
        self.counts
    }

    /// Total number of lattice cells.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.counts.x) * u64::from(self.counts.y) * u64::from(self.counts.z)
    }

    /// Returns true if the lattice has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.min_element() == 0
    }

    /// Uniform cell scale `sz`; zero for an empty layout.
    #[must_use]
    pub fn cell_scale(&self) -> f64 {
        self.cell_scale
    }

    /// Centre-to-centre distance `dd`; zero for an empty layout.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Centring shift per axis.
    #[must_use]
    pub fn shift(&self) -> DVec3 {
        self.shift
    }

    /// Edge length of a scaled cell.
    #[must_use]
    pub fn cell_edge(&self) -> f64 {
        self.cell_scale * self.base_cell_size
    }

    /// Centre of cell `(ix, iy, iz)`.
    #[must_use]
    pub fn position(&self, ix: u32, iy: u32, iz: u32) -> DVec3 {
        DVec3::new(
            f64::from(ix) * self.pitch - self.shift.x,
            f64::from(iy) * self.pitch - self.shift.y,
            f64::from(iz) * self.pitch - self.shift.z,
        )
    }

    /// Lattice indices in lexicographic `(ix, iy, iz)` order, `iz` fastest.
    pub fn indices(&self) -> impl Iterator<Item = UVec3> {
        let UVec3 { x: nx, y: ny, z: nz } = self.counts;
        (0..nx).flat_map(move |ix| {
            (0..ny).flat_map(move |iy| (0..nz).map(move |iz| UVec3::new(ix, iy, iz)))
        })
    }

    /// Axis-aligned box enclosing every cell, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        if self.is_empty() {
            return None;
        }
        let half = DVec3::splat(self.cell_edge() / 2.0);
        let last = self.counts - UVec3::ONE;
        let min = self.position(0, 0, 0) - half;
        let max = self.position(last.x, last.y, last.z) + half;
        Some((min, max))
    }
}
