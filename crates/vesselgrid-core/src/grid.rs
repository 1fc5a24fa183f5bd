//! Pure lattice enumeration.
//!
//! These functions never touch a scene; they are the backend-independent
//! entry points used by the emitter and by tests.

use glam::{DVec3, UVec3};

use crate::axis::Axis;
use crate::error::Result;
use crate::layout::{GridLayout, GridSpec};
use crate::zone::{RadialZoneClassifier, VisibilityPolicy, Zone, ZoneThresholds};

/// One classified lattice location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Lattice index `(ix, iy, iz)`.
    pub index: UVec3,
    /// Cell centre.
    pub position: DVec3,
    /// Radial zone of the centre.
    pub zone: Zone,
}

/// A cell that survived the sparsity filter, ready to be emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridElement {
    /// Cell centre.
    pub position: DVec3,
    /// Uniform scale of the primitive.
    pub scale: f64,
    /// Radial zone.
    pub zone: Zone,
}

impl GridLayout {
    /// Classifies every cell, in lexicographic order.
    pub fn cells<'a>(
        &'a self,
        classifier: &'a RadialZoneClassifier,
    ) -> impl Iterator<Item = Cell> + 'a {
        self.indices().map(move |index| {
            let position = self.position(index.x, index.y, index.z);
            Cell {
                index,
                position,
                zone: classifier.classify(position),
            }
        })
    }
}

/// Enumerates all `nx * ny * nz` cells with their zones, before filtering.
pub fn compute_lattice(
    spec: &GridSpec,
    thresholds: ZoneThresholds,
    principal_axis: Axis,
) -> Result<Vec<Cell>> {
    let layout = GridLayout::plan(spec)?;
    let classifier = RadialZoneClassifier::new(principal_axis, thresholds)?;
    Ok(layout.cells(&classifier).collect())
}

/// Computes the tube: Inner and Middle cells with their position and scale.
///
/// Outer cells are dropped. A zero count on any axis gives an empty result.
pub fn compute_grid(
    spec: &GridSpec,
    inner_radius: f64,
    outer_radius: f64,
    principal_axis: Axis,
) -> Result<Vec<GridElement>> {
    let layout = GridLayout::plan(spec)?;
    let classifier =
        RadialZoneClassifier::new(principal_axis, ZoneThresholds::new(inner_radius, outer_radius))?;
    let scale = layout.cell_scale();

    Ok(layout
        .cells(&classifier)
        .filter(|cell| VisibilityPolicy::Tube.admits(cell.zone))
        .map(|cell| GridElement {
            position: cell.position,
            scale,
            zone: cell.zone,
        })
        .collect())
}
