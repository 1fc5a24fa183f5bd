//! Axis reference rods and their tick markers.
//!
//! Each rod is an axis-aligned bar through the origin. Markers are placed by
//! walking a cursor from `-half_length` in fixed additive steps; the cursor is
//! accumulated rather than computed in closed form so that marker positions
//! are reproduced exactly, including the last marker when the half-length is
//! not a multiple of the spacing.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{GridError, Result};

/// Material names for the three rods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMaterials {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisMaterials {
    /// Uses the same material on all three rods.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            x: name.clone(),
            y: name.clone(),
            z: name,
        }
    }

    /// Returns the material name for `axis`.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl Default for AxisMaterials {
    fn default() -> Self {
        Self {
            x: "Red".to_string(),
            y: "Green".to_string(),
            z: "Blue".to_string(),
        }
    }
}

/// Dimensions and materials of the reference rods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RodConfig {
    /// Half-length `L` of each rod.
    pub half_length: f64,
    /// Half-thickness of each rod across its axis.
    pub thickness: f64,
    /// Distance between consecutive markers.
    pub mark_spacing: f64,
    /// Uniform scale of each marker sphere.
    pub mark_size: f64,
    /// Rod material per axis.
    pub materials: AxisMaterials,
    /// Material shared by all markers.
    pub mark_material: String,
}

impl Default for RodConfig {
    fn default() -> Self {
        Self {
            half_length: 15.0,
            thickness: 0.05,
            mark_spacing: 5.0,
            mark_size: 0.2,
            materials: AxisMaterials::default(),
            mark_material: "Yellow".to_string(),
        }
    }
}

impl RodConfig {
    /// Checks that every dimension is usable and the marker walk terminates.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("half-length", self.half_length),
            ("thickness", self.thickness),
            ("mark size", self.mark_size),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GridError::InvalidRodDimension { name, value });
            }
        }
        check_spacing(self.half_length, self.mark_spacing)
    }
}

/// One axis-aligned bar centred at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Rod {
    pub axis: Axis,
    pub half_length: f64,
    pub thickness: f64,
    pub mark_spacing: f64,
    pub mark_size: f64,
    pub material: String,
}

impl Rod {
    /// Scale of a unit box: `half_length` along the axis, `thickness` across.
    #[must_use]
    pub fn scale(&self) -> DVec3 {
        let along = self.axis.unit();
        along * self.half_length + (DVec3::ONE - along) * self.thickness
    }
}

/// A marker on a rod. Indices start at 1 and follow the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub axis: Axis,
    pub index: u32,
    pub position: DVec3,
}

/// Upper bound on the markers a single rod may carry.
pub const MAX_MARKS_PER_ROD: u32 = 1_000_000;

fn check_spacing(half_length: f64, spacing: f64) -> Result<()> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(GridError::InvalidMarkSpacing(spacing));
    }
    if !(half_length.is_finite() && half_length >= 0.0) {
        return Err(GridError::InvalidRodDimension {
            name: "half-length",
            value: half_length,
        });
    }
    // Also catches steps below the float resolution at L, which would never
    // advance the cursor.
    let steps = (2.0 * half_length / spacing).floor() + 1.0;
    if !steps.is_finite() || steps > f64::from(MAX_MARKS_PER_ROD) {
        return Err(GridError::InvalidMarkSpacing(spacing));
    }
    Ok(())
}

/// Marker positions along `axis`, from `-half_length` to `+half_length`.
///
/// The step landing exactly on the origin is skipped.
#[allow(clippy::float_cmp)]
pub fn compute_rod_marks(axis: Axis, half_length: f64, spacing: f64) -> Result<Vec<DVec3>> {
    check_spacing(half_length, spacing)?;

    let mut marks = Vec::new();
    let mut cursor = -half_length;
    while cursor <= half_length {
        if cursor != 0.0 {
            marks.push(axis.along(cursor));
        }
        cursor += spacing;
    }
    Ok(marks)
}

/// Builds the three reference rods and their markers.
#[derive(Debug, Clone)]
pub struct AxisRodBuilder {
    config: RodConfig,
}

impl AxisRodBuilder {
    /// Creates a builder, rejecting unusable dimensions.
    pub fn new(config: RodConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &RodConfig {
        &self.config
    }

    /// The rod along `axis`.
    #[must_use]
    pub fn rod(&self, axis: Axis) -> Rod {
        Rod {
            axis,
            half_length: self.config.half_length,
            thickness: self.config.thickness,
            mark_spacing: self.config.mark_spacing,
            mark_size: self.config.mark_size,
            material: self.config.materials.get(axis).to_string(),
        }
    }

    /// All three rods, X first.
    #[must_use]
    pub fn rods(&self) -> Vec<Rod> {
        Axis::ALL.iter().map(|&axis| self.rod(axis)).collect()
    }

    /// Markers along `axis`, numbered from 1.
    pub fn ticks(&self, axis: Axis) -> Result<Vec<Tick>> {
        let marks = compute_rod_marks(axis, self.config.half_length, self.config.mark_spacing)?;
        Ok((1..)
            .zip(marks)
            .map(|(index, position)| Tick {
                axis,
                index,
                position,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_marks() {
        let marks = compute_rod_marks(Axis::X, 15.0, 5.0).unwrap();
        let xs: Vec<f64> = marks.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-15.0, -10.0, -5.0, 5.0, 10.0, 15.0]);
        assert!(marks.iter().all(|p| p.y == 0.0 && p.z == 0.0));
    }

    #[test]
    fn test_marks_on_other_axes() {
        let marks = compute_rod_marks(Axis::Z, 2.0, 1.0).unwrap();
        assert_eq!(
            marks,
            vec![
                DVec3::new(0.0, 0.0, -2.0),
                DVec3::new(0.0, 0.0, -1.0),
                DVec3::new(0.0, 0.0, 1.0),
                DVec3::new(0.0, 0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_non_multiple_length_stops_before_end() {
        let ys: Vec<f64> = compute_rod_marks(Axis::Y, 7.0, 3.0)
            .unwrap()
            .iter()
            .map(|p| p.y)
            .collect();
        // -7, -4, -1, 2, 5; the origin is never hit.
        assert_eq!(ys, vec![-7.0, -4.0, -1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_accumulated_cursor_is_reproduced() {
        let marks = compute_rod_marks(Axis::X, 0.3, 0.1).unwrap();
        let mut expected = Vec::new();
        let mut cursor = -0.3_f64;
        while cursor <= 0.3 {
            if cursor != 0.0 {
                expected.push(cursor);
            }
            cursor += 0.1;
        }
        let xs: Vec<f64> = marks.iter().map(|p| p.x).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_zero_length_rod_has_no_marks() {
        assert!(compute_rod_marks(Axis::X, 0.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_spacing() {
        assert_eq!(
            compute_rod_marks(Axis::X, 15.0, 0.0).unwrap_err(),
            GridError::InvalidMarkSpacing(0.0)
        );
        assert!(compute_rod_marks(Axis::X, 15.0, -5.0).is_err());
        assert!(compute_rod_marks(Axis::X, 15.0, f64::NAN).is_err());
        assert!(compute_rod_marks(Axis::X, 1e20, 1e-10).is_err());
        assert!(compute_rod_marks(Axis::X, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_marker_count_is_capped() {
        assert_eq!(
            compute_rod_marks(Axis::X, 1e12, 1e-3).unwrap_err(),
            GridError::InvalidMarkSpacing(1e-3)
        );
        assert!(compute_rod_marks(Axis::Y, f64::MAX, 1.0).is_err());

        let config = RodConfig {
            half_length: 1e12,
            mark_spacing: 1e-3,
            ..RodConfig::default()
        };
        assert!(matches!(
            AxisRodBuilder::new(config),
            Err(GridError::InvalidMarkSpacing(_))
        ));

        let marks = compute_rod_marks(Axis::Z, 100.0, 0.001).unwrap();
        assert!(marks.len() > 100_000);
        assert!(marks.len() <= MAX_MARKS_PER_ROD as usize);
    }

    #[test]
    fn test_builder_rods_and_ticks() {
        let builder = AxisRodBuilder::new(RodConfig::default()).unwrap();
        let rods = builder.rods();
        assert_eq!(rods.len(), 3);
        assert_eq!(rods[0].material, "Red");
        assert_eq!(rods[2].axis, Axis::Z);
        assert_eq!(rods[1].scale(), DVec3::new(0.05, 15.0, 0.05));

        let ticks = builder.ticks(Axis::Y).unwrap();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0].index, 1);
        assert_eq!(ticks[0].position, DVec3::new(0.0, -15.0, 0.0));
        assert_eq!(ticks[5].index, 6);
    }

    #[test]
    fn test_builder_rejects_bad_dimensions() {
        let config = RodConfig {
            thickness: -1.0,
            ..RodConfig::default()
        };
        assert!(matches!(
            AxisRodBuilder::new(config),
            Err(GridError::InvalidRodDimension {
                name: "thickness",
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn prop_marks_deterministic_and_bounded(
            half_length in 0.0f64..50.0,
            spacing in 0.05f64..10.0,
        ) {
            let a = compute_rod_marks(Axis::X, half_length, spacing).unwrap();
            let b = compute_rod_marks(Axis::X, half_length, spacing).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert!(a.iter().all(|p| p.x != 0.0 && p.x.abs() <= half_length));
            prop_assert!(a.windows(2).all(|w| w[0].x < w[1].x));
        }
    }
}
