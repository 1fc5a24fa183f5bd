//! Radial zone classification and the sparsity filter.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{GridError, Result};

/// Radial band of a cell relative to the principal axis.
///
/// Ordered from the axis outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Closer than the inner radius.
    Inner,
    /// Between the inner and outer radius.
    Middle,
    /// At or beyond the outer radius.
    Outer,
}

impl Zone {
    /// All zones, innermost first.
    pub const ALL: [Zone; 3] = [Zone::Inner, Zone::Middle, Zone::Outer];

    /// Lower-case name used in logs and reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Zone::Inner => "inner",
            Zone::Middle => "middle",
            Zone::Outer => "outer",
        }
    }

    /// Position of this zone in [`Zone::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Radii separating the three zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneThresholds {
    /// Inner radius (`irad`).
    pub inner: f64,
    /// Outer radius (`orad`).
    pub outer: f64,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            inner: 2.0,
            outer: 2.5,
        }
    }
}

impl ZoneThresholds {
    /// Creates thresholds without validating them.
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    /// Checks `0 <= inner < outer` with both radii finite.
    pub fn validate(&self) -> Result<()> {
        let ok = self.inner.is_finite()
            && self.outer.is_finite()
            && self.inner >= 0.0
            && self.inner < self.outer;
        if ok {
            Ok(())
        } else {
            Err(GridError::InvalidThresholds {
                inner: self.inner,
                outer: self.outer,
            })
        }
    }
}

/// Assigns a [`Zone`] from the distance to a principal axis through the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialZoneClassifier {
    axis: Axis,
    thresholds: ZoneThresholds,
}

impl RadialZoneClassifier {
    /// Creates a classifier, rejecting invalid thresholds.
    pub fn new(axis: Axis, thresholds: ZoneThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { axis, thresholds })
    }

    /// The principal (tube) axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The zone radii.
    #[must_use]
    pub fn thresholds(&self) -> ZoneThresholds {
        self.thresholds
    }

    /// Distance from `position` to the principal axis.
    #[must_use]
    pub fn radial_distance(&self, position: DVec3) -> f64 {
        let (u, v) = self.axis.transverse(position);
        (u * u + v * v).sqrt()
    }

    /// Classifies `position`. Boundaries are exclusive on the lower zone:
    /// a point exactly at `inner` is Middle, exactly at `outer` is Outer.
    #[must_use]
    pub fn classify(&self, position: DVec3) -> Zone {
        let dist = self.radial_distance(position);
        if dist < self.thresholds.inner {
            Zone::Inner
        } else if dist < self.thresholds.outer {
            Zone::Middle
        } else {
            Zone::Outer
        }
    }
}

/// Which zones reach the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisibilityPolicy {
    /// Inner and Middle cells only; the tube volume.
    #[default]
    Tube,
    /// Every cell of the lattice.
    Full,
}

impl VisibilityPolicy {
    /// Returns whether a cell in `zone` is materialised.
    #[must_use]
    pub fn admits(self, zone: Zone) -> bool {
        match self {
            VisibilityPolicy::Tube => zone != Zone::Outer,
            VisibilityPolicy::Full => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RadialZoneClassifier {
        RadialZoneClassifier::new(Axis::Z, ZoneThresholds::new(2.0, 2.5)).unwrap()
    }

    #[test]
    fn test_reference_distances() {
        let c = classifier();
        assert_eq!(c.classify(DVec3::new(1.0, 0.0, 7.0)), Zone::Inner);
        assert_eq!(c.classify(DVec3::new(0.0, 2.3, -4.0)), Zone::Middle);
        assert_eq!(c.classify(DVec3::new(3.0, 0.0, 0.0)), Zone::Outer);
    }

    #[test]
    fn test_boundaries_fall_outward() {
        let c = classifier();
        assert_eq!(c.classify(DVec3::new(2.0, 0.0, 0.0)), Zone::Middle);
        assert_eq!(c.classify(DVec3::new(0.0, 2.5, 0.0)), Zone::Outer);
    }

    #[test]
    fn test_principal_axis_coordinate_is_ignored() {
        let c = RadialZoneClassifier::new(Axis::X, ZoneThresholds::new(1.0, 2.0)).unwrap();
        assert_eq!(c.classify(DVec3::new(100.0, 0.5, 0.0)), Zone::Inner);
        assert_eq!(c.classify(DVec3::new(-100.0, 0.0, 1.5)), Zone::Middle);
        assert!((c.radial_distance(DVec3::new(9.0, 3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_thresholds() {
        for (inner, outer) in [(2.5, 2.0), (1.0, 1.0), (-1.0, 2.0), (0.0, f64::NAN)] {
            assert!(RadialZoneClassifier::new(Axis::Z, ZoneThresholds::new(inner, outer)).is_err());
        }
        assert!(ZoneThresholds::new(0.0, 0.1).validate().is_ok());
    }

    #[test]
    fn test_visibility_policy() {
        assert!(VisibilityPolicy::Tube.admits(Zone::Inner));
        assert!(VisibilityPolicy::Tube.admits(Zone::Middle));
        assert!(!VisibilityPolicy::Tube.admits(Zone::Outer));
        assert!(Zone::ALL.iter().all(|z| VisibilityPolicy::Full.admits(*z)));
    }

    #[test]
    fn test_zone_order() {
        assert!(Zone::Inner < Zone::Middle && Zone::Middle < Zone::Outer);
        assert_eq!(Zone::Outer.index(), 2);
        assert_eq!(Zone::Middle.name(), "middle");
    }
}
