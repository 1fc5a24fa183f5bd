//! Cartesian axis selection.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    /// The default tube axis.
    #[default]
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// Returns the point at coordinate `t` on this axis.
    #[must_use]
    pub fn along(self, t: f64) -> DVec3 {
        match self {
            Axis::X => DVec3::new(t, 0.0, 0.0),
            Axis::Y => DVec3::new(0.0, t, 0.0),
            Axis::Z => DVec3::new(0.0, 0.0, t),
        }
    }

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns the two components of `v` orthogonal to this axis.
    ///
    /// The pair is in cyclic order (Y,Z for X; Z,X for Y; X,Y for Z).
    #[must_use]
    pub fn transverse(self, v: DVec3) -> (f64, f64) {
        match self {
            Axis::X => (v.y, v.z),
            Axis::Y => (v.z, v.x),
            Axis::Z => (v.x, v.y),
        }
    }

    /// Single-letter label used in prim paths.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
