//! The scene-graph capability the generator writes into.
//!
//! A [`SceneGraph`] is whatever retained scene the host provides. The
//! generator only ever creates primitives, places them, and binds materials;
//! it holds the scene through an explicit `&mut` borrow for the duration of a
//! pass and never stores it.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::material::MaterialSpec;

/// Opaque handle to a primitive owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimId(u64);

impl PrimId {
    /// Wraps a backend-specific identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The backend-specific identifier.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to a material owned by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(u64);

impl MaterialId {
    /// Wraps a backend-specific identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The backend-specific identifier.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Bounded-volume primitive shapes.
///
/// Both are unit primitives with half-extent 1: a box of edge 2 and a sphere
/// of radius 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumeKind {
    #[default]
    Box,
    Sphere,
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeKind::Box => f.write_str("box"),
            VolumeKind::Sphere => f.write_str("sphere"),
        }
    }
}

/// A retained scene that primitives and materials can be written into.
pub trait SceneGraph {
    /// Creates a primitive at `path`. The path must not be in use.
    fn create_volume(&mut self, path: &str, kind: VolumeKind) -> Result<PrimId>;

    /// Sets the translation of a primitive.
    fn set_translate(&mut self, prim: PrimId, translate: DVec3) -> Result<()>;

    /// Sets the (possibly non-uniform) scale of a primitive.
    fn set_scale(&mut self, prim: PrimId, scale: DVec3) -> Result<()>;

    /// Binds a material to a primitive.
    fn bind_material(&mut self, prim: PrimId, material: MaterialId) -> Result<()>;

    /// Defines a named material.
    fn define_material(&mut self, name: &str, spec: &MaterialSpec) -> Result<MaterialId>;

    /// Looks up a material by name.
    fn lookup_material(&self, name: &str) -> Option<MaterialId>;

    /// Names of all defined materials, in definition order.
    fn material_names(&self) -> Vec<String>;
}

/// Checks that `path` is absolute with non-empty `[A-Za-z0-9_]` segments.
pub fn validate_path(path: &str) -> Result<()> {
    let valid = path
        .strip_prefix('/')
        .is_some_and(|rest| {
            rest.split('/').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
        });
    if valid {
        Ok(())
    } else {
        Err(SceneError::InvalidPath(path.to_string()))
    }
}

/// Joins a child name onto a prim path.
#[must_use]
pub fn join_path(parent: &str, child: &str) -> String {
    format!("{}/{child}", parent.trim_end_matches('/'))
}
