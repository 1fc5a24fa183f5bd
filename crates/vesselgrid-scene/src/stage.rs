//! In-memory retained scene.
//!
//! [`Stage`] is a plain [`SceneGraph`] backend: prims are kept in creation
//! order and indexed by path, materials in definition order. It backs the
//! tests and any host without an engine of its own, and can be exported as
//! JSON.

use std::collections::HashMap;
use std::path::Path;

use glam::DVec3;
use serde::Serialize;

use crate::error::{Result, SceneError};
use crate::graph::{validate_path, MaterialId, PrimId, SceneGraph, VolumeKind};
use crate::material::MaterialSpec;

/// A primitive held by a [`Stage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prim {
    /// Absolute prim path.
    pub path: String,
    /// Primitive shape.
    pub kind: VolumeKind,
    /// Translation (origin until set).
    pub translate: DVec3,
    /// Scale (identity until set).
    pub scale: DVec3,
    /// Index of the bound material, if any.
    pub material: Option<MaterialId>,
}

impl Prim {
    /// World-space bounds of the unit primitive after scale and translation.
    #[must_use]
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let half = self.scale.abs();
        (self.translate - half, self.translate + half)
    }
}

/// A named material held by a [`Stage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialEntry {
    pub name: String,
    pub spec: MaterialSpec,
}

/// Retained scene of prims and materials.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stage {
    materials: Vec<MaterialEntry>,
    prims: Vec<Prim>,
    /// Map from prim path -> position in `prims`
    #[serde(skip)]
    paths: HashMap<String, usize>,
}

impl Stage {
    /// Creates an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a prim by handle.
    #[must_use]
    pub fn prim(&self, id: PrimId) -> Option<&Prim> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|index| self.prims.get(index))
    }

    /// Returns a prim by path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Prim> {
        self.paths.get(path).map(|&index| &self.prims[index])
    }

    /// Checks if a prim exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Prims in creation order.
    pub fn prims(&self) -> impl Iterator<Item = &Prim> {
        self.prims.iter()
    }

    /// Prims whose path lies under `parent`.
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Prim> + 'a {
        self.prims.iter().filter(move |p| {
            p.path
                .strip_prefix(parent)
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Returns a material by handle.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> Option<&MaterialEntry> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|index| self.materials.get(index))
    }

    /// Name of the material bound to `prim`, if any.
    #[must_use]
    pub fn material_of(&self, prim: &Prim) -> Option<&str> {
        prim.material
            .and_then(|id| self.material(id))
            .map(|m| m.name.as_str())
    }

    /// Materials in definition order.
    pub fn materials(&self) -> impl Iterator<Item = &MaterialEntry> {
        self.materials.iter()
    }

    /// Returns the total number of prims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prims.len()
    }

    /// Returns true if the stage has no prims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    /// Number of prims of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: VolumeKind) -> usize {
        self.prims.iter().filter(|p| p.kind == kind).count()
    }

    /// Removes every prim and material.
    pub fn clear(&mut self) {
        self.prims.clear();
        self.paths.clear();
        self.materials.clear();
    }

    /// Axis-aligned bounds of all prims, or `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        let mut has_extent = false;

        for prim in &self.prims {
            let (bb_min, bb_max) = prim.bounding_box();
            min = min.min(bb_min);
            max = max.max(bb_max);
            has_extent = true;
        }

        has_extent.then_some((min, max))
    }

    /// Diagonal of the bounding box; 1.0 for an empty stage.
    #[must_use]
    pub fn length_scale(&self) -> f64 {
        self.bounding_box()
            .map_or(1.0, |(min, max)| (max - min).length())
    }

    /// Serializes the stage as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the stage as JSON to `path`.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("wrote {} prims to {}", self.len(), path.display());
        Ok(())
    }

    fn prim_mut(&mut self, id: PrimId) -> Result<&mut Prim> {
        usize::try_from(id.raw())
            .ok()
            .and_then(|index| self.prims.get_mut(index))
            .ok_or(SceneError::PrimNotFound(id.raw()))
    }
}

impl SceneGraph for Stage {
    fn create_volume(&mut self, path: &str, kind: VolumeKind) -> Result<PrimId> {
        validate_path(path)?;
        if self.paths.contains_key(path) {
            return Err(SceneError::PathExists(path.to_string()));
        }

        let index = self.prims.len();
        self.prims.push(Prim {
            path: path.to_string(),
            kind,
            translate: DVec3::ZERO,
            scale: DVec3::ONE,
            material: None,
        });
        self.paths.insert(path.to_string(), index);
        Ok(PrimId::new(index as u64))
    }

    fn set_translate(&mut self, prim: PrimId, translate: DVec3) -> Result<()> {
        self.prim_mut(prim)?.translate = translate;
        Ok(())
    }

    fn set_scale(&mut self, prim: PrimId, scale: DVec3) -> Result<()> {
        self.prim_mut(prim)?.scale = scale;
        Ok(())
    }

    fn bind_material(&mut self, prim: PrimId, material: MaterialId) -> Result<()> {
        if self.material(material).is_none() {
            return Err(SceneError::UnknownMaterial(material.raw()));
        }
        self.prim_mut(prim)?.material = Some(material);
        Ok(())
    }

    fn define_material(&mut self, name: &str, spec: &MaterialSpec) -> Result<MaterialId> {
        if self.lookup_material(name).is_some() {
            return Err(SceneError::MaterialExists(name.to_string()));
        }
        let id = MaterialId::new(self.materials.len() as u64);
        self.materials.push(MaterialEntry {
            name: name.to_string(),
            spec: spec.clone(),
        });
        Ok(id)
    }

    fn lookup_material(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(|index| MaterialId::new(index as u64))
    }

    fn material_names(&self) -> Vec<String> {
        self.materials.iter().map(|m| m.name.clone()).collect()
    }
}
