//! Materials: definitions, ordered sets, and cell/rod assignments.
//!
//! Materials are always addressed by name. A [`MaterialSet`] keeps its
//! `(name, handle)` pairs in an explicit order, and assignments such as
//! [`ZoneMaterials`] resolve each slot by name, so a name missing from the
//! scene can never shift another slot onto the wrong material.
//!
//! Cells pick their material through a [`MaterialAssignment`]: either one
//! material per radial zone, or a fixed list cycled by visit index.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vesselgrid_core::{Axis, RodConfig, Zone};

use crate::error::{Result, SceneError};
use crate::graph::{MaterialId, SceneGraph};

/// Plain surface parameters handed to the scene when a material is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSpec {
    /// Diffuse RGB color.
    pub diffuse_color: Vec3,
    /// Roughness (0.0 - 1.0).
    pub roughness: f32,
    /// Metallic factor (0.0 - 1.0).
    pub metallic: f32,
    /// Transparency (0.0 = opaque).
    pub transparency: f32,
}

impl MaterialSpec {
    /// A slightly rough, non-metallic, opaque surface of the given color.
    pub fn preview(diffuse_color: Vec3) -> Self {
        Self {
            diffuse_color,
            roughness: 0.2,
            metallic: 0.0,
            transparency: 0.0,
        }
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::preview(Vec3::splat(0.8))
    }
}

/// A named material definition, as listed in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub name: String,
    #[serde(default)]
    pub spec: MaterialSpec,
}

impl MaterialDef {
    pub fn new(name: impl Into<String>, spec: MaterialSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    /// The six primary and secondary colors used by the presets.
    #[must_use]
    pub fn palette() -> Vec<MaterialDef> {
        [
            ("Red", Vec3::new(1.0, 0.0, 0.0)),
            ("Green", Vec3::new(0.0, 1.0, 0.0)),
            ("Blue", Vec3::new(0.0, 0.0, 1.0)),
            ("Magenta", Vec3::new(1.0, 0.0, 1.0)),
            ("Cyan", Vec3::new(0.0, 1.0, 1.0)),
            ("Yellow", Vec3::new(1.0, 1.0, 0.0)),
        ]
        .into_iter()
        .map(|(name, color)| MaterialDef::new(name, MaterialSpec::preview(color)))
        .collect()
    }
}

/// An ordered list of `(name, material)` pairs.
///
/// The set also remembers every name its source offered, so a failed
/// [`require`](Self::require) can list what was actually available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialSet {
    entries: Vec<(String, MaterialId)>,
    available: Vec<String>,
}

impl MaterialSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines every material in `defs` in the scene, in order.
    pub fn define_all(scene: &mut dyn SceneGraph, defs: &[MaterialDef]) -> Result<Self> {
        let mut set = Self::new();
        for def in defs {
            let id = scene.define_material(&def.name, &def.spec)?;
            set.push(def.name.clone(), id);
        }
        log::info!("defined {} materials", set.len());
        Ok(set)
    }

    /// Looks up `names` in the scene, keeping the ones that resolve.
    ///
    /// Missing names are not an error: they are reported together with the
    /// names the scene does offer, and the resolved subset is returned.
    pub fn lookup<S: AsRef<str>>(scene: &dyn SceneGraph, names: &[S]) -> Self {
        let mut set = Self {
            available: scene.material_names(),
            ..Self::default()
        };
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            match scene.lookup_material(name) {
                Some(id) => set.push(name.to_string(), id),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            log::warn!(
                "materials not found: {}; available: {}",
                missing.join(", "),
                set.available.join(", ")
            );
        }
        set
    }

    /// Appends a pair, replacing the handle if the name is already present.
    pub fn push(&mut self, name: impl Into<String>, id: MaterialId) {
        let name = name.into();
        if !self.available.contains(&name) {
            self.available.push(name.clone());
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = id,
            None => self.entries.push((name, id)),
        }
    }

    /// Returns the handle for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MaterialId> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Returns the handle for `name`, or an error listing the available names.
    pub fn require(&self, name: &str) -> Result<MaterialId> {
        self.get(name).ok_or_else(|| SceneError::MaterialNotFound {
            name: name.to_string(),
            available: self.available.clone(),
        })
    }

    /// Every name the source scene offered when the set was built.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MaterialId)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Number of materials in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caller-supplied material name for each zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMaterials {
    pub inner: String,
    pub middle: String,
    pub outer: String,
}

impl Default for ZoneMaterials {
    fn default() -> Self {
        Self {
            inner: "Red".to_string(),
            middle: "Green".to_string(),
            outer: "Blue".to_string(),
        }
    }
}

impl ZoneMaterials {
    /// Returns the material name for `zone`.
    #[must_use]
    pub fn get(&self, zone: Zone) -> &str {
        match zone {
            Zone::Inner => &self.inner,
            Zone::Middle => &self.middle,
            Zone::Outer => &self.outer,
        }
    }

    /// Resolves every zone against `set`; any missing name is fatal.
    pub fn resolve(&self, set: &MaterialSet) -> Result<ZoneMaterialIds> {
        Ok(ZoneMaterialIds([
            set.require(&self.inner)?,
            set.require(&self.middle)?,
            set.require(&self.outer)?,
        ]))
    }
}

/// Resolved material handle per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneMaterialIds([MaterialId; 3]);

impl ZoneMaterialIds {
    /// The handle bound to cells of `zone`.
    #[must_use]
    pub fn get(&self, zone: Zone) -> MaterialId {
        self.0[zone.index()]
    }
}

/// How lattice cells are assigned their material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialAssignment {
    /// One material per radial zone.
    ByZone(ZoneMaterials),
    /// Names taken in turn by visit index, wrapping around.
    Cycle(Vec<String>),
}

impl Default for MaterialAssignment {
    fn default() -> Self {
        MaterialAssignment::ByZone(ZoneMaterials::default())
    }
}

impl MaterialAssignment {
    /// Cycles through `names` in order.
    pub fn cycle<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        MaterialAssignment::Cycle(names.into_iter().map(Into::into).collect())
    }

    /// Material names referenced by the assignment, in slot order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            MaterialAssignment::ByZone(zones) => {
                Zone::ALL.iter().map(|&zone| zones.get(zone)).collect()
            }
            MaterialAssignment::Cycle(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Rejects an empty cycle.
    pub fn validate(&self) -> Result<()> {
        match self {
            MaterialAssignment::Cycle(names) if names.is_empty() => {
                Err(SceneError::EmptyMaterialCycle)
            }
            _ => Ok(()),
        }
    }

    /// Resolves every slot against `set`; any missing name is fatal.
    pub fn resolve(&self, set: &MaterialSet) -> Result<CellMaterials> {
        self.validate()?;
        match self {
            MaterialAssignment::ByZone(zones) => zones.resolve(set).map(CellMaterials::from),
            MaterialAssignment::Cycle(names) => {
                let ids = names
                    .iter()
                    .map(|name| set.require(name))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CellMaterials(CellSlots::Cycle(ids)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CellSlots {
    ByZone(ZoneMaterialIds),
    Cycle(Vec<MaterialId>),
}

/// Resolved per-cell material choice. A cycle always holds at least one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMaterials(CellSlots);

impl CellMaterials {
    /// The handle for the cell visited at 0-based `visit` and lying in `zone`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn select(&self, visit: u64, zone: Zone) -> MaterialId {
        match &self.0 {
            CellSlots::ByZone(ids) => ids.get(zone),
            // The remainder is below `ids.len()`, so it fits in usize.
            CellSlots::Cycle(ids) => ids[(visit % ids.len() as u64) as usize],
        }
    }
}

impl From<ZoneMaterialIds> for CellMaterials {
    fn from(ids: ZoneMaterialIds) -> Self {
        Self(CellSlots::ByZone(ids))
    }
}

/// Resolved handles for the rods and their markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RodMaterialIds {
    axes: [MaterialId; 3],
    mark: MaterialId,
}

impl RodMaterialIds {
    /// Resolves the rod and marker names of `config` against `set`.
    pub fn resolve(config: &RodConfig, set: &MaterialSet) -> Result<Self> {
        Ok(Self {
            axes: [
                set.require(config.materials.get(Axis::X))?,
                set.require(config.materials.get(Axis::Y))?,
                set.require(config.materials.get(Axis::Z))?,
            ],
            mark: set.require(&config.mark_material)?,
        })
    }

    /// The handle bound to the rod along `axis`.
    #[must_use]
    pub fn rod(&self, axis: Axis) -> MaterialId {
        match axis {
            Axis::X => self.axes[0],
            Axis::Y => self.axes[1],
            Axis::Z => self.axes[2],
        }
    }

    /// The handle bound to every marker.
    #[must_use]
    pub fn mark(&self) -> MaterialId {
        self.mark
    }
}
