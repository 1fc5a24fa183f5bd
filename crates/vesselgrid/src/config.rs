//! Generator configuration.
//!
//! One [`GeneratorConfig`] describes a whole generation pass: the lattice,
//! the tube, the materials and how cells are assigned them, and the optional
//! reference rods. Configurations are plain serde data and can be loaded
//! from JSON.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vesselgrid_core::{
    Axis, AxisRodBuilder, GridLayout, GridSpec, RadialZoneClassifier, RodConfig,
    VisibilityPolicy, ZoneThresholds,
};
use vesselgrid_scene::{
    validate_path, MaterialAssignment, MaterialDef, SceneError, VolumeKind,
    DEFAULT_PROGRESS_INTERVAL,
};

use crate::Result;

/// Everything a generation pass needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name used in logs and reports.
    pub name: String,
    /// Prim path under which everything is created.
    pub root: String,
    /// Lattice dimensions and spacing.
    pub grid: GridSpec,
    /// Radii separating the zones.
    pub zones: ZoneThresholds,
    /// Long axis of the tube.
    pub principal_axis: Axis,
    /// Primitive shape used for cells.
    pub element_kind: VolumeKind,
    /// Which zones are materialised.
    pub visibility: VisibilityPolicy,
    /// Materials to define, in order. Names already present in the scene are reused.
    pub materials: Vec<MaterialDef>,
    /// How cells pick their material: per zone, or cycling by visit index.
    pub cell_materials: MaterialAssignment,
    /// Reference rods, if any.
    pub rods: Option<RodConfig>,
    /// Visited cells between progress observations (0 disables).
    pub progress_interval: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: "vessel".to_string(),
            root: "/World".to_string(),
            grid: GridSpec::default(),
            zones: ZoneThresholds::default(),
            principal_axis: Axis::Z,
            element_kind: VolumeKind::Box,
            visibility: VisibilityPolicy::Tube,
            materials: MaterialDef::palette(),
            cell_materials: MaterialAssignment::default(),
            rods: Some(RodConfig::default()),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// The validated, geometry-side result of a configuration.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub layout: GridLayout,
    pub classifier: RadialZoneClassifier,
    pub rods: Option<AxisRodBuilder>,
}

impl GeneratorConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the whole configuration and plans its geometry.
    ///
    /// Nothing here touches a scene, so any error surfaces before the first
    /// primitive is created.
    pub fn plan(&self) -> Result<GenerationPlan> {
        validate_path(&self.root)?;

        let mut seen = HashSet::new();
        for def in &self.materials {
            if !seen.insert(def.name.as_str()) {
                return Err(SceneError::MaterialExists(def.name.clone()));
            }
        }
        self.cell_materials.validate()?;

        let layout = GridLayout::plan(&self.grid)?;
        let classifier = RadialZoneClassifier::new(self.principal_axis, self.zones)?;
        let rods = self
            .rods
            .clone()
            .map(AxisRodBuilder::new)
            .transpose()?;

        Ok(GenerationPlan {
            layout,
            classifier,
            rods,
        })
    }

    /// Checks the configuration without keeping the plan.
    pub fn validate(&self) -> Result<()> {
        self.plan().map(|_| ())
    }

    /// Every material name the pass binds, in first-use order.
    #[must_use]
    pub fn required_materials(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut add = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };
        for name in self.cell_materials.names() {
            add(name);
        }
        if let Some(rods) = &self.rods {
            for axis in Axis::ALL {
                add(rods.materials.get(axis));
            }
            add(&rods.mark_material);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesselgrid_core::GridError;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeneratorConfig::default();
        let plan = config.plan().unwrap();
        assert_eq!(plan.layout.cell_count(), 1000);
        assert!(plan.rods.is_some());
    }

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let config = GeneratorConfig {
            name: "custom".to_string(),
            principal_axis: Axis::X,
            element_kind: VolumeKind::Sphere,
            rods: None,
            ..GeneratorConfig::default()
        };
        let parsed = GeneratorConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json_str(
            r#"{ "name": "small", "grid": { "nx": 3, "ny": 4, "nz": 5 }, "principal_axis": "Y" }"#,
        )
        .unwrap();
        assert_eq!(config.name, "small");
        assert_eq!(config.grid.nz, 5);
        assert_eq!(config.grid.base_cell_size, 2.0);
        assert_eq!(config.principal_axis, Axis::Y);
        assert_eq!(config.root, "/World");
        assert_eq!(config.materials.len(), 6);
    }

    #[test]
    fn test_bad_json_is_reported() {
        assert!(matches!(
            GeneratorConfig::from_json_str("{ \"grid\": 3 }"),
            Err(SceneError::JsonError(_))
        ));
        assert!(matches!(
            GeneratorConfig::load("/nonexistent/vesselgrid.json"),
            Err(SceneError::IoError(_))
        ));
    }

    #[test]
    fn test_plan_rejects_configuration_errors() {
        let mut config = GeneratorConfig::default();
        config.grid.nx = -1;
        assert!(matches!(
            config.plan(),
            Err(SceneError::Grid(GridError::NegativeCount { .. }))
        ));

        let mut config = GeneratorConfig::default();
        config.zones = ZoneThresholds::new(3.0, 1.0);
        assert!(matches!(
            config.plan(),
            Err(SceneError::Grid(GridError::InvalidThresholds { .. }))
        ));

        let mut config = GeneratorConfig::default();
        if let Some(rods) = config.rods.as_mut() {
            rods.mark_spacing = 0.0;
        }
        assert!(matches!(
            config.plan(),
            Err(SceneError::Grid(GridError::InvalidMarkSpacing(_)))
        ));

        let config = GeneratorConfig {
            root: "World".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.plan(), Err(SceneError::InvalidPath(_))));

        let mut config = GeneratorConfig::default();
        config.materials.push(config.materials[0].clone());
        assert!(matches!(config.plan(), Err(SceneError::MaterialExists(_))));
    }

    #[test]
    fn test_required_materials_are_deduplicated() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.required_materials(),
            ["Red", "Green", "Blue", "Yellow"]
        );

        let config = GeneratorConfig {
            rods: None,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.required_materials(), ["Red", "Green", "Blue"]);

        let config = GeneratorConfig {
            cell_materials: MaterialAssignment::cycle(["Cyan", "Red", "Cyan"]),
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.required_materials(),
            ["Cyan", "Red", "Green", "Blue", "Yellow"]
        );
    }

    #[test]
    fn test_empty_cycle_is_rejected() {
        let config = GeneratorConfig {
            cell_materials: MaterialAssignment::Cycle(Vec::new()),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.plan(), Err(SceneError::EmptyMaterialCycle)));
    }
}
