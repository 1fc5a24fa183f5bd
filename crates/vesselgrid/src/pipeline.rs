//! The generation pass.
//!
//! [`generate`] validates the configuration, checks that every material it
//! binds is either configured or already in the scene, defines the missing
//! ones, and then emits the lattice and the rods. All configuration errors,
//! unknown material names included, are raised before the scene is touched.

use glam::DVec3;
use vesselgrid_scene::{
    ElementEmitter, EmitStats, MaterialDef, MaterialSet, Progress, RodMaterialIds, RodStats,
    SceneError, SceneGraph, Stage,
};

use crate::config::GeneratorConfig;
use crate::Result;

/// Summary of one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Configuration name.
    pub name: String,
    /// Uniform cell scale (`sz`); zero for an empty lattice.
    pub cell_scale: f64,
    /// Cell pitch (`dd`); zero for an empty lattice.
    pub pitch: f64,
    /// Bounds of the full lattice, if it has cells.
    pub lattice_bounds: Option<(DVec3, DVec3)>,
    /// Cell emission counts.
    pub grid: EmitStats,
    /// Rod emission counts, if rods were configured.
    pub rods: Option<RodStats>,
}

impl GenerationReport {
    /// Number of primitives created by the pass.
    #[must_use]
    pub fn prim_count(&self) -> u64 {
        let rods = self
            .rods
            .map_or(0, |r| (r.rods + r.marks) as u64);
        self.grid.emitted + rods
    }
}

/// Runs a generation pass into `scene`.
pub fn generate(config: &GeneratorConfig, scene: &mut dyn SceneGraph) -> Result<GenerationReport> {
    run(config, scene, None)
}

/// Runs a generation pass, reporting progress to `observer`.
pub fn generate_with_progress(
    config: &GeneratorConfig,
    scene: &mut dyn SceneGraph,
    observer: impl FnMut(&Progress),
) -> Result<GenerationReport> {
    run(config, scene, Some(Box::new(observer)))
}

/// Runs a generation pass into a fresh [`Stage`].
pub fn build_stage(config: &GeneratorConfig) -> Result<(Stage, GenerationReport)> {
    let mut stage = Stage::new();
    let report = generate(config, &mut stage)?;
    Ok((stage, report))
}

fn run<'a>(
    config: &GeneratorConfig,
    scene: &'a mut dyn SceneGraph,
    observer: Option<Box<dyn FnMut(&Progress) + 'a>>,
) -> Result<GenerationReport> {
    let plan = config.plan()?;
    log::info!(
        "generating '{}': {} cells along {} axis",
        config.name,
        plan.layout.cell_count(),
        config.principal_axis
    );

    let required = config.required_materials();
    check_materials(&*scene, &config.materials, &required)?;
    ensure_materials(scene, &config.materials)?;
    let set = MaterialSet::lookup(scene, &required);
    let cell_ids = config.cell_materials.resolve(&set)?;
    let rod_ids = config
        .rods
        .as_ref()
        .map(|rods| RodMaterialIds::resolve(rods, &set))
        .transpose()?;

    let mut emitter = ElementEmitter::new(scene, config.root.as_str())?
        .with_kind(config.element_kind)
        .with_progress_interval(config.progress_interval);
    if let Some(observer) = observer {
        emitter = emitter.on_progress(observer);
    }

    let grid = emitter.emit_grid(
        &plan.layout,
        &plan.classifier,
        config.visibility,
        &cell_ids,
    )?;
    let rods = match (&plan.rods, &rod_ids) {
        (Some(builder), Some(ids)) => Some(emitter.emit_rods(builder, ids)?),
        _ => None,
    };

    let report = GenerationReport {
        name: config.name.clone(),
        cell_scale: plan.layout.cell_scale(),
        pitch: plan.layout.pitch(),
        lattice_bounds: plan.layout.bounds(),
        grid,
        rods,
    };
    log::info!(
        "finished '{}': {} prims",
        report.name,
        report.prim_count()
    );
    Ok(report)
}

/// Fails on the first required name that is neither in the scene nor in `defs`.
///
/// The reported available names are the scene's own, followed by the
/// configured ones it does not have yet.
fn check_materials(
    scene: &dyn SceneGraph,
    defs: &[MaterialDef],
    required: &[String],
) -> Result<()> {
    let mut available = scene.material_names();
    for def in defs {
        if !available.contains(&def.name) {
            available.push(def.name.clone());
        }
    }
    match required.iter().find(|name| !available.contains(*name)) {
        Some(name) => Err(SceneError::MaterialNotFound {
            name: name.clone(),
            available,
        }),
        None => Ok(()),
    }
}

/// Defines the configured materials the scene does not have yet.
fn ensure_materials(scene: &mut dyn SceneGraph, defs: &[MaterialDef]) -> Result<()> {
    let mut defined = 0;
    for def in defs {
        if scene.lookup_material(&def.name).is_some() {
            log::debug!("reusing material {}", def.name);
        } else {
            scene.define_material(&def.name, &def.spec)?;
            defined += 1;
        }
    }
    log::info!("defined {defined} of {} materials", defs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vesselgrid_core::{GridError, GridSpec, VisibilityPolicy, Zone};
    use vesselgrid_scene::{MaterialAssignment, MaterialSpec, VolumeKind, ZoneMaterials};

    #[test]
    fn test_default_pass() {
        let (stage, report) = build_stage(&GeneratorConfig::default()).unwrap();
        assert_eq!(report.grid.visited, 1000);
        assert_eq!(report.prim_count(), stage.len() as u64);
        assert_eq!(report.rods, Some(RodStats { rods: 3, marks: 18 }));
        assert_eq!(stage.materials().count(), 6);
    }

    #[test]
    fn test_configuration_error_leaves_scene_untouched() {
        let mut config = GeneratorConfig::default();
        config.grid.target_extent = 0.0;
        let mut stage = Stage::new();
        let err = generate(&config, &mut stage).unwrap_err();
        assert!(matches!(err, SceneError::Grid(GridError::InvalidExtent(_))));
        assert!(stage.is_empty());
        assert_eq!(stage.materials().count(), 0);
    }

    #[test]
    fn test_missing_zone_material_leaves_scene_untouched() {
        let config = GeneratorConfig {
            cell_materials: MaterialAssignment::ByZone(ZoneMaterials {
                middle: "Orange".to_string(),
                ..ZoneMaterials::default()
            }),
            ..GeneratorConfig::default()
        };
        let mut stage = Stage::new();
        let err = generate(&config, &mut stage).unwrap_err();
        match err {
            SceneError::MaterialNotFound { name, available } => {
                assert_eq!(name, "Orange");
                assert_eq!(
                    available,
                    ["Red", "Green", "Blue", "Magenta", "Cyan", "Yellow"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(stage.is_empty());
        assert_eq!(stage.materials().count(), 0);
    }

    #[test]
    fn test_missing_material_lists_scene_names() {
        let mut stage = Stage::new();
        stage
            .define_material("Chrome", &MaterialSpec::preview(Vec3::splat(0.9)))
            .unwrap();
        let config = GeneratorConfig {
            materials: Vec::new(),
            cell_materials: MaterialAssignment::cycle(["Chrome", "Gold"]),
            rods: None,
            ..GeneratorConfig::default()
        };
        let err = generate(&config, &mut stage).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MaterialNotFound { ref name, ref available }
                if name == "Gold" && available == &["Chrome".to_string()]
        ));
        assert_eq!(stage.materials().count(), 1);
        assert!(stage.is_empty());
    }

    #[test]
    fn test_missing_rod_material_leaves_scene_untouched() {
        let mut config = GeneratorConfig::default();
        if let Some(rods) = config.rods.as_mut() {
            rods.mark_material = "Black".to_string();
        }
        let mut stage = Stage::new();
        assert!(matches!(
            generate(&config, &mut stage),
            Err(SceneError::MaterialNotFound { .. })
        ));
        assert_eq!(stage.materials().count(), 0);
    }

    #[test]
    fn test_cycled_materials_alternate() {
        let config = GeneratorConfig {
            grid: GridSpec::new(4, 1, 1, 8.0),
            visibility: VisibilityPolicy::Full,
            cell_materials: MaterialAssignment::cycle(["Red", "Green", "Blue"]),
            rods: None,
            ..GeneratorConfig::default()
        };
        let (stage, report) = build_stage(&config).unwrap();
        assert_eq!(report.grid.emitted, 4);
        let names: Vec<_> = stage.prims().map(|p| stage.material_of(p).unwrap()).collect();
        assert_eq!(names, ["Red", "Green", "Blue", "Red"]);
    }

    #[test]
    fn test_existing_materials_are_reused() {
        let mut stage = Stage::new();
        let red = stage
            .define_material("Red", &MaterialSpec::preview(Vec3::new(0.5, 0.0, 0.0)))
            .unwrap();
        let config = GeneratorConfig {
            rods: None,
            ..GeneratorConfig::default()
        };
        generate(&config, &mut stage).unwrap();
        assert_eq!(stage.lookup_material("Red"), Some(red));
        assert_eq!(stage.materials().count(), 6);
    }

    #[test]
    fn test_zero_count_still_builds_rods() {
        let config = GeneratorConfig {
            grid: GridSpec::new(0, 10, 10, 1.0),
            ..GeneratorConfig::default()
        };
        let (stage, report) = build_stage(&config).unwrap();
        assert_eq!(report.grid.visited, 0);
        assert_eq!(report.cell_scale, 0.0);
        assert!(report.lattice_bounds.is_none());
        assert_eq!(stage.len(), 21);
    }

    #[test]
    fn test_progress_observer() {
        let mut stage = Stage::new();
        let mut observed = 0;
        let report = generate_with_progress(&GeneratorConfig::default(), &mut stage, |_| {
            observed += 1;
        })
        .unwrap();
        assert_eq!(observed, 5);
        assert_eq!(report.grid.visited, 1000);
    }

    #[test]
    fn test_element_kind_and_zones() {
        let config = GeneratorConfig {
            grid: GridSpec::cube(11, 22.0).with_spacing(2.0, 0.0),
            element_kind: VolumeKind::Sphere,
            rods: None,
            ..GeneratorConfig::default()
        };
        let (stage, report) = build_stage(&config).unwrap();
        assert_eq!(report.grid.zone_count(Zone::Inner), 11);
        assert_eq!(report.grid.zone_count(Zone::Middle), 44);
        assert_eq!(stage.count_kind(VolumeKind::Sphere), 55);
    }
}
