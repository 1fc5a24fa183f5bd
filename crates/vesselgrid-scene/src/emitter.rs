//! Materialises lattice cells and reference rods as scene primitives.
//!
//! Cells are visited in lexicographic `(ix, iy, iz)` order so that prim
//! names, logs, and progress observations are reproducible. Progress and
//! cycling material choice are counted over visited cells, not emitted ones,
//! so both are independent of the visibility policy.

use glam::DVec3;
use vesselgrid_core::{AxisRodBuilder, GridLayout, RadialZoneClassifier, VisibilityPolicy, Zone};

use crate::error::Result;
use crate::graph::{join_path, validate_path, MaterialId, PrimId, SceneGraph, VolumeKind};
use crate::material::{CellMaterials, RodMaterialIds};

/// Default number of visited cells between progress observations.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 200;

/// A progress observation during grid emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Cells visited so far, including filtered ones.
    pub visited: u64,
    /// Cells in the whole lattice.
    pub total: u64,
    /// Cells emitted so far.
    pub emitted: u64,
}

/// Counts from one grid emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub visited: u64,
    pub emitted: u64,
    /// Emitted cells per zone, indexed by [`Zone::index`].
    pub by_zone: [u64; 3],
}

impl EmitStats {
    /// Emitted cells in `zone`.
    #[must_use]
    pub fn zone_count(&self, zone: Zone) -> u64 {
        self.by_zone[zone.index()]
    }
}

/// Counts from one rod emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RodStats {
    pub rods: usize,
    pub marks: usize,
}

/// Writes cells and rods into a scene under a root path.
pub struct ElementEmitter<'s> {
    scene: &'s mut dyn SceneGraph,
    root: String,
    kind: VolumeKind,
    progress_interval: u64,
    observer: Option<Box<dyn FnMut(&Progress) + 's>>,
}

impl<'s> ElementEmitter<'s> {
    /// Creates an emitter writing under `root`, which must be a valid prim path.
    pub fn new(scene: &'s mut dyn SceneGraph, root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        validate_path(&root)?;
        Ok(Self {
            scene,
            root,
            kind: VolumeKind::Box,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            observer: None,
        })
    }

    /// Sets the primitive shape used for cells.
    #[must_use]
    pub fn with_kind(mut self, kind: VolumeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the progress interval; 0 disables progress observations.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Registers a callback invoked at each progress observation.
    #[must_use]
    pub fn on_progress(mut self, observer: impl FnMut(&Progress) + 's) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Root path under which prims are created.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Creates one primitive, places it, and binds its material.
    pub fn emit_element(
        &mut self,
        path: &str,
        kind: VolumeKind,
        translate: DVec3,
        scale: DVec3,
        material: MaterialId,
    ) -> Result<PrimId> {
        log::debug!("defining {path}");
        let prim = self.scene.create_volume(path, kind)?;
        self.scene.set_translate(prim, translate)?;
        self.scene.set_scale(prim, scale)?;
        self.scene.bind_material(prim, material)?;
        Ok(prim)
    }

    /// Emits every cell of `layout` admitted by `policy`.
    pub fn emit_grid(
        &mut self,
        layout: &GridLayout,
        classifier: &RadialZoneClassifier,
        policy: VisibilityPolicy,
        materials: &CellMaterials,
    ) -> Result<EmitStats> {
        let total = layout.cell_count();
        let scale = DVec3::splat(layout.cell_scale());
        let mut stats = EmitStats::default();

        log::info!(
            "emitting {}x{}x{} lattice ({total} cells, scale {:.4}, pitch {:.4}) under {}",
            layout.counts().x,
            layout.counts().y,
            layout.counts().z,
            layout.cell_scale(),
            layout.pitch(),
            self.root
        );

        for cell in layout.cells(classifier) {
            let visit = stats.visited;
            stats.visited += 1;

            if policy.admits(cell.zone) {
                let path = join_path(
                    &self.root,
                    &format!("Cell_{}_{}_{}", cell.index.x, cell.index.y, cell.index.z),
                );
                self.emit_element(
                    &path,
                    self.kind,
                    cell.position,
                    scale,
                    materials.select(visit, cell.zone),
                )?;
                stats.emitted += 1;
                stats.by_zone[cell.zone.index()] += 1;
            }

            if self.progress_interval > 0 && stats.visited % self.progress_interval == 0 {
                self.observe(Progress {
                    visited: stats.visited,
                    total,
                    emitted: stats.emitted,
                });
            }
        }

        log::info!(
            "emitted {} of {} cells (inner {}, middle {}, outer {})",
            stats.emitted,
            stats.visited,
            stats.zone_count(Zone::Inner),
            stats.zone_count(Zone::Middle),
            stats.zone_count(Zone::Outer)
        );
        Ok(stats)
    }

    /// Emits the three rods and their markers under `{root}/Rods`.
    pub fn emit_rods(
        &mut self,
        builder: &AxisRodBuilder,
        materials: &RodMaterialIds,
    ) -> Result<RodStats> {
        let rods_root = join_path(&self.root, "Rods");
        let mark_scale = DVec3::splat(builder.config().mark_size);
        let mut stats = RodStats::default();

        for rod in builder.rods() {
            let rod_path = join_path(&rods_root, &format!("Rod_{}", rod.axis.label()));
            self.emit_element(
                &rod_path,
                VolumeKind::Box,
                DVec3::ZERO,
                rod.scale(),
                materials.rod(rod.axis),
            )?;
            stats.rods += 1;

            for tick in builder.ticks(rod.axis)? {
                let mark_path = join_path(&rod_path, &format!("Mark_{}", tick.index));
                self.emit_element(
                    &mark_path,
                    VolumeKind::Sphere,
                    tick.position,
                    mark_scale,
                    materials.mark(),
                )?;
                stats.marks += 1;
            }
        }

        log::info!("emitted {} rods with {} marks", stats.rods, stats.marks);
        Ok(stats)
    }

    fn observe(&mut self, progress: Progress) {
        log::info!(
            "visited {}/{} cells, {} emitted",
            progress.visited,
            progress.total,
            progress.emitted
        );
        if let Some(observer) = self.observer.as_mut() {
            observer(&progress);
        }
    }
}
