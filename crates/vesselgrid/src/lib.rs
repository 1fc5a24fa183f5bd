//! vesselgrid: procedural volumetric grids for retained scenes.
//!
//! vesselgrid lays out a centred lattice of cells, keeps the ones within a
//! radial band around a principal axis (the "vessel"), and writes them into a
//! scene graph together with three reference rods carrying tick markers.
//!
//! # Quick Start
//!
//! ```no_run
//! use vesselgrid::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let config = Preset::Vessel.config();
//!     let (stage, report) = build_stage(&config)?;
//!     println!("{} prims, cell scale {}", report.prim_count(), report.cell_scale);
//!
//!     stage.save_json("vessel.json")?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`GridLayout`] fits `nx × ny × nz` cells to a target extent, centred on the origin
//! - [`RadialZoneClassifier`] assigns each cell an Inner, Middle, or Outer [`Zone`]
//! - [`VisibilityPolicy`] keeps the tube and drops the background
//! - [`MaterialAssignment`] colours cells by zone, or cycles a palette in visit order
//! - [`AxisRodBuilder`] lays out the reference rods and markers
//! - [`ElementEmitter`] writes survivors into any [`SceneGraph`]
//!
//! [`compute_grid`] and [`compute_rod_marks`] expose the geometry without a scene.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod init;
mod pipeline;
mod presets;

pub use config::{GenerationPlan, GeneratorConfig};
pub use init::init_logging;
pub use pipeline::{build_stage, generate, generate_with_progress, GenerationReport};
pub use presets::Preset;

// Re-export core types
pub use vesselgrid_core::{
    compute_grid, compute_lattice, compute_rod_marks, Axis, AxisMaterials, AxisRodBuilder, Cell,
    GridElement, GridError, GridLayout, GridSpec, RadialZoneClassifier, Rod, RodConfig, Tick,
    VisibilityPolicy, Zone, ZoneThresholds, MAX_MARKS_PER_ROD,
};

// Re-export scene types
pub use vesselgrid_scene::{
    CellMaterials, ElementEmitter, EmitStats, MaterialAssignment, MaterialDef, MaterialId,
    MaterialSet, MaterialSpec, Prim, PrimId, Progress, Result, RodStats, SceneError, SceneGraph,
    Stage, VolumeKind, ZoneMaterials,
};

pub use glam::{DVec3, UVec3, Vec3};
