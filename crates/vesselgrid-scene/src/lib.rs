//! Scene-graph layer for vesselgrid.
//!
//! - [`SceneGraph`] is the capability a host scene exposes to the generator
//! - [`Stage`] is the in-memory retained implementation
//! - [`MaterialSet`], [`MaterialAssignment`] and [`RodMaterialIds`] resolve materials by name
//! - [`ElementEmitter`] turns lattice cells and rods into primitives

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod emitter;
pub mod error;
pub mod graph;
pub mod material;
pub mod stage;

pub use emitter::{ElementEmitter, EmitStats, Progress, RodStats, DEFAULT_PROGRESS_INTERVAL};
pub use error::{Result, SceneError};
pub use graph::{join_path, validate_path, MaterialId, PrimId, SceneGraph, VolumeKind};
pub use material::{
    CellMaterials, MaterialAssignment, MaterialDef, MaterialSet, MaterialSpec, RodMaterialIds,
    ZoneMaterialIds, ZoneMaterials,
};
pub use stage::{MaterialEntry, Prim, Stage};
