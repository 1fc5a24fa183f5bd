//! Error types for the scene layer.

use thiserror::Error;
use vesselgrid_core::GridError;

/// The main error type for scene population.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The lattice or rod configuration is unusable.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A prim already exists at this path.
    #[error("prim '{0}' already exists")]
    PathExists(String),

    /// A path is not an absolute, well-formed prim path.
    #[error("invalid prim path '{0}'")]
    InvalidPath(String),

    /// A prim handle does not belong to this scene.
    #[error("prim #{0} not found")]
    PrimNotFound(u64),

    /// A material with the given name already exists.
    #[error("material '{0}' already exists")]
    MaterialExists(String),

    /// A required material name did not resolve.
    #[error("material '{name}' not found (available: {})", .available.join(", "))]
    MaterialNotFound {
        name: String,
        available: Vec<String>,
    },

    /// A cycling material assignment names no materials.
    #[error("material cycle is empty")]
    EmptyMaterialCycle,

    /// A material handle does not belong to this scene.
    #[error("material #{0} not found")]
    UnknownMaterial(u64),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
