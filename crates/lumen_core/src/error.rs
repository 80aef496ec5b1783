//! Errors reported by the scene mutation and document API.

use thiserror::Error;

use crate::primitive::PrimitiveKind;

/// Errors that can occur while mutating or loading a scene.
///
/// Every failing call leaves the scene exactly as it was before the call.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("{kind} collection is full (capacity {capacity})")]
    CapacityExceeded { kind: PrimitiveKind, capacity: usize },

    #[error("light list is full (capacity {capacity})")]
    LightCapacityExceeded { capacity: usize },

    #[error("{kind} index {index} out of range (count {len})")]
    IndexOutOfRange {
        kind: PrimitiveKind,
        index: usize,
        len: usize,
    },

    #[error("light index {index} out of range (count {len})")]
    LightIndexOutOfRange { index: usize, len: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid material kind code: {0}")]
    InvalidMaterialKind(u32),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid light: {0}")]
    InvalidLight(String),

    #[error("{kind} has no {property}")]
    UnsupportedProperty {
        kind: PrimitiveKind,
        property: &'static str,
    },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
