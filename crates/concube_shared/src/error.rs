//! # Geometry Error Types
//!
//! Argument errors detected before any cube state is touched.

use thiserror::Error;

/// Errors raised while naming a face, a layer or a cube size.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A cube must have at least one layer.
    #[error("invalid cube size: {0}")]
    InvalidSize(usize),

    /// Face index outside `0..6`.
    #[error("invalid face index: {0}")]
    InvalidFace(usize),

    /// Layer index outside `0..size`.
    #[error("layer {layer} out of range for cube of size {size}")]
    LayerOutOfRange {
        /// The requested layer.
        layer: usize,
        /// The cube size.
        size: usize,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
