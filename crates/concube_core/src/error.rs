//! # Cube Error Types
//!
//! All errors that can surface from `rotate`, `show` and configuration.

use std::time::Duration;

use concube_shared::GeometryError;
use thiserror::Error;

/// Errors that can occur while operating on a cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Bad size, face or layer. Rejected before the coordinator is entered.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The caller was cancelled while waiting for admission.
    /// The cube was not touched.
    #[error("cancelled while waiting for access to the cube")]
    Cancelled,

    /// The configured wait timeout elapsed before admission.
    /// The cube was not touched.
    #[error("timed out after {0:?} waiting for access to the cube")]
    TimedOut(Duration),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CubeError {
    /// Whether the operation was withdrawn from the wait queue without
    /// running.
    #[must_use]
    pub const fn is_withdrawn(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut(_))
    }
}

/// Result type for cube operations.
pub type CubeResult<T> = Result<T, CubeError>;
