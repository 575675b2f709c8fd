//! # Geometry Mapper
//!
//! Classifies a `(face, layer)` rotation into the physical ring it moves.
//!
//! ```text
//!   Top, layer 0      ──┐
//!                       ├──>  (TopBottom, plane 0)
//!   Bottom, layer N-1 ──┘
//! ```
//!
//! Two rotations on the same axis and different planes touch disjoint cells.
//! Two rotations on different axes always share edge cells and conflict.

use crate::error::{GeometryError, GeometryResult};
use crate::face::{Axis, Face};

/// Canonical index of a physical ring along an axis, independent of which
/// of the two opposite faces named it.
pub type Plane = usize;

/// Maps a rotation onto its axis and canonical plane.
///
/// Primary faces (Top, Left, Front) use the layer as the plane; their
/// opposites count from the far side, so `plane = size - 1 - layer`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSize`] for a zero size and
/// [`GeometryError::LayerOutOfRange`] when `layer >= size`.
pub fn classify(size: usize, face: Face, layer: usize) -> GeometryResult<(Axis, Plane)> {
    if size == 0 {
        return Err(GeometryError::InvalidSize(size));
    }
    if layer >= size {
        return Err(GeometryError::LayerOutOfRange { layer, size });
    }
    let plane = if face.is_primary() {
        layer
    } else {
        size - 1 - layer
    };
    Ok((face.axis(), plane))
}

/// A validated rotation: which face is turned, how deep, and where it lands.
///
/// Immutable once built; `axis` and `plane` are derived from the other two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RotationRequest {
    face: Face,
    layer: usize,
    axis: Axis,
    plane: Plane,
}

impl RotationRequest {
    /// Builds a request for a cube of the given size.
    ///
    /// # Errors
    ///
    /// Same as [`classify`].
    pub fn new(size: usize, face: Face, layer: usize) -> GeometryResult<Self> {
        let (axis, plane) = classify(size, face, layer)?;
        Ok(Self {
            face,
            layer,
            axis,
            plane,
        })
    }

    /// Builds a request from a numeric face index.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidFace`] plus everything [`classify`] rejects.
    pub fn from_indices(size: usize, face: usize, layer: usize) -> GeometryResult<Self> {
        Self::new(size, Face::from_index(face)?, layer)
    }

    /// The same ring turned from the opposite face. Applying a request and
    /// its antagonist leaves the cube unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`classify`].
    pub fn antagonist(&self, size: usize) -> GeometryResult<Self> {
        if self.layer >= size {
            return Err(GeometryError::LayerOutOfRange {
                layer: self.layer,
                size,
            });
        }
        Self::new(size, self.face.opposite(), size - 1 - self.layer)
    }

    /// The face being turned.
    #[inline]
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }

    /// Depth of the turned layer, counted from `face`.
    #[inline]
    #[must_use]
    pub const fn layer(&self) -> usize {
        self.layer
    }

    /// Rotation axis.
    #[inline]
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Canonical plane on `axis`.
    #[inline]
    #[must_use]
    pub const fn plane(&self) -> Plane {
        self.plane
    }

    /// Whether both requests may hold the cube at the same time.
    #[must_use]
    pub fn is_parallel_with(&self, other: &Self) -> bool {
        self.axis == other.axis && self.plane != other.plane
    }
}
