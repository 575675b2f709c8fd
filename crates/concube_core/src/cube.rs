//! # Cube Facade
//!
//! Ties the grid, the coordinator and the hooks together.
//!
//! ```text
//!   rotate(face, layer)                      show()
//!     │ validate (no lock)                     │
//!     ▼                                        ▼
//!   Coordinator::write ── WriteAccess        Coordinator::read ── ReadAccess
//!     │ before_rotation                        │ before_show
//!     │ Grid::apply                            │ Grid::snapshot
//!     │ after_rotation                         │ after_show
//!     ▼ drop(access)                           ▼ drop(access)
//! ```

use concube_shared::{Face, RotationRequest};
use tracing::debug;

use crate::config::CubeConfig;
use crate::error::CubeResult;
use crate::grid::{Grid, Snapshot};
use crate::hooks::Hooks;
use crate::sync::{CancelToken, Coordinator, CoordinatorStats};

/// A concurrent `size × size × size` cube.
///
/// `&Cube` is shared between threads; every operation takes `&self` except
/// [`solve`](Self::solve).
///
/// ```
/// use concube_core::{Cube, Face};
///
/// let cube = Cube::new(3).unwrap();
/// cube.rotate(Face::Top, 0).unwrap();
/// assert_eq!(
///     cube.show().unwrap(),
///     "000000000222111111333222222444333333111444444555555555"
/// );
/// ```
#[derive(Debug)]
pub struct Cube {
    grid: Grid,
    coordinator: Coordinator,
    hooks: Hooks,
}

impl Cube {
    /// Creates a solved cube without hooks.
    ///
    /// # Errors
    ///
    /// [`CubeError::Geometry`](crate::CubeError::Geometry) when `size` is zero.
    pub fn new(size: usize) -> CubeResult<Self> {
        Self::with_hooks(size, Hooks::default())
    }

    /// Creates a solved cube that runs `hooks` around every operation.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_hooks(size: usize, hooks: Hooks) -> CubeResult<Self> {
        Self::from_config(&CubeConfig::with_size(size), hooks)
    }

    /// Creates a solved cube from a loaded configuration.
    ///
    /// # Errors
    ///
    /// [`CubeError::Geometry`](crate::CubeError::Geometry) for a zero size,
    /// [`CubeError::InvalidConfig`](crate::CubeError::InvalidConfig) for other
    /// rejected values.
    pub fn from_config(config: &CubeConfig, hooks: Hooks) -> CubeResult<Self> {
        let grid = Grid::new(config.size)?;
        config.validate()?;
        debug!(size = config.size, timeout = ?config.wait_timeout(), "cube created");
        Ok(Self {
            grid,
            coordinator: Coordinator::new(config.size, config.wait_timeout()),
            hooks,
        })
    }

    /// Number of layers along every axis.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.grid.size()
    }

    /// Turns `layer` (counted from `face`) a quarter turn clockwise as seen
    /// from `face`. Blocks until the coordinator admits it.
    ///
    /// # Errors
    ///
    /// - [`CubeError::Geometry`](crate::CubeError::Geometry) for a layer
    ///   outside `0..size`, before anything waits.
    /// - [`CubeError::TimedOut`](crate::CubeError::TimedOut) if a wait timeout
    ///   is configured and elapses.
    pub fn rotate(&self, face: Face, layer: usize) -> CubeResult<()> {
        let request = RotationRequest::new(self.size(), face, layer)?;
        self.run_rotation(&request, None)
    }

    /// [`rotate`](Self::rotate) that gives up with
    /// [`CubeError::Cancelled`](crate::CubeError::Cancelled) if `cancel`
    /// fires before admission.
    ///
    /// # Errors
    ///
    /// Same as [`rotate`](Self::rotate), plus cancellation.
    pub fn rotate_with(&self, face: Face, layer: usize, cancel: &CancelToken) -> CubeResult<()> {
        let request = RotationRequest::new(self.size(), face, layer)?;
        self.run_rotation(&request, Some(cancel))
    }

    /// [`rotate`](Self::rotate) with the face given as its index
    /// (Top 0, Left 1, Front 2, Right 3, Back 4, Bottom 5).
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidFace`](concube_shared::GeometryError::InvalidFace)
    /// for `side >= 6`, otherwise as [`rotate`](Self::rotate).
    pub fn rotate_index(&self, side: usize, layer: usize) -> CubeResult<()> {
        let request = RotationRequest::from_indices(self.size(), side, layer)?;
        self.run_rotation(&request, None)
    }

    /// Renders the cube as `6 * size²` digits, faces in index order, each
    /// face row-major.
    ///
    /// # Errors
    ///
    /// [`CubeError::TimedOut`](crate::CubeError::TimedOut) if a wait timeout
    /// is configured and elapses.
    pub fn show(&self) -> CubeResult<String> {
        Ok(self.read_snapshot(None)?.to_string())
    }

    /// [`show`](Self::show) that can be cancelled while waiting.
    ///
    /// # Errors
    ///
    /// Same as [`show`](Self::show), plus
    /// [`CubeError::Cancelled`](crate::CubeError::Cancelled).
    pub fn show_with(&self, cancel: &CancelToken) -> CubeResult<String> {
        Ok(self.read_snapshot(Some(cancel))?.to_string())
    }

    /// Like [`show`](Self::show) but returns the structured copy.
    ///
    /// # Errors
    ///
    /// Same as [`show`](Self::show).
    pub fn snapshot(&self) -> CubeResult<Snapshot> {
        self.read_snapshot(None)
    }

    /// Resets to the solved arrangement. Requires exclusive access, so no
    /// operation can be in flight.
    pub fn solve(&mut self) {
        self.grid.solve();
        debug!(size = self.size(), "cube solved");
    }

    /// Current coordinator bookkeeping.
    #[must_use]
    pub fn coordinator_stats(&self) -> CoordinatorStats {
        self.coordinator.stats()
    }

    fn run_rotation(
        &self,
        request: &RotationRequest,
        cancel: Option<&CancelToken>,
    ) -> CubeResult<()> {
        let _access = self.coordinator.write(request, cancel)?;
        self.hooks.on_before_rotation(request.face(), request.layer());
        self.grid.apply(request)?;
        self.hooks.on_after_rotation(request.face(), request.layer());
        Ok(())
    }

    fn read_snapshot(&self, cancel: Option<&CancelToken>) -> CubeResult<Snapshot> {
        let _access = self.coordinator.read(cancel)?;
        self.hooks.on_before_show();
        let snapshot = self.grid.snapshot();
        self.hooks.on_after_show();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CubeError;
    use concube_shared::GeometryError;

    #[test]
    fn test_rejects_bad_arguments_without_waiting() {
        let cube = Cube::new(3).unwrap();
        assert_eq!(
            cube.rotate(Face::Top, 3),
            Err(CubeError::Geometry(GeometryError::LayerOutOfRange {
                layer: 3,
                size: 3
            }))
        );
        assert_eq!(
            cube.rotate_index(6, 0),
            Err(CubeError::Geometry(GeometryError::InvalidFace(6)))
        );
        assert!(cube.coordinator_stats().is_quiescent());
        assert!(cube.snapshot().unwrap().is_solved());
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert_eq!(
            Cube::new(0).unwrap_err(),
            CubeError::Geometry(GeometryError::InvalidSize(0))
        );
    }

    #[test]
    fn test_rotate_index_matches_rotate() {
        let by_face = Cube::new(3).unwrap();
        let by_index = Cube::new(3).unwrap();
        by_face.rotate(Face::Right, 1).unwrap();
        by_index.rotate_index(3, 1).unwrap();
        assert_eq!(by_face.show().unwrap(), by_index.show().unwrap());
    }

    #[test]
    fn test_solve_after_rotations() {
        let mut cube = Cube::new(4).unwrap();
        cube.rotate(Face::Front, 2).unwrap();
        cube.rotate(Face::Left, 0).unwrap();
        assert!(!cube.snapshot().unwrap().is_solved());
        cube.solve();
        assert!(cube.snapshot().unwrap().is_solved());
    }

    #[test]
    fn test_config_timeout_reaches_coordinator() {
        let config = CubeConfig::from_toml_str("size = 2\nwait_timeout_ms = 40").unwrap();
        let cube = Cube::from_config(&config, Hooks::default()).unwrap();
        assert_eq!(cube.size(), 2);
        assert_eq!(cube.coordinator.wait_timeout(), config.wait_timeout());
    }
}
