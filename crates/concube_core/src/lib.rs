//! # CONCUBE Core
//!
//! A Rubik's-style cube that many threads rotate and inspect at once.
//!
//! ## Architecture Rules
//!
//! 1. **Rotations are writers, snapshots are readers** - never both at once
//! 2. **Axis groups** - rotations on one axis and distinct planes run in parallel
//! 3. **Bookkeeping only under the lock** - hooks and grid access run outside it
//!
//! ## Example
//!
//! ```rust
//! use std::thread;
//! use concube_core::{Color, Cube, Face};
//!
//! let cube = Cube::new(3).unwrap();
//! thread::scope(|s| {
//!     for layer in 0..3 {
//!         let cube = &cube;
//!         s.spawn(move || cube.rotate(Face::Top, layer).unwrap());
//!     }
//! });
//!
//! // Turning every layer of one axis turns the whole cube.
//! let snapshot = cube.snapshot().unwrap();
//! assert!(snapshot.is_legal());
//! assert!(snapshot.face(Face::Left).iter().all(|&c| c == Color::Red));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod cube;
pub mod error;
pub mod grid;
pub mod hooks;
pub mod sync;

pub use concube_shared::{classify, Axis, Color, Face, GeometryError, Plane, RotationRequest};
pub use config::CubeConfig;
pub use cube::Cube;
pub use error::{CubeError, CubeResult};
pub use grid::{Grid, Snapshot};
pub use hooks::{Hooks, RotationHook, ShowHook};
pub use sync::{CancelToken, Coordinator, CoordinatorStats, ReadAccess, WriteAccess};
