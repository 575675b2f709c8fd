//! # CONCUBE Shared
//!
//! Geometry vocabulary for the concurrent cube.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER grow locks, threads or cell storage. It answers one
//! question for the coordinator: *which ring does this rotation move?*
//!
//! ```rust
//! use concube_shared::{classify, Axis, Face};
//!
//! // Top layer 0 and Bottom layer 2 are the same physical ring on a 3-cube.
//! assert_eq!(classify(3, Face::Top, 0).unwrap(), (Axis::TopBottom, 0));
//! assert_eq!(classify(3, Face::Bottom, 2).unwrap(), (Axis::TopBottom, 0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod face;
pub mod geometry;

pub use error::{GeometryError, GeometryResult};
pub use face::{Axis, Color, Face, AXIS_COUNT, COLOR_COUNT, FACE_COUNT};
pub use geometry::{classify, Plane, RotationRequest};
