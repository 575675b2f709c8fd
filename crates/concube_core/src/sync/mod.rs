//! # Reader/Writer Coordination for the Cube
//!
//! ## The Problem
//!
//! ```text
//! rotate(Top, 0)   and rotate(Top, 2)    touch disjoint cells   → may overlap
//! rotate(Top, 0)   and rotate(Left, 1)   share edge cells       → must not
//! show()           and any rotation                             → must not
//! ```
//!
//! ## The Solution: Axis Groups
//!
//! ```text
//!   ... ─> [readers] ─> [TopBottom group] ─> [readers] ─> [LeftRight group] ─> ...
//!                         planes 0 | 1 | 2                  planes 0 | 1 | 2
//! ```
//!
//! Readers and writer groups alternate. Writer groups take turns by axis.
//! Inside a group every plane runs in parallel.

mod cancel;
mod coordinator;

pub use cancel::CancelToken;
pub use coordinator::{Coordinator, CoordinatorStats, ReadAccess, WriteAccess};
