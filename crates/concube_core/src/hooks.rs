//! Actuation callbacks.
//!
//! A physical actuator would run these around each grid access. Every hook is
//! called outside the coordinator lock, exactly once per completed operation:
//! `before_*` strictly before the grid is touched, `after_*` strictly after.

use std::fmt;
use std::sync::Arc;

use concube_shared::Face;

/// Callback receiving the face and layer of a rotation.
pub type RotationHook = Arc<dyn Fn(Face, usize) + Send + Sync>;

/// Callback around a snapshot.
pub type ShowHook = Arc<dyn Fn() + Send + Sync>;

/// The four optional hooks of a [`Cube`](crate::Cube). Unset slots do nothing.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use concube_core::{Cube, Face, Hooks};
///
/// let turns = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&turns);
/// let hooks = Hooks::new().after_rotation(move |_, _| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// let cube = Cube::with_hooks(3, hooks).unwrap();
/// cube.rotate(Face::Front, 1).unwrap();
/// assert_eq!(turns.load(Ordering::Relaxed), 1);
/// ```
#[derive(Clone, Default)]
pub struct Hooks {
    before_rotation: Option<RotationHook>,
    after_rotation: Option<RotationHook>,
    before_show: Option<ShowHook>,
    after_show: Option<ShowHook>,
}

impl Hooks {
    /// No hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs before a rotation touches the grid.
    #[must_use]
    pub fn before_rotation(mut self, hook: impl Fn(Face, usize) + Send + Sync + 'static) -> Self {
        self.before_rotation = Some(Arc::new(hook));
        self
    }

    /// Runs after a rotation has finished with the grid.
    #[must_use]
    pub fn after_rotation(mut self, hook: impl Fn(Face, usize) + Send + Sync + 'static) -> Self {
        self.after_rotation = Some(Arc::new(hook));
        self
    }

    /// Runs before a snapshot reads the grid.
    #[must_use]
    pub fn before_show(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.before_show = Some(Arc::new(hook));
        self
    }

    /// Runs after a snapshot has read the grid.
    #[must_use]
    pub fn after_show(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.after_show = Some(Arc::new(hook));
        self
    }

    pub(crate) fn on_before_rotation(&self, face: Face, layer: usize) {
        if let Some(hook) = &self.before_rotation {
            hook(face, layer);
        }
    }

    pub(crate) fn on_after_rotation(&self, face: Face, layer: usize) {
        if let Some(hook) = &self.after_rotation {
            hook(face, layer);
        }
    }

    pub(crate) fn on_before_show(&self) {
        if let Some(hook) = &self.before_show {
            hook();
        }
    }

    pub(crate) fn on_after_show(&self) {
        if let Some(hook) = &self.after_show {
            hook();
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_rotation", &self.before_rotation.is_some())
            .field("after_rotation", &self.after_rotation.is_some())
            .field("before_show", &self.before_show.is_some())
            .field("after_show", &self.after_show.is_some())
            .finish()
    }
}
