//! # Cube Configuration
//!
//! Loaded once at startup, usually from a small TOML document:
//!
//! ```toml
//! size = 5
//! wait_timeout_ms = 250
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CubeError, CubeResult};

/// Construction parameters for a [`Cube`](crate::Cube).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeConfig {
    /// Number of layers along every axis.
    pub size: usize,
    /// Longest a caller may wait for admission. `None` waits forever.
    #[serde(default)]
    pub wait_timeout_ms: Option<u64>,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 3,
            wait_timeout_ms: None,
        }
    }
}

impl CubeConfig {
    /// Config for a cube of `size` that waits forever.
    #[must_use]
    pub const fn with_size(size: usize) -> Self {
        Self {
            size,
            wait_timeout_ms: None,
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`CubeError::InvalidConfig`] on malformed TOML, unknown keys or
    /// values that fail [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> CubeResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CubeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`CubeError::InvalidConfig`] for a zero size or a zero timeout.
    pub fn validate(&self) -> CubeResult<()> {
        if self.size == 0 {
            return Err(CubeError::InvalidConfig("size must be at least 1".into()));
        }
        if self.wait_timeout_ms == Some(0) {
            return Err(CubeError::InvalidConfig(
                "wait_timeout_ms must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// The wait timeout as a [`Duration`].
    #[must_use]
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }
}
