//! Toolbar configuration
//!
//! [`ControlsConfig`] is read from TOML; every section falls back to its
//! defaults when omitted:
//!
//! ```toml
//! debounce_ms = 150
//!
//! [zoom]
//! initial = 0.65
//! transition_ms = 800
//!
//! [lineage]
//! upstream_depth = 3
//! downstream_depth = 3
//! nodes_per_layer = 50
//! ```

use crate::error::ConfigError;
use crate::zoom::{MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Quiet window for viewport zoom updates
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;
/// Zoom level before the first viewport event
pub const DEFAULT_ZOOM: f64 = 0.65;
/// Duration of animated zoom and centering
pub const ZOOM_TRANSITION_MS: u64 = 800;
/// Deepest upstream/downstream traversal
pub const MAX_DEPTH: u32 = 10;
/// Fewest nodes rendered per layer
pub const MIN_NODES_PER_LAYER: u32 = 5;

/// Lineage traversal settings edited in the config dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Upstream levels to fetch
    pub upstream_depth: u32,
    /// Downstream levels to fetch
    pub downstream_depth: u32,
    /// Nodes shown per layer before paging
    pub nodes_per_layer: u32,
}

impl LineageConfig {
    /// Check ranges
    ///
    /// # Errors
    /// [`ConfigError::OutOfRange`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth_range = 1..=MAX_DEPTH;
        if !depth_range.contains(&self.upstream_depth) {
            return Err(ConfigError::out_of_range(
                "upstream_depth",
                self.upstream_depth,
                format!("1..={MAX_DEPTH}"),
            ));
        }
        if !depth_range.contains(&self.downstream_depth) {
            return Err(ConfigError::out_of_range(
                "downstream_depth",
                self.downstream_depth,
                format!("1..={MAX_DEPTH}"),
            ));
        }
        if self.nodes_per_layer < MIN_NODES_PER_LAYER {
            return Err(ConfigError::out_of_range(
                "nodes_per_layer",
                self.nodes_per_layer,
                format!(">= {MIN_NODES_PER_LAYER}"),
            ));
        }
        Ok(())
    }
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            upstream_depth: 3,
            downstream_depth: 3,
            nodes_per_layer: 50,
        }
    }
}

/// Zoom settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Initial zoom level
    pub initial: f64,
    /// Animation duration for zoom and centering
    pub transition_ms: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: DEFAULT_ZOOM,
            transition_ms: ZOOM_TRANSITION_MS,
        }
    }
}

/// Full toolbar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Viewport zoom debounce window in milliseconds
    pub debounce_ms: u64,
    /// Zoom settings
    pub zoom: ZoomConfig,
    /// Lineage traversal settings
    pub lineage: LineageConfig,
}

impl ControlsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With lineage settings
    #[inline]
    #[must_use]
    pub fn with_lineage(mut self, lineage: LineageConfig) -> Self {
        self.lineage = lineage;
        self
    }

    /// With initial zoom
    #[inline]
    #[must_use]
    pub fn with_initial_zoom(mut self, zoom: f64) -> Self {
        self.zoom.initial = zoom;
        self
    }

    /// Debounce window as a duration
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate all sections
    ///
    /// # Errors
    /// [`ConfigError::OutOfRange`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::out_of_range("debounce_ms", 0, "> 0"));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom.initial) {
            return Err(ConfigError::out_of_range(
                "zoom.initial",
                self.zoom.initial,
                format!("{MIN_ZOOM}..={MAX_ZOOM}"),
            ));
        }
        self.lineage.validate()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// [`ConfigError::Toml`] on malformed input, or a validation error.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`ControlsConfig::from_toml_str`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded controls config from {}", path.display());
        Ok(config)
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            zoom: ZoomConfig::default(),
            lineage: LineageConfig::default(),
        }
    }
}
