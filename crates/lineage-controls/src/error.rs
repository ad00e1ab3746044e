//! Error types for the lineage controls
//!
//! Provides error handling for:
//! - Configuration loading and validation
//! - Toolbar actions refused by the current state
//! - Session lifecycle

use lineage_filter::CatalogError;
use std::path::PathBuf;

/// Errors while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value is outside its allowed range
    #[error("{field} out of range: got {value}, allowed {allowed}")]
    OutOfRange {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create out-of-range error
    pub fn out_of_range(
        field: &'static str,
        value: impl ToString,
        allowed: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            allowed: allowed.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from toolbar actions and the session
#[derive(Debug, thiserror::Error)]
pub enum ControlsError {
    /// Edit mode requested without permission
    #[error("edit not permitted: {0}")]
    EditNotPermitted(String),

    /// Lineage config cannot change while editing
    #[error("lineage config is locked while edit mode is on")]
    ConfigLockedInEditMode,

    /// Rejected configuration
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Catalog could not be built
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session loop is no longer running
    #[error("session closed")]
    SessionClosed,
}

impl ControlsError {
    /// Check if the error was caused by the user's action rather than the environment
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EditNotPermitted(_)
                | Self::ConfigLockedInEditMode
                | Self::InvalidConfig(ConfigError::OutOfRange { .. })
        )
    }
}

/// Result type alias for controls operations
pub type ControlsResult<T> = Result<T, ControlsError>;
