//! DEMOS configuration
//!
//! Loaded from TOML. Every field has a default, so an absent file or an
//! absent table means "use defaults".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Mutation validation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject changes to dates owned by Completed or Skipped phases
    pub enforce_finished_phase_lock: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_finished_phase_lock: true,
        }
    }
}

/// DEMOS configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemosConfig {
    /// Logging
    pub logging: LoggingConfig,
    /// Validation
    pub validation: ValidationConfig,
}

impl DemosConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }

    /// Enable or disable JSON logs
    #[inline]
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.logging.json = json;
        self
    }

    /// Enable or disable the finished-phase lock
    #[inline]
    #[must_use]
    pub fn with_finished_phase_lock(mut self, enforce: bool) -> Self {
        self.validation.enforce_finished_phase_lock = enforce;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Parse`]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Read`] or [`ConfigurationError::Parse`]
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigurationError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
