//! Error types for DEMOS Core
//!
//! Three classes of failure:
//! - Validation: the caller supplied a date that breaks a rule
//! - Configuration: reference data or config files are wrong
//! - Dependency: the store or a target-date read failed

use std::fmt;
use std::path::PathBuf;

use demos_dates::{CheckError, ResolveError, ValidationError};
use demos_model::{DateType, PhaseId};
use demos_store::StoreError;

/// Main DEMOS error type
#[derive(Debug, thiserror::Error)]
pub enum DemosError {
    /// A date failed its rules
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Dates owned by Completed or Skipped phases cannot change
    #[error(
        "Cannot modify dates because they are associated with finished phases: {}.",
        join_locked(.locked)
    )]
    FinishedPhaseLock {
        /// Every offending date/phase pair, in table order
        locked: Vec<LockedDate>,
    },

    /// Reference data or configuration is wrong
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Target-date read failure
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl DemosError {
    /// Caller can recover by correcting input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::FinishedPhaseLock { .. })
    }

    /// Reference data or config bug; the batch must abort
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Collaborator failure, propagated as-is
    #[inline]
    #[must_use]
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Resolve(_))
    }
}

impl From<CheckError> for DemosError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Invalid(err) => Self::Validation(err),
            CheckError::Resolve(err) => Self::Resolve(err),
        }
    }
}

/// Configuration failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A date type has no owning phase in the ordered table
    #[error("No phase found for date type {0}")]
    UnmappedDateType(DateType),

    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// IO failure
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `DemosConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Tracing subscriber could not be installed
    #[error("failed to initialize tracing: {0}")]
    Telemetry(String),
}

/// A date type owned by a finished phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedDate {
    /// Date type being changed
    pub date_type: DateType,
    /// Finished phase owning it
    pub phase: PhaseId,
}

impl fmt::Display for LockedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} date on {} phase", self.date_type, self.phase)
    }
}

fn join_locked(locked: &[LockedDate]) -> String {
    locked
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
