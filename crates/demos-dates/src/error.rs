//! Date validation errors
//!
//! - `ValidationError`: a supplied date broke a rule; the caller can fix it
//! - `ResolveError`: the target-date read itself failed
//! - `CheckError`: either of the above, as returned by the async checks

use chrono::{DateTime, SecondsFormat, Utc};
use demos_model::DateType;

use crate::offset::DateOffset;

fn iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A date failed a boundary, ordering or offset rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Not 00:00:00.000 Eastern
    #[error(
        "The input {date_type} must be a start of day date (midnight in Eastern time), but it is {}",
        iso(.value)
    )]
    NotStartOfDay {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
    },

    /// Not 23:59:59.999 Eastern
    #[error(
        "The input {date_type} must be an end of day date (11:59:59.999 in Eastern time), but it is {}",
        iso(.value)
    )]
    NotEndOfDay {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
    },

    /// Not strictly after the target
    #[error(
        "The input {date_type} has value {}, but it must be greater than {target_type}, which has value {}.",
        iso(.value),
        iso(.target_value)
    )]
    NotGreaterThan {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
        /// Date type compared against
        target_type: DateType,
        /// Its recorded value
        target_value: DateTime<Utc>,
    },

    /// Before the target
    #[error(
        "The input {date_type} has value {}, but it must be greater than or equal to {target_type}, which has value {}.",
        iso(.value),
        iso(.target_value)
    )]
    NotGreaterThanOrEqual {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
        /// Date type compared against
        target_type: DateType,
        /// Its recorded value
        target_value: DateTime<Utc>,
    },

    /// Not exactly target + offset
    #[error(
        "The input {date_type} must be equal to {target_type} + {offset}, which is {}. The value provided was {}.",
        iso(.expected),
        iso(.value)
    )]
    OffsetMismatch {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
        /// Date type the offset is measured from
        target_type: DateType,
        /// Required offset
        offset: DateOffset,
        /// target + offset
        expected: DateTime<Utc>,
    },

    /// target + offset is not a representable instant
    #[error("The input {date_type} cannot be compared to {target_type} + {offset}: the result is out of range.")]
    OffsetOutOfRange {
        /// Offending date type
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
        /// Date type the offset is measured from
        target_type: DateType,
        /// Required offset
        offset: DateOffset,
    },

    /// The target has no recorded value
    #[error(
        "The date {target_type} was requested as part of a validation of {date_type}, but is undefined. \
         It must either be in the database, or part of the set of dates being changed."
    )]
    MissingTarget {
        /// Date type being validated
        date_type: DateType,
        /// Offending value
        value: DateTime<Utc>,
        /// Date type with no value
        target_type: DateType,
    },
}

impl ValidationError {
    /// Date type the failure is attributed to
    #[must_use]
    pub const fn date_type(&self) -> DateType {
        match self {
            Self::NotStartOfDay { date_type, .. }
            | Self::NotEndOfDay { date_type, .. }
            | Self::NotGreaterThan { date_type, .. }
            | Self::NotGreaterThanOrEqual { date_type, .. }
            | Self::OffsetMismatch { date_type, .. }
            | Self::OffsetOutOfRange { date_type, .. }
            | Self::MissingTarget { date_type, .. } => *date_type,
        }
    }

    /// Value that was rejected
    #[must_use]
    pub const fn value(&self) -> DateTime<Utc> {
        match self {
            Self::NotStartOfDay { value, .. }
            | Self::NotEndOfDay { value, .. }
            | Self::NotGreaterThan { value, .. }
            | Self::NotGreaterThanOrEqual { value, .. }
            | Self::OffsetMismatch { value, .. }
            | Self::OffsetOutOfRange { value, .. }
            | Self::MissingTarget { value, .. } => *value,
        }
    }
}

/// The target-date read failed.
#[derive(Debug, thiserror::Error)]
#[error("target date lookup failed: {source}")]
pub struct ResolveError {
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ResolveError {
    /// Wrap the underlying failure
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Underlying failure, for downcasting
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Outcome of a failed check
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Rule violated
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Target read failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl CheckError {
    /// The validation failure, if that is what this is
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Resolve(_) => None,
        }
    }
}
