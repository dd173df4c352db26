//! Application identifiers and date records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date_type::DateType;

/// Opaque application identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Create new id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ApplicationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A supplied date: an exact instant, or a calendar date to be pinned to
/// the date type's Eastern day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Exact instant (RFC 3339)
    Instant(DateTime<Utc>),
    /// Calendar date (`YYYY-MM-DD`)
    Local(NaiveDate),
}

impl From<DateTime<Utc>> for DateValue {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Local(date)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(instant) => write!(
                f,
                "{}",
                instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            ),
            Self::Local(date) => write!(f, "{date}"),
        }
    }
}

/// One date in a mutation batch. `None` means "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDateInput {
    /// Milestone being set
    pub date_type: DateType,
    /// New value, or `None` to clear
    #[serde(default)]
    pub date_value: Option<DateValue>,
}

impl ApplicationDateInput {
    /// Date set to `value`
    #[must_use]
    pub fn new(date_type: DateType, value: impl Into<DateValue>) -> Self {
        Self {
            date_type,
            date_value: Some(value.into()),
        }
    }

    /// Date explicitly cleared
    #[must_use]
    pub const fn cleared(date_type: DateType) -> Self {
        Self {
            date_type,
            date_value: None,
        }
    }

    /// Whether a value is present
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.date_value.is_some()
    }
}

/// A date resolved to an exact instant, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDate {
    /// Milestone
    pub date_type: DateType,
    /// Recorded instant, or `None` when cleared
    pub date_value: Option<DateTime<Utc>>,
}

impl ApplicationDate {
    /// Create new resolved date
    #[must_use]
    pub const fn new(date_type: DateType, date_value: Option<DateTime<Utc>>) -> Self {
        Self {
            date_type,
            date_value,
        }
    }
}

impl From<ApplicationDate> for ApplicationDateInput {
    fn from(date: ApplicationDate) -> Self {
        Self {
            date_type: date.date_type,
            date_value: date.date_value.map(DateValue::Instant),
        }
    }
}
