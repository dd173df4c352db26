//! Single-date checks
//!
//! Boundary checks are pure. Ordering and offset checks resolve their
//! target through a [`TargetDateResolver`], one read per call. Every check
//! returns `Ok(())` or the typed failure; none return booleans.

use chrono::{DateTime, Utc};
use demos_model::{ApplicationDate, ApplicationId, DateType, ExpectedTimestamp};

use crate::clock::{tz_date_parts, TzDateParts};
use crate::error::{CheckError, ValidationError};
use crate::offset::DateOffset;
use crate::resolver::TargetDateResolver;

/// A date under validation, already resolved to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDate {
    /// Milestone
    pub date_type: DateType,
    /// Proposed value
    pub date_value: DateTime<Utc>,
}

impl InputDate {
    /// Create new input date
    #[must_use]
    pub const fn new(date_type: DateType, date_value: DateTime<Utc>) -> Self {
        Self {
            date_type,
            date_value,
        }
    }

    /// Set value of a resolved date, `None` when it is cleared
    #[must_use]
    pub fn from_application_date(date: &ApplicationDate) -> Option<Self> {
        date.date_value.map(|value| Self::new(date.date_type, value))
    }
}

/// The date an input is compared against.
#[derive(Debug, Clone, Copy)]
pub struct TargetDate<'a> {
    /// Application owning the target
    pub application_id: &'a ApplicationId,
    /// Date type of the target
    pub date_type: DateType,
}

impl<'a> TargetDate<'a> {
    /// Create new target
    #[must_use]
    pub const fn new(application_id: &'a ApplicationId, date_type: DateType) -> Self {
        Self {
            application_id,
            date_type,
        }
    }
}

/// Fails unless `input` is exactly 00:00:00.000 Eastern.
///
/// # Errors
///
/// [`ValidationError::NotStartOfDay`]
pub fn check_input_date_is_start_of_day(input: &InputDate) -> Result<(), ValidationError> {
    if tz_date_parts(input.date_value) == TzDateParts::START_OF_DAY {
        Ok(())
    } else {
        Err(ValidationError::NotStartOfDay {
            date_type: input.date_type,
            value: input.date_value,
        })
    }
}

/// Fails unless `input` is exactly 23:59:59.999 Eastern.
///
/// # Errors
///
/// [`ValidationError::NotEndOfDay`]
pub fn check_input_date_is_end_of_day(input: &InputDate) -> Result<(), ValidationError> {
    if tz_date_parts(input.date_value) == TzDateParts::END_OF_DAY {
        Ok(())
    } else {
        Err(ValidationError::NotEndOfDay {
            date_type: input.date_type,
            value: input.date_value,
        })
    }
}

/// Boundary check for the input's own date type.
///
/// # Errors
///
/// As [`check_input_date_is_start_of_day`] or [`check_input_date_is_end_of_day`].
pub fn check_input_date_expected_timestamp(input: &InputDate) -> Result<(), ValidationError> {
    match input.date_type.expected_timestamp() {
        ExpectedTimestamp::StartOfDay => check_input_date_is_start_of_day(input),
        ExpectedTimestamp::EndOfDay => check_input_date_is_end_of_day(input),
    }
}

async fn resolve_target<R>(
    resolver: &R,
    input: &InputDate,
    target: TargetDate<'_>,
) -> Result<DateTime<Utc>, CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    resolver
        .target_date_value(target.application_id, target.date_type)
        .await?
        .ok_or_else(|| {
            CheckError::from(ValidationError::MissingTarget {
                date_type: input.date_type,
                value: input.date_value,
                target_type: target.date_type,
            })
        })
}

/// Fails unless `input` is strictly after the target's recorded value.
///
/// # Errors
///
/// [`ValidationError::NotGreaterThan`], [`ValidationError::MissingTarget`],
/// or the resolver's failure.
pub async fn check_input_date_greater_than<R>(
    resolver: &R,
    input: &InputDate,
    target: TargetDate<'_>,
) -> Result<(), CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    let target_value = resolve_target(resolver, input, target).await?;
    if input.date_value > target_value {
        return Ok(());
    }
    Err(ValidationError::NotGreaterThan {
        date_type: input.date_type,
        value: input.date_value,
        target_type: target.date_type,
        target_value,
    }
    .into())
}

/// Fails if `input` is before the target's recorded value.
///
/// # Errors
///
/// [`ValidationError::NotGreaterThanOrEqual`], [`ValidationError::MissingTarget`],
/// or the resolver's failure.
pub async fn check_input_date_greater_than_or_equal<R>(
    resolver: &R,
    input: &InputDate,
    target: TargetDate<'_>,
) -> Result<(), CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    let target_value = resolve_target(resolver, input, target).await?;
    if input.date_value >= target_value {
        return Ok(());
    }
    Err(ValidationError::NotGreaterThanOrEqual {
        date_type: input.date_type,
        value: input.date_value,
        target_type: target.date_type,
        target_value,
    }
    .into())
}

/// Fails unless `input` equals the target's recorded value plus `offset`,
/// to the millisecond.
///
/// # Errors
///
/// [`ValidationError::OffsetMismatch`], [`ValidationError::OffsetOutOfRange`],
/// [`ValidationError::MissingTarget`], or the resolver's failure.
pub async fn check_input_date_meets_offset<R>(
    resolver: &R,
    input: &InputDate,
    target: TargetDate<'_>,
    offset: &DateOffset,
) -> Result<(), CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    let target_value = resolve_target(resolver, input, target).await?;
    let Some(expected) = offset.apply(target_value) else {
        return Err(ValidationError::OffsetOutOfRange {
            date_type: input.date_type,
            value: input.date_value,
            target_type: target.date_type,
            offset: *offset,
        }
        .into());
    };
    if input.date_value == expected {
        return Ok(());
    }
    Err(ValidationError::OffsetMismatch {
        date_type: input.date_type,
        value: input.date_value,
        target_type: target.date_type,
        offset: *offset,
        expected,
    }
    .into())
}
