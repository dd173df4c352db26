//! Calendar-plus-clock offsets between milestone dates

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::{eastern_local, EASTERN};

/// Delta applied to a target date to produce an expected value.
///
/// Days move along the Eastern calendar and keep the wall-clock time; the
/// remaining components are elapsed time added afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOffset {
    /// Calendar days
    pub days: i64,
    /// Elapsed hours
    pub hours: i64,
    /// Elapsed minutes
    pub minutes: i64,
    /// Elapsed seconds
    pub seconds: i64,
    /// Elapsed milliseconds
    pub milliseconds: i64,
}

impl DateOffset {
    /// Offset of whole calendar days
    #[must_use]
    pub const fn days(days: i64) -> Self {
        Self {
            days,
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
        }
    }

    /// Set hours
    #[inline]
    #[must_use]
    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    /// Set minutes
    #[inline]
    #[must_use]
    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    /// Set seconds
    #[inline]
    #[must_use]
    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    /// Set milliseconds
    #[inline]
    #[must_use]
    pub const fn with_milliseconds(mut self, milliseconds: i64) -> Self {
        self.milliseconds = milliseconds;
        self
    }

    /// `days` calendar days later, at 23:59:59.999 of the same wall-clock day
    /// when `target` is an Eastern midnight.
    #[must_use]
    pub const fn days_to_end_of_day(days: i64) -> Self {
        Self::days(days)
            .with_hours(23)
            .with_minutes(59)
            .with_seconds(59)
            .with_milliseconds(999)
    }

    /// Apply to `target`. `None` if the result leaves the representable range.
    #[must_use]
    pub fn apply(&self, target: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let wall_clock = target.with_timezone(&EASTERN).naive_local();
        let shifted = wall_clock.checked_add_signed(TimeDelta::try_days(self.days)?)?;
        let clock = TimeDelta::try_hours(self.hours)?
            .checked_add(&TimeDelta::try_minutes(self.minutes)?)?
            .checked_add(&TimeDelta::try_seconds(self.seconds)?)?
            .checked_add(&TimeDelta::try_milliseconds(self.milliseconds)?)?;
        eastern_local(shifted).checked_add_signed(clock)
    }
}

impl fmt::Display for DateOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, {} seconds, and {} milliseconds",
            self.days, self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_days_then_clock() {
        let offset = DateOffset::days(13)
            .with_hours(11)
            .with_minutes(12)
            .with_seconds(13)
            .with_milliseconds(145);
        assert_eq!(
            offset.apply(utc("2025-01-01T00:00:00Z")),
            Some(utc("2025-01-14T11:12:13.145Z"))
        );
    }

    #[test]
    fn test_days_keep_wall_clock_across_spring_forward() {
        // Mar 1 midnight EST + 15 days = Mar 16 midnight EDT
        assert_eq!(
            DateOffset::days(15).apply(utc("2025-03-01T05:00:00Z")),
            Some(utc("2025-03-16T04:00:00Z"))
        );
        assert_eq!(
            DateOffset::days_to_end_of_day(15).apply(utc("2025-03-01T05:00:00Z")),
            Some(utc("2025-03-17T03:59:59.999Z"))
        );
    }

    #[test]
    fn test_days_keep_wall_clock_across_fall_back() {
        // Oct 20 midnight EDT + 30 days = Nov 19 midnight EST
        assert_eq!(
            DateOffset::days(30).apply(utc("2025-10-20T04:00:00Z")),
            Some(utc("2025-11-19T05:00:00Z"))
        );
    }

    #[test]
    fn test_negative_offsets() {
        assert_eq!(
            DateOffset::days(-1).apply(utc("2025-03-10T04:00:00Z")),
            Some(utc("2025-03-09T05:00:00Z"))
        );
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let target = utc("2025-05-05T17:45:00.250Z");
        assert_eq!(DateOffset::default().apply(target), Some(target));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(DateOffset::days(i64::MAX).apply(utc("2025-01-01T00:00:00Z")), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DateOffset::days_to_end_of_day(15).to_string(),
            "15 days, 23 hours, 59 minutes, 59 seconds, and 999 milliseconds"
        );
    }
}
