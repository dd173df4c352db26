//! Eastern-time clock
//!
//! All day boundaries are computed in `America/New_York` from IANA rules,
//! so EST (UTC-5) and EDT (UTC-4) are both handled without fixed offsets.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use demos_model::{ApplicationDate, ApplicationDateInput, DateValue, ExpectedTimestamp};

/// US Eastern time zone
pub const EASTERN: Tz = chrono_tz::America::New_York;

const END_OF_DAY_MILLIS: i64 = 86_399_999;
const STANDARD_OFFSET_HOURS: i64 = 5;

/// Eastern wall-clock components of an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TzDateParts {
    /// 0..=23
    pub hours: u32,
    /// 0..=59
    pub minutes: u32,
    /// 0..=59
    pub seconds: u32,
    /// 0..=999
    pub milliseconds: u32,
}

impl TzDateParts {
    /// 00:00:00.000
    pub const START_OF_DAY: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// 23:59:59.999
    pub const END_OF_DAY: Self = Self {
        hours: 23,
        minutes: 59,
        seconds: 59,
        milliseconds: 999,
    };
}

/// Decompose `instant` into Eastern hour, minute, second and millisecond.
#[must_use]
pub fn tz_date_parts(instant: DateTime<Utc>) -> TzDateParts {
    let local = instant.with_timezone(&EASTERN);
    TzDateParts {
        hours: local.hour(),
        minutes: local.minute(),
        seconds: local.second(),
        milliseconds: local.timestamp_subsec_millis().min(999),
    }
}

/// Instant of an Eastern wall-clock time.
///
/// Ambiguous times (the repeated hour in November) take the earlier
/// instant. Skipped times (the missing hour in March) are read at the
/// standard-time offset.
#[must_use]
pub fn eastern_local(naive: NaiveDateTime) -> DateTime<Utc> {
    match EASTERN.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&(naive + TimeDelta::hours(STANDARD_OFFSET_HOURS))),
    }
}

/// 00:00:00.000 Eastern on `date`
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    eastern_local(date.and_time(chrono::NaiveTime::MIN))
}

/// 23:59:59.999 Eastern on `date`
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    eastern_local(date.and_time(chrono::NaiveTime::MIN) + TimeDelta::milliseconds(END_OF_DAY_MILLIS))
}

/// Eastern calendar date containing `instant`
#[must_use]
pub fn eastern_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&EASTERN).date_naive()
}

/// Boundary instant of `date` selected by `expected`
#[must_use]
pub fn day_boundary(date: NaiveDate, expected: ExpectedTimestamp) -> DateTime<Utc> {
    match expected {
        ExpectedTimestamp::StartOfDay => start_of_day(date),
        ExpectedTimestamp::EndOfDay => end_of_day(date),
    }
}

/// Resolve a supplied value to an instant. Calendar dates are pinned to
/// the Eastern day boundary `expected`; instants pass through.
#[must_use]
pub fn resolve_date_value(value: DateValue, expected: ExpectedTimestamp) -> DateTime<Utc> {
    match value {
        DateValue::Instant(instant) => instant,
        DateValue::Local(date) => day_boundary(date, expected),
    }
}

/// Resolve an input date using its date type's expected timestamp.
#[must_use]
pub fn parse_application_date(input: &ApplicationDateInput) -> ApplicationDate {
    let expected = input.date_type.expected_timestamp();
    ApplicationDate::new(
        input.date_type,
        input.date_value.map(|value| resolve_date_value(value, expected)),
    )
}

/// An instant known to be expressed for Eastern time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EasternTzDate(DateTime<Utc>);

impl EasternTzDate {
    /// Wrap an instant
    #[inline]
    #[must_use]
    pub const fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The underlying instant
    #[inline]
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Eastern wall-clock view
    #[must_use]
    pub fn local(&self) -> DateTime<Tz> {
        self.0.with_timezone(&EASTERN)
    }
}

impl std::fmt::Display for EasternTzDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.local().to_rfc3339_opts(SecondsFormat::Millis, false))
    }
}

impl Serialize for EasternTzDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tagged = serializer.serialize_struct("EasternTzDate", 2)?;
        tagged.serialize_field("easternTZDate", &self.to_string())?;
        tagged.serialize_field("isEasternTZDate", &true)?;
        tagged.end()
    }
}

/// Eastern day boundaries of "now", computed once per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EasternNow {
    /// 00:00:00.000 Eastern today
    #[serde(rename = "Start of Day")]
    pub start_of_day: EasternTzDate,
    /// 23:59:59.999 Eastern today
    #[serde(rename = "End of Day")]
    pub end_of_day: EasternTzDate,
}

impl EasternNow {
    /// Boundaries of the Eastern day containing `now`
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        let today = eastern_date(now);
        Self {
            start_of_day: EasternTzDate::from_instant(start_of_day(today)),
            end_of_day: EasternTzDate::from_instant(end_of_day(today)),
        }
    }

    /// Boundary selected by `expected`
    #[inline]
    #[must_use]
    pub const fn get(&self, expected: ExpectedTimestamp) -> EasternTzDate {
        match expected {
            ExpectedTimestamp::StartOfDay => self.start_of_day,
            ExpectedTimestamp::EndOfDay => self.end_of_day,
        }
    }
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Eastern day boundaries of the current instant
    fn eastern_now(&self) -> EasternNow {
        EasternNow::at(self.now())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Create clock frozen at `now`
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
