//! Property tests for Eastern day boundaries

use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};
use demos_dates::clock::{eastern_date, end_of_day, start_of_day, tz_date_parts, TzDateParts};
use demos_dates::{check_input_date_is_end_of_day, check_input_date_is_start_of_day, DateOffset, InputDate};
use demos_model::DateType;
use proptest::prelude::*;

const FROM_2000_MS: i64 = 946_684_800_000;
const TO_2040_MS: i64 = 2_208_988_800_000;
const DAYS_2000_TO_2040: u64 = 14_610;

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (FROM_2000_MS..TO_2040_MS).prop_map(|ms| DateTime::from_timestamp_millis(ms).unwrap())
}

fn calendar_day() -> impl Strategy<Value = NaiveDate> {
    (0..DAYS_2000_TO_2040).prop_map(|n| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(n))
}

fn one_unit() -> impl Strategy<Value = TimeDelta> {
    prop_oneof![
        Just(TimeDelta::milliseconds(1)),
        Just(TimeDelta::seconds(1)),
        Just(TimeDelta::minutes(1)),
        Just(TimeDelta::hours(1)),
        Just(TimeDelta::milliseconds(-1)),
        Just(TimeDelta::seconds(-1)),
        Just(TimeDelta::minutes(-1)),
        Just(TimeDelta::hours(-1)),
    ]
}

proptest! {
    #[test]
    fn start_of_day_parts_iff_eastern_midnight(t in instant()) {
        let is_midnight = t == start_of_day(eastern_date(t));
        prop_assert_eq!(tz_date_parts(t) == TzDateParts::START_OF_DAY, is_midnight);
    }

    #[test]
    fn end_of_day_parts_iff_last_millisecond(t in instant()) {
        let is_last = t == end_of_day(eastern_date(t));
        prop_assert_eq!(tz_date_parts(t) == TzDateParts::END_OF_DAY, is_last);
    }

    #[test]
    fn every_day_boundary_passes_and_neighbours_fail(day in calendar_day(), delta in one_unit()) {
        let midnight = start_of_day(day);
        prop_assert_eq!(eastern_date(midnight), day);
        prop_assert!(check_input_date_is_start_of_day(&InputDate::new(DateType::ConceptStartDate, midnight)).is_ok());
        prop_assert!(check_input_date_is_start_of_day(&InputDate::new(DateType::ConceptStartDate, midnight + delta)).is_err());

        let last = end_of_day(day);
        prop_assert_eq!(eastern_date(last), day);
        prop_assert!(check_input_date_is_end_of_day(&InputDate::new(DateType::CompletenessReviewDueDate, last)).is_ok());
        prop_assert!(check_input_date_is_end_of_day(&InputDate::new(DateType::CompletenessReviewDueDate, last + delta)).is_err());
    }

    #[test]
    fn eastern_days_are_23_24_or_25_hours(day in calendar_day()) {
        let next = day.succ_opt().unwrap();
        let hours = (start_of_day(next) - start_of_day(day)).num_hours();
        prop_assert!(matches!(hours, 23..=25), "{day}: {hours}h");
        prop_assert_eq!(end_of_day(day) + TimeDelta::milliseconds(1), start_of_day(next));
    }

    #[test]
    fn whole_day_offsets_preserve_boundaries(day in calendar_day(), days in -400i64..400) {
        let shifted = DateOffset::days(days).apply(start_of_day(day)).unwrap();
        prop_assert_eq!(tz_date_parts(shifted), TzDateParts::START_OF_DAY);

        let due = DateOffset::days_to_end_of_day(days).apply(start_of_day(day)).unwrap();
        let due_day = eastern_date(shifted);
        // elapsed 23:59:59.999 misses end of day by the DST shift of a 23 or 25 hour day
        let day_hours = (start_of_day(due_day.succ_opt().unwrap()) - shifted).num_hours();
        prop_assert_eq!(due - end_of_day(due_day), TimeDelta::hours(24 - day_hours));
    }
}
