//! DEMOS application date validation
//!
//! Provides:
//! - Eastern-time clock: day boundaries, wall-clock decomposition, `EasternNow`
//! - Calendar-plus-clock offsets
//! - Boundary, ordering and offset checks against a target-date resolver
//! - The per-date-type rule table

pub mod checks;
pub mod clock;
pub mod error;
pub mod offset;
pub mod resolver;
pub mod rules;

pub use checks::{
    check_input_date_expected_timestamp, check_input_date_greater_than,
    check_input_date_greater_than_or_equal, check_input_date_is_end_of_day,
    check_input_date_is_start_of_day, check_input_date_meets_offset, InputDate, TargetDate,
};
pub use clock::{
    eastern_date, parse_application_date, resolve_date_value, tz_date_parts, Clock, EasternNow,
    EasternTzDate, FixedClock, SystemClock, TzDateParts, EASTERN,
};
pub use error::{CheckError, ResolveError, ValidationError};
pub use offset::DateOffset;
pub use resolver::TargetDateResolver;
pub use rules::{rules_for, validate_input_date, validate_input_dates, DateRule};

/// Prelude for common imports
pub mod prelude {
    pub use crate::checks::{InputDate, TargetDate};
    pub use crate::clock::{Clock, EasternNow, EasternTzDate};
    pub use crate::error::{CheckError, ResolveError, ValidationError};
    pub use crate::offset::DateOffset;
    pub use crate::resolver::TargetDateResolver;
}

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
