//! DEMOS domain model
//!
//! Closed vocabularies and value types shared by every DEMOS crate:
//! - Milestone date types and their expected Eastern timestamps
//! - Workflow phases, phase statuses and application statuses
//! - Application date inputs (instant or calendar date, nullable)
//! - The ordered phase/date-type table
//!
//! Every enumeration parses from its exact wire string only.

#[macro_use]
mod macros;

pub mod application;
pub mod date_type;
pub mod error;
pub mod phase;
pub mod table;

pub use application::{ApplicationDate, ApplicationDateInput, ApplicationId, DateValue};
pub use date_type::{DateType, ExpectedTimestamp};
pub use error::ParseEnumError;
pub use phase::{ApplicationStatus, PhaseId, PhaseStatus};
pub use table::{OrderedPhaseDateTypes, PhaseDateTypeEntry};

/// Prelude for common imports
pub mod prelude {
    pub use crate::application::{ApplicationDate, ApplicationDateInput, ApplicationId, DateValue};
    pub use crate::date_type::{DateType, ExpectedTimestamp};
    pub use crate::phase::{ApplicationStatus, PhaseId, PhaseStatus};
    pub use crate::table::{OrderedPhaseDateTypes, PhaseDateTypeEntry};
}

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
