//! DEMOS Core
//!
//! Phase start orchestration and the application date mutation service:
//! - [`PhaseStartEngine`]: starts phases from supplied dates and returns
//!   the start dates to back-fill
//! - [`ApplicationDateService`]: validates, starts phases and persists a
//!   batch of dates in one transaction
//! - Finished-phase date lock
//! - Configuration and tracing setup

pub mod config;
pub mod dates;
pub mod error;
pub mod phase;
pub mod service;
pub mod telemetry;

pub use config::{DemosConfig, LoggingConfig, ValidationConfig};
pub use error::{ConfigurationError, DemosError, LockedDate};
pub use phase::{
    PhaseDateTypeSource, PhaseStartDateFactory, PhaseStartDates, PhaseStartEngine, PhaseStarter,
    StorePhaseDateTypes, StorePhaseStarter,
};
pub use service::{ApplicationDateService, SetApplicationDatesInput, SetApplicationDatesOutcome};
pub use telemetry::init_tracing;

/// Prelude for common imports
pub mod prelude {
    pub use crate::config::DemosConfig;
    pub use crate::error::DemosError;
    pub use crate::phase::{PhaseDateTypeSource, PhaseStartDateFactory, PhaseStartEngine, PhaseStarter};
    pub use crate::service::{ApplicationDateService, SetApplicationDatesInput};
    pub use demos_dates::prelude::*;
    pub use demos_model::prelude::*;
}

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
