//! Phase start orchestration
//!
//! Collaborator seams used by [`PhaseStartEngine`]:
//! - [`PhaseDateTypeSource`]: the ordered phase/date-type table
//! - [`PhaseStarter`]: transitions a phase to Started
//! - [`PhaseStartDateFactory`]: the start date a newly started phase gets

pub mod engine;
pub mod start_date;
pub mod starter;
pub mod table;

use async_trait::async_trait;

use demos_dates::EasternNow;
use demos_model::{ApplicationDateInput, ApplicationId, OrderedPhaseDateTypes, PhaseId};
use demos_store::Transaction;

use crate::error::DemosError;

pub use engine::PhaseStartEngine;
pub use start_date::{create_phase_start_date, phase_start_date_type, PhaseStartDates};
pub use starter::{set_phase_to_started, update_status_to_under_review_if_needed, StorePhaseStarter};
pub use table::StorePhaseDateTypes;

/// Reads the ordered phase/date-type table
#[async_trait]
pub trait PhaseDateTypeSource: Send + Sync {
    /// The table, in priority order
    async fn ordered_phase_date_types(
        &self,
        tx: &mut Transaction,
    ) -> Result<OrderedPhaseDateTypes, DemosError>;
}

/// Moves a phase to Started
#[async_trait]
pub trait PhaseStarter: Send + Sync {
    /// `true` iff the phase transitioned during this call
    async fn start_phase(
        &self,
        application_id: &ApplicationId,
        phase: PhaseId,
        tx: &mut Transaction,
    ) -> Result<bool, DemosError>;
}

/// Builds the start date of a newly started phase
pub trait PhaseStartDateFactory: Send + Sync {
    /// `None` when the phase has no start date type
    fn create_phase_start_date(&self, phase: PhaseId, now: &EasternNow) -> Option<ApplicationDateInput>;
}
