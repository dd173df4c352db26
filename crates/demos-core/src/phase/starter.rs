//! Store-backed phase starting

use async_trait::async_trait;

use demos_model::{ApplicationId, ApplicationStatus, PhaseId, PhaseStatus};
use demos_store::{StoreError, Transaction};

use super::PhaseStarter;
use crate::error::DemosError;

/// Move `phase` to Started if it may start.
///
/// Not Started phases start. Incomplete phases restart only for
/// Completeness. Returns whether the status changed.
///
/// # Errors
///
/// [`StoreError::PhaseNotFound`]
pub fn set_phase_to_started(
    tx: &mut Transaction,
    application_id: &ApplicationId,
    phase: PhaseId,
) -> Result<bool, StoreError> {
    let status = tx.phase_status(application_id, phase)?;
    let may_start = match status {
        PhaseStatus::NotStarted => true,
        PhaseStatus::Incomplete => phase == PhaseId::Completeness,
        PhaseStatus::Started | PhaseStatus::Completed | PhaseStatus::Skipped => false,
    };
    if !may_start {
        return Ok(false);
    }
    tx.set_phase_status(application_id, phase, PhaseStatus::Started)?;
    Ok(true)
}

/// Starting Application Intake moves a Pre-Submission application to
/// Under Review. Returns whether the status changed.
///
/// # Errors
///
/// [`StoreError::ApplicationNotFound`]
pub fn update_status_to_under_review_if_needed(
    tx: &mut Transaction,
    application_id: &ApplicationId,
    phase: PhaseId,
) -> Result<bool, StoreError> {
    if phase != PhaseId::ApplicationIntake {
        return Ok(false);
    }
    if tx.application_status(application_id)? != ApplicationStatus::PreSubmission {
        return Ok(false);
    }
    tx.set_application_status(application_id, ApplicationStatus::UnderReview)?;
    Ok(true)
}

/// Starts phases in the store
#[derive(Debug, Clone, Copy, Default)]
pub struct StorePhaseStarter;

#[async_trait]
impl PhaseStarter for StorePhaseStarter {
    async fn start_phase(
        &self,
        application_id: &ApplicationId,
        phase: PhaseId,
        tx: &mut Transaction,
    ) -> Result<bool, DemosError> {
        if !set_phase_to_started(tx, application_id, phase)? {
            return Ok(false);
        }
        tracing::info!("started phase {} for application {}", phase, application_id);
        if update_status_to_under_review_if_needed(tx, application_id, phase)? {
            tracing::info!("application {} is now {}", application_id, ApplicationStatus::UnderReview);
        }
        Ok(true)
    }
}
