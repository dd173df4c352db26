//! Transaction handle and the queries run through it

use chrono::{DateTime, Utc};
use uuid::Uuid;

use demos_model::{
    ApplicationDate, ApplicationId, ApplicationStatus, DateType, OrderedPhaseDateTypes, PhaseId,
    PhaseStatus,
};

use crate::error::StoreError;
use crate::memory::StoreState;

/// Private working copy of the store
#[derive(Debug)]
pub struct Transaction {
    id: Uuid,
    base_version: u64,
    writes: usize,
    state: StoreState,
}

impl Transaction {
    pub(crate) fn new(base_version: u64, state: StoreState) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_version,
            writes: 0,
            state,
        }
    }

    /// Transaction id
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Store version this transaction read
    #[inline]
    #[must_use]
    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    /// Writes performed so far
    #[inline]
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Whether any write was performed
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.writes > 0
    }

    pub(crate) fn into_state(self) -> StoreState {
        self.state
    }

    fn ensure_application(&self, id: &ApplicationId) -> Result<(), StoreError> {
        if self.state.applications.contains_key(id) {
            Ok(())
        } else {
            Err(StoreError::ApplicationNotFound(id.clone()))
        }
    }

    /// Ordered phase/date-type table
    #[must_use]
    pub fn ordered_phase_date_types(&self) -> OrderedPhaseDateTypes {
        self.state.phase_date_types.clone()
    }

    /// Create an application with every phase Not Started.
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationExists`]
    pub fn create_application(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        if self.state.applications.contains_key(&id) {
            return Err(StoreError::ApplicationExists(id));
        }
        for phase in PhaseId::ALL {
            self.state
                .phases
                .insert((id.clone(), *phase), PhaseStatus::NotStarted);
        }
        self.state.applications.insert(id, status);
        self.writes += 1;
        Ok(())
    }

    /// Overall status of an application
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn application_status(&self, id: &ApplicationId) -> Result<ApplicationStatus, StoreError> {
        self.state
            .applications
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::ApplicationNotFound(id.clone()))
    }

    /// Set the overall status of an application
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn set_application_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        let slot = self
            .state
            .applications
            .get_mut(id)
            .ok_or_else(|| StoreError::ApplicationNotFound(id.clone()))?;
        *slot = status;
        self.writes += 1;
        Ok(())
    }

    /// Status of one phase
    ///
    /// # Errors
    ///
    /// [`StoreError::PhaseNotFound`]
    pub fn phase_status(&self, id: &ApplicationId, phase: PhaseId) -> Result<PhaseStatus, StoreError> {
        self.state
            .phases
            .get(&(id.clone(), phase))
            .copied()
            .ok_or_else(|| StoreError::PhaseNotFound {
                application_id: id.clone(),
                phase,
            })
    }

    /// Set the status of one phase
    ///
    /// # Errors
    ///
    /// [`StoreError::PhaseNotFound`]
    pub fn set_phase_status(
        &mut self,
        id: &ApplicationId,
        phase: PhaseId,
        status: PhaseStatus,
    ) -> Result<(), StoreError> {
        let slot = self
            .state
            .phases
            .get_mut(&(id.clone(), phase))
            .ok_or_else(|| StoreError::PhaseNotFound {
                application_id: id.clone(),
                phase,
            })?;
        *slot = status;
        self.writes += 1;
        Ok(())
    }

    /// Phases of an application that are Completed or Skipped, in phase order
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn finished_phases(&self, id: &ApplicationId) -> Result<Vec<PhaseId>, StoreError> {
        self.ensure_application(id)?;
        Ok(PhaseId::ALL
            .iter()
            .copied()
            .filter(|phase| {
                self.state
                    .phases
                    .get(&(id.clone(), *phase))
                    .is_some_and(|status| status.is_finished())
            })
            .collect())
    }

    /// Recorded value of one date, `None` when unset
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn date_value(
        &self,
        id: &ApplicationId,
        date_type: DateType,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.ensure_application(id)?;
        Ok(self
            .state
            .dates
            .get(&(id.clone(), date_type))
            .copied()
            .flatten())
    }

    /// Every date row of an application, cleared ones included
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn application_dates(&self, id: &ApplicationId) -> Result<Vec<ApplicationDate>, StoreError> {
        self.ensure_application(id)?;
        Ok(self
            .state
            .dates
            .iter()
            .filter(|((owner, _), _)| owner == id)
            .map(|((_, date_type), value)| ApplicationDate::new(*date_type, *value))
            .collect())
    }

    /// Insert or overwrite one date. `None` overwrites with "not set".
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationNotFound`]
    pub fn upsert_date(&mut self, id: &ApplicationId, date: ApplicationDate) -> Result<(), StoreError> {
        self.ensure_application(id)?;
        self.state
            .dates
            .insert((id.clone(), date.date_type), date.date_value);
        self.writes += 1;
        Ok(())
    }
}
