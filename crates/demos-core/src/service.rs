//! Application date mutation
//!
//! `set_application_dates` runs one batch in one transaction:
//! 1. parse every value to an instant
//! 2. reject changes to dates of finished phases (configurable)
//! 3. validate every set date against its rules, batch over store
//! 4. start the phases the dates belong to
//! 5. write the supplied dates, then start dates for newly started phases
//!    whose type was not supplied with a value
//! 6. commit
//!
//! Any failure drops the transaction, leaving the store untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use demos_dates::{parse_application_date, validate_input_dates, Clock, EasternNow, InputDate, SystemClock};
use demos_model::{ApplicationDate, ApplicationDateInput, ApplicationId};
use demos_store::{MemoryStore, Transaction, TransactionDateResolver};

use crate::config::ValidationConfig;
use crate::dates::{filter_changing_date_types, validate_allowed_date_change_by_phase, BatchDateResolver};
use crate::error::DemosError;
use crate::phase::PhaseStartEngine;

/// One mutation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApplicationDatesInput {
    /// Application being changed
    pub application_id: ApplicationId,
    /// Dates to write, in order
    pub application_dates: Vec<ApplicationDateInput>,
}

/// Result of a committed batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApplicationDatesOutcome {
    /// Application changed
    pub application_id: ApplicationId,
    /// Supplied dates as written
    pub dates: Vec<ApplicationDate>,
    /// Start dates back-filled for newly started phases
    pub back_filled: Vec<ApplicationDate>,
    /// Day boundaries the batch ran under
    pub eastern_now: EasternNow,
}

/// Entry point for changing application dates
#[derive(Clone)]
pub struct ApplicationDateService {
    store: MemoryStore,
    engine: PhaseStartEngine,
    clock: Arc<dyn Clock>,
    validation: ValidationConfig,
}

impl std::fmt::Debug for ApplicationDateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationDateService")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl ApplicationDateService {
    /// Create new service over `store` with the system clock
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            engine: PhaseStartEngine::default(),
            clock: Arc::new(SystemClock),
            validation: ValidationConfig::default(),
        }
    }

    /// Use `clock` for "now"
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom engine
    #[must_use]
    pub fn with_engine(mut self, engine: PhaseStartEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Set validation switches
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Validate and write a batch of dates, starting phases as needed.
    ///
    /// # Errors
    ///
    /// Validation errors for bad or locked dates, configuration errors for
    /// unmapped date types, and store errors (including commit conflicts).
    pub async fn set_application_dates(
        &self,
        input: &SetApplicationDatesInput,
    ) -> Result<SetApplicationDatesOutcome, DemosError> {
        tracing::info!(
            "setting {} dates for application {}",
            input.application_dates.len(),
            input.application_id
        );
        let mut tx = self.store.begin();
        match self.apply(&mut tx, input).await {
            Ok(outcome) => {
                self.store.commit(tx)?;
                tracing::info!(
                    "application {}: wrote {} dates, back-filled {}",
                    outcome.application_id,
                    outcome.dates.len(),
                    outcome.back_filled.len()
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!("application {}: batch rejected: {}", input.application_id, err);
                Err(err)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut Transaction,
        input: &SetApplicationDatesInput,
    ) -> Result<SetApplicationDatesOutcome, DemosError> {
        let application_id = &input.application_id;
        let eastern_now = self.clock.eastern_now();
        let dates: Vec<ApplicationDate> = input
            .application_dates
            .iter()
            .map(parse_application_date)
            .collect();

        if self.validation.enforce_finished_phase_lock {
            let existing = tx.application_dates(application_id)?;
            let changing = filter_changing_date_types(&dates, &existing);
            validate_allowed_date_change_by_phase(tx, application_id, &changing)?;
        }

        {
            let stored = TransactionDateResolver::new(tx);
            let resolver = BatchDateResolver::new(application_id, &dates, &stored);
            let checked: Vec<InputDate> = dates
                .iter()
                .filter_map(InputDate::from_application_date)
                .collect();
            validate_input_dates(&resolver, application_id, &checked).await?;
        }

        // a set value of the same type wins over a back-filled one; a cleared one does not
        let back_filled: Vec<ApplicationDate> = self
            .engine
            .start_phases_by_dates(tx, application_id, &input.application_dates, &eastern_now)
            .await?
            .iter()
            .map(parse_application_date)
            .filter(|start| {
                !dates
                    .iter()
                    .any(|date| date.date_type == start.date_type && date.date_value.is_some())
            })
            .collect();

        for date in dates.iter().chain(&back_filled) {
            tx.upsert_date(application_id, *date)?;
        }

        Ok(SetApplicationDatesOutcome {
            application_id: application_id.clone(),
            dates,
            back_filled,
            eastern_now,
        })
    }
}
