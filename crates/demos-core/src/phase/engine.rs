//! Phase Start Engine
//!
//! Given a batch of newly supplied dates, starts the phases owning them and
//! returns the start dates those phases should be back-filled with.
//!
//! Runs entirely inside the caller's transaction and never commits.
//! Collaborator errors propagate unchanged; partial phase starts are undone
//! by the caller dropping the transaction.

use std::sync::Arc;

use demos_dates::EasternNow;
use demos_model::{ApplicationDateInput, ApplicationId, PhaseId};
use demos_store::Transaction;

use super::{
    PhaseDateTypeSource, PhaseStartDateFactory, PhaseStartDates, PhaseStarter, StorePhaseDateTypes,
    StorePhaseStarter,
};
use crate::error::{ConfigurationError, DemosError};

/// Starts phases from supplied dates
#[derive(Clone)]
pub struct PhaseStartEngine {
    table: Arc<dyn PhaseDateTypeSource>,
    starter: Arc<dyn PhaseStarter>,
    factory: Arc<dyn PhaseStartDateFactory>,
}

impl std::fmt::Debug for PhaseStartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseStartEngine").finish_non_exhaustive()
    }
}

impl Default for PhaseStartEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(StorePhaseDateTypes),
            Arc::new(StorePhaseStarter),
            Arc::new(PhaseStartDates),
        )
    }
}

impl PhaseStartEngine {
    /// Create new engine over the given collaborators
    #[must_use]
    pub fn new(
        table: Arc<dyn PhaseDateTypeSource>,
        starter: Arc<dyn PhaseStarter>,
        factory: Arc<dyn PhaseStartDateFactory>,
    ) -> Self {
        Self {
            table,
            starter,
            factory,
        }
    }

    /// Start the phases owning `dates` and return the start dates to add.
    ///
    /// # Arguments
    ///
    /// * `tx` - Caller's transaction; never committed here
    /// * `application_id` - Application whose phases start
    /// * `dates` - Supplied dates, in order; unset ones are ignored
    /// * `now` - Eastern day boundaries computed once for the batch
    ///
    /// # Returns
    ///
    /// Start dates of phases that transitioned, in input order, minus any
    /// whose date type equals the date type that triggered it. Other
    /// supplied dates of the same type are not consulted here;
    /// [`ApplicationDateService`](crate::ApplicationDateService) drops those
    /// start dates before writing.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnmappedDateType`] when a set date type has
    /// no phase in the ordered table; collaborator errors as returned.
    pub async fn start_phases_by_dates(
        &self,
        tx: &mut Transaction,
        application_id: &ApplicationId,
        dates: &[ApplicationDateInput],
        now: &EasternNow,
    ) -> Result<Vec<ApplicationDateInput>, DemosError> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        let table = self.table.ordered_phase_date_types(tx).await?;
        let mut attempted: Vec<PhaseId> = Vec::new();
        let mut start_dates = Vec::new();

        for date in dates.iter().filter(|date| date.is_set()) {
            let phase = table
                .phase_for(date.date_type)
                .ok_or(ConfigurationError::UnmappedDateType(date.date_type))?;

            if attempted.contains(&phase) {
                continue;
            }
            attempted.push(phase);

            if !self.starter.start_phase(application_id, phase, tx).await? {
                continue;
            }

            let Some(start_date) = self.factory.create_phase_start_date(phase, now) else {
                continue;
            };
            if start_date.date_type == date.date_type {
                tracing::debug!(
                    "{} supplied for phase {}, not back-filling",
                    date.date_type,
                    phase
                );
                continue;
            }
            start_dates.push(start_date);
        }

        tracing::debug!(
            "application {}: {} phases attempted, {} start dates back-filled",
            application_id,
            attempted.len(),
            start_dates.len()
        );
        Ok(start_dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use demos_model::{DateType, DateValue, OrderedPhaseDateTypes, PhaseDateTypeEntry};
    use demos_store::{MemoryStore, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn now() -> EasternNow {
        EasternNow::at(utc("2025-01-15T17:00:00Z"))
    }

    fn set(date_type: DateType) -> ApplicationDateInput {
        ApplicationDateInput::new(date_type, utc("2025-01-10T05:00:00Z"))
    }

    #[derive(Default)]
    struct CountingTable {
        entries: Vec<PhaseDateTypeEntry>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PhaseDateTypeSource for CountingTable {
        async fn ordered_phase_date_types(
            &self,
            _tx: &mut Transaction,
        ) -> Result<OrderedPhaseDateTypes, DemosError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OrderedPhaseDateTypes::new(self.entries.clone()))
        }
    }

    struct ScriptedStarter {
        starts: Vec<PhaseId>,
        calls: Mutex<Vec<PhaseId>>,
        fail: bool,
    }

    impl ScriptedStarter {
        fn starting(starts: &[PhaseId]) -> Self {
            Self {
                starts: starts.to_vec(),
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl PhaseStarter for ScriptedStarter {
        async fn start_phase(
            &self,
            _application_id: &ApplicationId,
            phase: PhaseId,
            _tx: &mut Transaction,
        ) -> Result<bool, DemosError> {
            self.calls.lock().unwrap().push(phase);
            if self.fail {
                return Err(StoreError::ApplicationNotFound("app-1".into()).into());
            }
            Ok(self.starts.contains(&phase))
        }
    }

    #[derive(Default)]
    struct RecordingFactory {
        calls: Mutex<Vec<PhaseId>>,
    }

    impl PhaseStartDateFactory for RecordingFactory {
        fn create_phase_start_date(&self, phase: PhaseId, now: &EasternNow) -> Option<ApplicationDateInput> {
            self.calls.lock().unwrap().push(phase);
            crate::phase::create_phase_start_date(phase, now)
        }
    }

    struct Harness {
        table: Arc<CountingTable>,
        starter: Arc<ScriptedStarter>,
        factory: Arc<RecordingFactory>,
        engine: PhaseStartEngine,
    }

    fn harness(entries: &[(PhaseId, DateType)], starts: &[PhaseId]) -> Harness {
        let table = Arc::new(CountingTable {
            entries: entries
                .iter()
                .map(|&(phase, date_type)| PhaseDateTypeEntry::new(phase, date_type))
                .collect(),
            ..CountingTable::default()
        });
        let starter = Arc::new(ScriptedStarter::starting(starts));
        let factory = Arc::new(RecordingFactory::default());
        let engine = PhaseStartEngine::new(table.clone(), starter.clone(), factory.clone());
        Harness {
            table,
            starter,
            factory,
            engine,
        }
    }

    const TABLE: &[(PhaseId, DateType)] = &[
        (PhaseId::Concept, DateType::ConceptStartDate),
        (PhaseId::Concept, DateType::PreSubmissionSubmittedDate),
        (PhaseId::ApplicationIntake, DateType::ApplicationIntakeStartDate),
        (PhaseId::ApplicationIntake, DateType::StateApplicationSubmittedDate),
        (PhaseId::Review, DateType::StateConcurrence),
        (PhaseId::ApprovalPackage, DateType::StateConcurrence),
    ];

    #[tokio::test]
    async fn test_empty_batch_touches_nothing() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(&mut tx, &"app-1".into(), &[], &now())
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(h.table.calls.load(Ordering::SeqCst), 0);
        assert!(h.starter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_table_fetched_once_per_batch() {
        let h = harness(TABLE, &[]);
        let mut tx = MemoryStore::new().begin();
        h.engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::ConceptStartDate), set(DateType::StateConcurrence)],
                &now(),
            )
            .await
            .unwrap();
        assert_eq!(h.table.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unset_dates_are_ignored() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[
                    ApplicationDateInput::cleared(DateType::PreSubmissionSubmittedDate),
                    // unset dates are skipped before the table lookup
                    ApplicationDateInput::cleared(DateType::ReviewCompletionDate),
                ],
                &now(),
            )
            .await
            .unwrap();
        assert!(result.is_empty());
        assert!(h.starter.calls.lock().unwrap().is_empty());
        assert!(h.factory.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_started_phase_gets_start_date() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::PreSubmissionSubmittedDate)],
                &now(),
            )
            .await
            .unwrap();
        assert_eq!(
            result,
            vec![ApplicationDateInput {
                date_type: DateType::ConceptStartDate,
                date_value: Some(DateValue::Instant(now().start_of_day.instant())),
            }]
        );
    }

    #[tokio::test]
    async fn test_factory_only_called_for_transitions() {
        let h = harness(TABLE, &[PhaseId::ApplicationIntake]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[
                    set(DateType::PreSubmissionSubmittedDate),
                    set(DateType::StateApplicationSubmittedDate),
                ],
                &now(),
            )
            .await
            .unwrap();
        assert_eq!(
            *h.starter.calls.lock().unwrap(),
            vec![PhaseId::Concept, PhaseId::ApplicationIntake]
        );
        assert_eq!(*h.factory.calls.lock().unwrap(), vec![PhaseId::ApplicationIntake]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].date_type, DateType::ApplicationIntakeStartDate);
    }

    #[tokio::test]
    async fn test_supplied_start_date_is_not_duplicated() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::ConceptStartDate)],
                &now(),
            )
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(*h.factory.calls.lock().unwrap(), vec![PhaseId::Concept]);
    }

    #[tokio::test]
    async fn test_duplicate_suppression_compares_type_only() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        // supplied value differs from today, still suppressed
        let supplied = ApplicationDateInput::new(DateType::ConceptStartDate, utc("2020-06-01T04:00:00Z"));
        let result = h
            .engine
            .start_phases_by_dates(&mut tx, &"app-1".into(), &[supplied], &now())
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_one_start_attempt_per_phase() {
        let h = harness(TABLE, &[PhaseId::Concept, PhaseId::ApplicationIntake]);
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[
                    set(DateType::PreSubmissionSubmittedDate),
                    set(DateType::ConceptStartDate),
                    set(DateType::StateApplicationSubmittedDate),
                    set(DateType::ApplicationIntakeStartDate),
                ],
                &now(),
            )
            .await
            .unwrap();
        assert_eq!(
            *h.starter.calls.lock().unwrap(),
            vec![PhaseId::Concept, PhaseId::ApplicationIntake]
        );
        assert_eq!(
            result.iter().map(|d| d.date_type).collect::<Vec<_>>(),
            vec![DateType::ConceptStartDate, DateType::ApplicationIntakeStartDate]
        );
    }

    #[tokio::test]
    async fn test_first_table_entry_wins() {
        let h = harness(TABLE, &[PhaseId::Review, PhaseId::ApprovalPackage]);
        let mut tx = MemoryStore::new().begin();
        h.engine
            .start_phases_by_dates(&mut tx, &"app-1".into(), &[set(DateType::StateConcurrence)], &now())
            .await
            .unwrap();
        assert_eq!(*h.starter.calls.lock().unwrap(), vec![PhaseId::Review]);
    }

    #[tokio::test]
    async fn test_unmapped_date_type_is_configuration_error() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let err = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::ReviewCompletionDate)],
                &now(),
            )
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Review Completion Date"));
        assert!(h.starter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unmapped_date_type_aborts_after_earlier_starts() {
        let h = harness(TABLE, &[PhaseId::Concept]);
        let mut tx = MemoryStore::new().begin();
        let err = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::ConceptStartDate), set(DateType::ReviewCompletionDate)],
                &now(),
            )
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(*h.starter.calls.lock().unwrap(), vec![PhaseId::Concept]);
    }

    #[tokio::test]
    async fn test_starter_errors_propagate() {
        let table = Arc::new(CountingTable {
            entries: vec![PhaseDateTypeEntry::new(PhaseId::Concept, DateType::ConceptStartDate)],
            ..CountingTable::default()
        });
        let starter = Arc::new(ScriptedStarter {
            fail: true,
            ..ScriptedStarter::starting(&[])
        });
        let factory = Arc::new(RecordingFactory::default());
        let engine = PhaseStartEngine::new(table, starter, factory.clone());

        let mut tx = MemoryStore::new().begin();
        let err = engine
            .start_phases_by_dates(&mut tx, &"app-1".into(), &[set(DateType::ConceptStartDate)], &now())
            .await
            .unwrap_err();
        assert!(matches!(err, DemosError::Store(StoreError::ApplicationNotFound(_))));
        assert!(factory.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_factory_date_yields_nothing() {
        let h = harness(
            &[(PhaseId::FederalComment, DateType::FederalCommentPeriodStartDate)],
            &[PhaseId::FederalComment],
        );
        let mut tx = MemoryStore::new().begin();
        let result = h
            .engine
            .start_phases_by_dates(
                &mut tx,
                &"app-1".into(),
                &[set(DateType::FederalCommentPeriodStartDate)],
                &now(),
            )
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(*h.factory.calls.lock().unwrap(), vec![PhaseId::FederalComment]);
    }
}
