//! Testing utilities for DEMOS workspace
//!
//! Shared fixtures and recording wrappers around the store-backed
//! phase collaborators.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;

use demos_core::{
    ApplicationDateService, DemosError, PhaseDateTypeSource, PhaseStartDateFactory, PhaseStartDates,
    PhaseStartEngine, PhaseStarter, SetApplicationDatesInput, StorePhaseDateTypes, StorePhaseStarter,
};
use demos_dates::clock::{end_of_day, start_of_day};
use demos_dates::{EasternNow, FixedClock};
use demos_model::{
    ApplicationDateInput, ApplicationId, ApplicationStatus, DateType, OrderedPhaseDateTypes, PhaseId,
    PhaseStatus,
};
use demos_store::{MemoryStore, StoreError, Transaction};

pub const APP: &str = "app-1";

pub fn app_id() -> ApplicationId {
    ApplicationId::new(APP)
}

pub fn utc(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

pub fn eastern_midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    start_of_day(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

pub fn eastern_end_of_day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    end_of_day(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

pub fn set_date(date_type: DateType, value: DateTime<Utc>) -> ApplicationDateInput {
    ApplicationDateInput::new(date_type, value)
}

pub fn batch(dates: Vec<ApplicationDateInput>) -> SetApplicationDatesInput {
    SetApplicationDatesInput {
        application_id: app_id(),
        application_dates: dates,
    }
}

/// Store holding [`APP`] in Pre-Submission, every phase Not Started.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .create_application(app_id(), ApplicationStatus::PreSubmission)
        .unwrap();
    store
}

/// [`seeded_store`] with some phase statuses and dates already committed.
pub fn store_with(phases: &[(PhaseId, PhaseStatus)], dates: &[(DateType, DateTime<Utc>)]) -> MemoryStore {
    let store = seeded_store();
    let mut tx = store.begin();
    for (phase, status) in phases {
        tx.set_phase_status(&app_id(), *phase, *status).unwrap();
    }
    for (date_type, value) in dates {
        tx.upsert_date(
            &app_id(),
            demos_model::ApplicationDate::new(*date_type, Some(*value)),
        )
        .unwrap();
    }
    store.commit(tx).unwrap();
    store
}

/// Service over `store` with the clock frozen at `now`.
pub fn service_at(store: MemoryStore, now: &str) -> ApplicationDateService {
    ApplicationDateService::new(store).with_clock(Arc::new(FixedClock::new(utc(now))))
}

pub fn eastern_now_at(now: &str) -> EasternNow {
    EasternNow::at(utc(now))
}

/// Store-backed table source that counts fetches.
#[derive(Debug, Default)]
pub struct CountingPhaseDateTypes {
    calls: AtomicUsize,
}

impl CountingPhaseDateTypes {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhaseDateTypeSource for CountingPhaseDateTypes {
    async fn ordered_phase_date_types(
        &self,
        tx: &mut Transaction,
    ) -> Result<OrderedPhaseDateTypes, DemosError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StorePhaseDateTypes.ordered_phase_date_types(tx).await
    }
}

/// Store-backed starter that records every call and its answer.
#[derive(Debug, Default)]
pub struct RecordingPhaseStarter {
    calls: Mutex<Vec<(PhaseId, bool)>>,
    fail_on: Option<PhaseId>,
}

impl RecordingPhaseStarter {
    /// Starter that fails with a store error when asked to start `phase`.
    pub fn failing_on(phase: PhaseId) -> Self {
        Self {
            fail_on: Some(phase),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(PhaseId, bool)> {
        self.calls.lock().clone()
    }

    pub fn phases(&self) -> Vec<PhaseId> {
        self.calls.lock().iter().map(|(phase, _)| *phase).collect()
    }
}

#[async_trait]
impl PhaseStarter for RecordingPhaseStarter {
    async fn start_phase(
        &self,
        application_id: &ApplicationId,
        phase: PhaseId,
        tx: &mut Transaction,
    ) -> Result<bool, DemosError> {
        if self.fail_on == Some(phase) {
            return Err(StoreError::PhaseNotFound {
                application_id: application_id.clone(),
                phase,
            }
            .into());
        }
        let started = StorePhaseStarter.start_phase(application_id, phase, tx).await?;
        self.calls.lock().push((phase, started));
        Ok(started)
    }
}

/// Default start-date factory that records the phases it was asked for.
#[derive(Debug, Default)]
pub struct RecordingStartDateFactory {
    calls: Mutex<Vec<PhaseId>>,
}

impl RecordingStartDateFactory {
    pub fn calls(&self) -> Vec<PhaseId> {
        self.calls.lock().clone()
    }
}

impl PhaseStartDateFactory for RecordingStartDateFactory {
    fn create_phase_start_date(&self, phase: PhaseId, now: &EasternNow) -> Option<ApplicationDateInput> {
        self.calls.lock().push(phase);
        PhaseStartDates.create_phase_start_date(phase, now)
    }
}

/// Engine wired to recording collaborators.
pub struct RecordingEngine {
    pub engine: PhaseStartEngine,
    pub table: Arc<CountingPhaseDateTypes>,
    pub starter: Arc<RecordingPhaseStarter>,
    pub factory: Arc<RecordingStartDateFactory>,
}

pub fn recording_engine() -> RecordingEngine {
    recording_engine_with(RecordingPhaseStarter::default())
}

pub fn recording_engine_with(starter: RecordingPhaseStarter) -> RecordingEngine {
    let table = Arc::new(CountingPhaseDateTypes::default());
    let starter = Arc::new(starter);
    let factory = Arc::new(RecordingStartDateFactory::default());
    let engine = PhaseStartEngine::new(table.clone(), starter.clone(), factory.clone());
    RecordingEngine {
        engine,
        table,
        starter,
        factory,
    }
}
