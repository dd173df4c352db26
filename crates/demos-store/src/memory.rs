//! In-memory store with optimistic transactions
//!
//! Each transaction works on a private copy of the state. Commit swaps the
//! copy in if nothing else committed since it began; dropping an
//! uncommitted transaction discards its writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use demos_model::{
    ApplicationId, ApplicationStatus, DateType, OrderedPhaseDateTypes, PhaseId, PhaseStatus,
};

use crate::error::StoreError;
use crate::seed::default_phase_date_types;
use crate::transaction::Transaction;

/// Application row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Application id
    pub id: ApplicationId,
    /// Overall status
    pub status: ApplicationStatus,
}

/// Phase row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    /// Owning application
    pub application_id: ApplicationId,
    /// Phase
    pub phase_id: PhaseId,
    /// Status
    pub phase_status: PhaseStatus,
}

/// Date row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRecord {
    /// Owning application
    pub application_id: ApplicationId,
    /// Milestone
    pub date_type: DateType,
    /// Recorded value, `None` once cleared
    pub date_value: Option<DateTime<Utc>>,
}

/// Serializable image of the whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Applications
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
    /// Phase statuses. Applications without rows get every phase Not Started.
    #[serde(default)]
    pub phases: Vec<PhaseRecord>,
    /// Dates
    #[serde(default)]
    pub dates: Vec<DateRecord>,
    /// Ordered phase/date-type table
    #[serde(default = "default_phase_date_types")]
    pub phase_date_types: OrderedPhaseDateTypes,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            applications: Vec::new(),
            phases: Vec::new(),
            dates: Vec::new(),
            phase_date_types: default_phase_date_types(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    pub(crate) applications: IndexMap<ApplicationId, ApplicationStatus>,
    pub(crate) phases: IndexMap<(ApplicationId, PhaseId), PhaseStatus>,
    pub(crate) dates: IndexMap<(ApplicationId, DateType), Option<DateTime<Utc>>>,
    pub(crate) phase_date_types: OrderedPhaseDateTypes,
}

impl StoreState {
    fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut state = Self {
            phase_date_types: snapshot.phase_date_types,
            ..Self::default()
        };
        for app in snapshot.applications {
            for phase in PhaseId::ALL {
                state
                    .phases
                    .insert((app.id.clone(), *phase), PhaseStatus::NotStarted);
            }
            state.applications.insert(app.id, app.status);
        }
        for phase in snapshot.phases {
            state
                .phases
                .insert((phase.application_id, phase.phase_id), phase.phase_status);
        }
        for date in snapshot.dates {
            state
                .dates
                .insert((date.application_id, date.date_type), date.date_value);
        }
        state
    }

    fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            applications: self
                .applications
                .iter()
                .map(|(id, status)| ApplicationRecord {
                    id: id.clone(),
                    status: *status,
                })
                .collect(),
            phases: self
                .phases
                .iter()
                .map(|((application_id, phase_id), phase_status)| PhaseRecord {
                    application_id: application_id.clone(),
                    phase_id: *phase_id,
                    phase_status: *phase_status,
                })
                .collect(),
            dates: self
                .dates
                .iter()
                .map(|((application_id, date_type), date_value)| DateRecord {
                    application_id: application_id.clone(),
                    date_type: *date_type,
                    date_value: *date_value,
                })
                .collect(),
            phase_date_types: self.phase_date_types.clone(),
        }
    }
}

#[derive(Debug)]
struct Versioned {
    version: u64,
    state: StoreState,
}

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Versioned>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with the standard phase/date-type table
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    /// Store seeded from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned {
                version: 0,
                state: StoreState::from_snapshot(snapshot),
            })),
        }
    }

    /// Image of the committed state
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.read().state.to_snapshot()
    }

    /// Number of commits applied
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Begin a transaction over the committed state
    #[must_use]
    pub fn begin(&self) -> Transaction {
        let guard = self.inner.read();
        Transaction::new(guard.version, guard.state.clone())
    }

    /// Commit a transaction's writes.
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] when another transaction committed after
    /// this one began. The store is left unchanged.
    pub fn commit(&self, tx: Transaction) -> Result<(), StoreError> {
        if !tx.is_dirty() {
            tracing::debug!("transaction {} committed without writes", tx.id());
            return Ok(());
        }
        let mut guard = self.inner.write();
        if guard.version != tx.base_version() {
            return Err(StoreError::Conflict {
                transaction: tx.id(),
                expected: tx.base_version(),
                found: guard.version,
            });
        }
        let id = tx.id();
        let writes = tx.writes();
        guard.state = tx.into_state();
        guard.version += 1;
        tracing::debug!(
            "transaction {} committed {} writes at version {}",
            id,
            writes,
            guard.version
        );
        Ok(())
    }

    /// Create an application in its own transaction, every phase Not Started.
    ///
    /// # Errors
    ///
    /// [`StoreError::ApplicationExists`], or a commit conflict.
    pub fn create_application(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        let mut tx = self.begin();
        tx.create_application(id, status)?;
        self.commit(tx)
    }
}
