//! Store errors

use demos_model::{ApplicationId, PhaseId};
use uuid::Uuid;

/// Failure reading or writing the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No such application
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// Application id already taken
    #[error("application already exists: {0}")]
    ApplicationExists(ApplicationId),

    /// Application has no row for this phase
    #[error("phase {phase} not found for application {application_id}")]
    PhaseNotFound {
        /// Application
        application_id: ApplicationId,
        /// Missing phase
        phase: PhaseId,
    },

    /// Another transaction committed first
    #[error("transaction {transaction} began at version {expected} but the store is at version {found}")]
    Conflict {
        /// Rejected transaction
        transaction: Uuid,
        /// Version the transaction read
        expected: u64,
        /// Current store version
        found: u64,
    },
}
