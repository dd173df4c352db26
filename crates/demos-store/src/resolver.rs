//! Target dates read through a transaction

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use demos_dates::{ResolveError, TargetDateResolver};
use demos_model::{ApplicationId, DateType};

use crate::transaction::Transaction;

/// Resolves target dates from a transaction's view of the store
#[derive(Debug, Clone, Copy)]
pub struct TransactionDateResolver<'a> {
    tx: &'a Transaction,
}

impl<'a> TransactionDateResolver<'a> {
    /// Read through `tx`
    #[must_use]
    pub const fn new(tx: &'a Transaction) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl TargetDateResolver for TransactionDateResolver<'_> {
    async fn target_date_value(
        &self,
        application_id: &ApplicationId,
        date_type: DateType,
    ) -> Result<Option<DateTime<Utc>>, ResolveError> {
        self.tx
            .date_value(application_id, date_type)
            .map_err(ResolveError::new)
    }
}
