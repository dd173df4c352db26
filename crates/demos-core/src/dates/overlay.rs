//! Batch-over-store target resolution
//!
//! A mutation validates against the dates it is about to write: a value
//! present in the batch shadows the stored one, cleared values included.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use demos_dates::{ResolveError, TargetDateResolver};
use demos_model::{ApplicationDate, ApplicationId, DateType};

/// Resolves from the batch first, then from `fallback`
pub struct BatchDateResolver<'a, R: ?Sized> {
    application_id: &'a ApplicationId,
    batch: &'a [ApplicationDate],
    fallback: &'a R,
}

impl<'a, R: ?Sized> BatchDateResolver<'a, R> {
    /// Overlay `batch` (dates of `application_id`) on `fallback`
    #[must_use]
    pub const fn new(
        application_id: &'a ApplicationId,
        batch: &'a [ApplicationDate],
        fallback: &'a R,
    ) -> Self {
        Self {
            application_id,
            batch,
            fallback,
        }
    }

    fn from_batch(&self, application_id: &ApplicationId, date_type: DateType) -> Option<&ApplicationDate> {
        if application_id != self.application_id {
            return None;
        }
        // later entries override earlier ones
        self.batch.iter().rev().find(|date| date.date_type == date_type)
    }
}

#[async_trait]
impl<R> TargetDateResolver for BatchDateResolver<'_, R>
where
    R: TargetDateResolver + ?Sized,
{
    async fn target_date_value(
        &self,
        application_id: &ApplicationId,
        date_type: DateType,
    ) -> Result<Option<DateTime<Utc>>, ResolveError> {
        match self.from_batch(application_id, date_type) {
            Some(date) => Ok(date.date_value),
            None => self.fallback.target_date_value(application_id, date_type).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demos_store::{MemoryStore, TransactionDateResolver};
    use demos_model::ApplicationStatus;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_batch_shadows_store() {
        let store = MemoryStore::new();
        let id = ApplicationId::new("app-1");
        store
            .create_application(id.clone(), ApplicationStatus::PreSubmission)
            .unwrap();
        let mut tx = store.begin();
        tx.upsert_date(
            &id,
            ApplicationDate::new(DateType::ConceptStartDate, Some(utc("2025-01-01T05:00:00Z"))),
        )
        .unwrap();
        tx.upsert_date(
            &id,
            ApplicationDate::new(DateType::ConceptCompletionDate, Some(utc("2025-02-01T05:00:00Z"))),
        )
        .unwrap();

        let batch = [
            ApplicationDate::new(DateType::ConceptStartDate, Some(utc("2025-01-05T05:00:00Z"))),
            ApplicationDate::new(DateType::ConceptCompletionDate, None),
            ApplicationDate::new(DateType::ConceptStartDate, Some(utc("2025-01-06T05:00:00Z"))),
        ];
        let fallback = TransactionDateResolver::new(&tx);
        let resolver = BatchDateResolver::new(&id, &batch, &fallback);

        assert_eq!(
            resolver
                .target_date_value(&id, DateType::ConceptStartDate)
                .await
                .unwrap(),
            Some(utc("2025-01-06T05:00:00Z"))
        );
        assert_eq!(
            resolver
                .target_date_value(&id, DateType::ConceptCompletionDate)
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            resolver
                .target_date_value(&id, DateType::ReviewStartDate)
                .await
                .unwrap(),
            None
        );
    }
}
