//! Target date lookup seam

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use demos_model::{ApplicationId, DateType};

use crate::error::ResolveError;

/// Reads the recorded value of one date type for one application.
///
/// Each ordering or offset check calls this exactly once; results are
/// never cached between checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetDateResolver: Send + Sync {
    /// Recorded value, or `None` when the date is not set.
    async fn target_date_value(
        &self,
        application_id: &ApplicationId,
        date_type: DateType,
    ) -> Result<Option<DateTime<Utc>>, ResolveError>;
}
