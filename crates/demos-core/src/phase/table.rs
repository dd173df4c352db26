//! Store-backed ordered table

use async_trait::async_trait;

use demos_model::OrderedPhaseDateTypes;
use demos_store::Transaction;

use super::PhaseDateTypeSource;
use crate::error::DemosError;

/// Reads the table through the transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct StorePhaseDateTypes;

#[async_trait]
impl PhaseDateTypeSource for StorePhaseDateTypes {
    async fn ordered_phase_date_types(
        &self,
        tx: &mut Transaction,
    ) -> Result<OrderedPhaseDateTypes, DemosError> {
        Ok(tx.ordered_phase_date_types())
    }
}
