//! Finished-phase date lock

use demos_model::{ApplicationDate, ApplicationId, DateType};
use demos_store::Transaction;

use crate::error::{DemosError, LockedDate};

/// Date types in `input` whose value differs from `existing`.
///
/// Cleared inputs always count as changing. Each date type is reported
/// once, in input order.
#[must_use]
pub fn filter_changing_date_types(input: &[ApplicationDate], existing: &[ApplicationDate]) -> Vec<DateType> {
    let mut changing = Vec::new();
    for date in input {
        if changing.contains(&date.date_type) {
            continue;
        }
        let current = existing
            .iter()
            .find(|stored| stored.date_type == date.date_type)
            .and_then(|stored| stored.date_value);
        let changed = match date.date_value {
            None => true,
            Some(value) => current != Some(value),
        };
        if changed {
            changing.push(date.date_type);
        }
    }
    changing
}

/// Reject changes to date types owned by a Completed or Skipped phase.
///
/// Every table entry pairing a finished phase with a changing date type is
/// reported, not only the first.
///
/// # Errors
///
/// [`DemosError::FinishedPhaseLock`], or the store's error.
pub fn validate_allowed_date_change_by_phase(
    tx: &Transaction,
    application_id: &ApplicationId,
    changing: &[DateType],
) -> Result<(), DemosError> {
    if changing.is_empty() {
        return Ok(());
    }
    let finished = tx.finished_phases(application_id)?;
    if finished.is_empty() {
        return Ok(());
    }

    let locked: Vec<LockedDate> = tx
        .ordered_phase_date_types()
        .iter()
        .filter(|entry| finished.contains(&entry.phase_id) && changing.contains(&entry.date_type_id))
        .map(|entry| LockedDate {
            date_type: entry.date_type_id,
            phase: entry.phase_id,
        })
        .collect();

    if locked.is_empty() {
        Ok(())
    } else {
        Err(DemosError::FinishedPhaseLock { locked })
    }
}
