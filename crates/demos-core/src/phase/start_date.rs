//! Start dates for newly started phases

use demos_dates::EasternNow;
use demos_model::{ApplicationDateInput, DateType, PhaseId};

use super::PhaseStartDateFactory;

/// Date type recording when `phase` started. Federal Comment has none.
#[must_use]
pub const fn phase_start_date_type(phase: PhaseId) -> Option<DateType> {
    match phase {
        PhaseId::Concept => Some(DateType::ConceptStartDate),
        PhaseId::ApplicationIntake => Some(DateType::ApplicationIntakeStartDate),
        PhaseId::Completeness => Some(DateType::CompletenessStartDate),
        PhaseId::FederalComment => None,
        PhaseId::SdgPreparation => Some(DateType::SdgPreparationStartDate),
        PhaseId::Review => Some(DateType::ReviewStartDate),
        PhaseId::ApprovalPackage => Some(DateType::ApprovalPackageStartDate),
        PhaseId::ApprovalSummary => Some(DateType::ApprovalSummaryStartDate),
    }
}

/// Start date of `phase`, valued at today's boundary for its date type.
#[must_use]
pub fn create_phase_start_date(phase: PhaseId, now: &EasternNow) -> Option<ApplicationDateInput> {
    let date_type = phase_start_date_type(phase)?;
    let value = now.get(date_type.expected_timestamp()).instant();
    Some(ApplicationDateInput::new(date_type, value))
}

/// [`create_phase_start_date`] as a factory
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseStartDates;

impl PhaseStartDateFactory for PhaseStartDates {
    fn create_phase_start_date(&self, phase: PhaseId, now: &EasternNow) -> Option<ApplicationDateInput> {
        create_phase_start_date(phase, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use demos_model::DateValue;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_start_date_is_today_start_of_day() {
        let now = EasternNow::at(utc("2025-07-04T18:30:00Z"));
        let date = create_phase_start_date(PhaseId::Review, &now).unwrap();
        assert_eq!(date.date_type, DateType::ReviewStartDate);
        assert_eq!(
            date.date_value,
            Some(DateValue::Instant(utc("2025-07-04T04:00:00Z")))
        );
    }

    #[test]
    fn test_federal_comment_has_no_start_date() {
        let now = EasternNow::at(utc("2025-07-04T18:30:00Z"));
        assert_eq!(PhaseStartDates.create_phase_start_date(PhaseId::FederalComment, &now), None);
    }

    #[test]
    fn test_every_start_date_type_belongs_to_its_phase() {
        let table = demos_store::default_phase_date_types();
        for phase in PhaseId::ALL {
            if let Some(date_type) = phase_start_date_type(*phase) {
                assert_eq!(table.phase_for(date_type), Some(*phase));
            }
        }
    }
}
