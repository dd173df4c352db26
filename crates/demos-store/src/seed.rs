//! Reference data

use demos_model::{DateType, OrderedPhaseDateTypes, PhaseDateTypeEntry, PhaseId};

const TABLE: &[(PhaseId, DateType)] = &[
    (PhaseId::Concept, DateType::ConceptStartDate),
    (PhaseId::Concept, DateType::PreSubmissionSubmittedDate),
    (PhaseId::Concept, DateType::ConceptCompletionDate),
    (PhaseId::Concept, DateType::ConceptSkippedDate),
    (PhaseId::ApplicationIntake, DateType::ApplicationIntakeStartDate),
    (PhaseId::ApplicationIntake, DateType::StateApplicationSubmittedDate),
    (PhaseId::ApplicationIntake, DateType::CompletenessReviewDueDate),
    (PhaseId::ApplicationIntake, DateType::ApplicationIntakeCompletionDate),
    (PhaseId::Completeness, DateType::CompletenessStartDate),
    (PhaseId::Completeness, DateType::StateApplicationDeemedComplete),
    (PhaseId::Completeness, DateType::FederalCommentPeriodStartDate),
    (PhaseId::Completeness, DateType::FederalCommentPeriodEndDate),
    (PhaseId::Completeness, DateType::CompletenessCompletionDate),
    (PhaseId::FederalComment, DateType::FederalCommentPeriodStartDate),
    (PhaseId::FederalComment, DateType::FederalCommentPeriodEndDate),
    (PhaseId::SdgPreparation, DateType::SdgPreparationStartDate),
    (PhaseId::SdgPreparation, DateType::ExpectedApprovalDate),
    (PhaseId::SdgPreparation, DateType::SmeReviewDate),
    (PhaseId::SdgPreparation, DateType::FrtInitialMeetingDate),
    (PhaseId::SdgPreparation, DateType::BnpmtInitialMeetingDate),
    (PhaseId::SdgPreparation, DateType::SdgPreparationCompletionDate),
    (PhaseId::Review, DateType::ReviewStartDate),
    (PhaseId::Review, DateType::OgdApprovalToShareWithSmes),
    (PhaseId::Review, DateType::DraftApprovalPackageToPrep),
    (PhaseId::Review, DateType::DdmeApprovalReceived),
    (PhaseId::Review, DateType::StateConcurrence),
    (PhaseId::Review, DateType::BnPmtApprovalToSendToOmb),
    (PhaseId::Review, DateType::DraftApprovalPackageShared),
    (PhaseId::Review, DateType::ReceiveOmbConcurrence),
    (PhaseId::Review, DateType::ReceiveOgcLegalClearance),
    (PhaseId::Review, DateType::PackageSentForCommsClearance),
    (PhaseId::Review, DateType::CommsClearanceReceived),
    (PhaseId::Review, DateType::ReviewCompletionDate),
    (PhaseId::ApprovalPackage, DateType::ApprovalPackageStartDate),
    (PhaseId::ApprovalPackage, DateType::ApprovalPackageCompletionDate),
    (PhaseId::ApprovalSummary, DateType::ApprovalSummaryStartDate),
    (PhaseId::ApprovalSummary, DateType::ApplicationDetailsMarkedCompleteDate),
    (PhaseId::ApprovalSummary, DateType::ApplicationDemonstrationTypesMarkedCompleteDate),
    (PhaseId::ApprovalSummary, DateType::ApprovalSummaryCompletionDate),
];

/// The standard ordered phase/date-type table.
///
/// The Federal Comment period dates are listed under both Completeness and
/// Federal Comment; first match resolves them to Completeness.
#[must_use]
pub fn default_phase_date_types() -> OrderedPhaseDateTypes {
    TABLE
        .iter()
        .map(|&(phase, date_type)| PhaseDateTypeEntry::new(phase, date_type))
        .collect()
}
