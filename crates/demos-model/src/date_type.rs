//! Milestone date types and their expected Eastern timestamps

string_enum! {
    /// Which Eastern day boundary a date type's values must sit on.
    pub enum ExpectedTimestamp {
        /// 00:00:00.000 Eastern
        StartOfDay => "Start of Day",
        /// 23:59:59.999 Eastern
        EndOfDay => "End of Day",
    }
}

string_enum! {
    /// Milestone identifier recorded against an application.
    pub enum DateType {
        /// Concept phase opened
        ConceptStartDate => "Concept Start Date",
        /// Pre-submission document received
        PreSubmissionSubmittedDate => "Pre-Submission Submitted Date",
        /// Concept phase closed
        ConceptCompletionDate => "Concept Completion Date",
        /// Concept phase skipped
        ConceptSkippedDate => "Concept Skipped Date",
        /// Application Intake phase opened
        ApplicationIntakeStartDate => "Application Intake Start Date",
        /// State submitted the application
        StateApplicationSubmittedDate => "State Application Submitted Date",
        /// Completeness review deadline
        CompletenessReviewDueDate => "Completeness Review Due Date",
        /// Application Intake phase closed
        ApplicationIntakeCompletionDate => "Application Intake Completion Date",
        /// Completeness phase opened
        CompletenessStartDate => "Completeness Start Date",
        /// Application deemed complete
        StateApplicationDeemedComplete => "State Application Deemed Complete",
        /// Federal comment period opens
        FederalCommentPeriodStartDate => "Federal Comment Period Start Date",
        /// Federal comment period closes
        FederalCommentPeriodEndDate => "Federal Comment Period End Date",
        /// Completeness phase closed
        CompletenessCompletionDate => "Completeness Completion Date",
        /// SDG Preparation phase opened
        SdgPreparationStartDate => "SDG Preparation Start Date",
        /// Expected approval
        ExpectedApprovalDate => "Expected Approval Date",
        /// SME review
        SmeReviewDate => "SME Review Date",
        /// FRT initial meeting
        FrtInitialMeetingDate => "FRT Initial Meeting Date",
        /// BNPMT initial meeting
        BnpmtInitialMeetingDate => "BNPMT Initial Meeting Date",
        /// SDG Preparation phase closed
        SdgPreparationCompletionDate => "SDG Preparation Completion Date",
        /// Review phase opened
        ReviewStartDate => "Review Start Date",
        /// OGD approval to share with SMEs
        OgdApprovalToShareWithSmes => "OGD Approval to Share with SMEs",
        /// Draft approval package to prep
        DraftApprovalPackageToPrep => "Draft Approval Package to Prep",
        /// DDME approval received
        DdmeApprovalReceived => "DDME Approval Received",
        /// State concurrence
        StateConcurrence => "State Concurrence",
        /// BN PMT approval to send to OMB
        BnPmtApprovalToSendToOmb => "BN PMT Approval to Send to OMB",
        /// Draft approval package shared
        DraftApprovalPackageShared => "Draft Approval Package Shared",
        /// OMB concurrence received
        ReceiveOmbConcurrence => "Receive OMB Concurrence",
        /// OGC legal clearance received
        ReceiveOgcLegalClearance => "Receive OGC Legal Clearance",
        /// Package sent for COMMs clearance
        PackageSentForCommsClearance => "Package Sent for COMMs Clearance",
        /// COMMs clearance received
        CommsClearanceReceived => "COMMs Clearance Received",
        /// Review phase closed
        ReviewCompletionDate => "Review Completion Date",
        /// Approval Package phase opened
        ApprovalPackageStartDate => "Approval Package Start Date",
        /// Approval Package phase closed
        ApprovalPackageCompletionDate => "Approval Package Completion Date",
        /// Approval Summary phase opened
        ApprovalSummaryStartDate => "Approval Summary Start Date",
        /// Application details marked complete
        ApplicationDetailsMarkedCompleteDate => "Application Details Marked Complete Date",
        /// Demonstration types marked complete
        ApplicationDemonstrationTypesMarkedCompleteDate => "Application Demonstration Types Marked Complete Date",
        /// Approval Summary phase closed
        ApprovalSummaryCompletionDate => "Approval Summary Completion Date",
    }
}

impl DateType {
    /// Day boundary every value of this date type must land on.
    #[must_use]
    pub const fn expected_timestamp(self) -> ExpectedTimestamp {
        match self {
            Self::CompletenessReviewDueDate | Self::FederalCommentPeriodEndDate => {
                ExpectedTimestamp::EndOfDay
            }
            _ => ExpectedTimestamp::StartOfDay,
        }
    }
}
