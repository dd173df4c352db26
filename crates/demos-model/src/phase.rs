//! Workflow phases and statuses

string_enum! {
    /// Workflow phase of an application, in workflow order.
    pub enum PhaseId {
        /// Concept
        Concept => "Concept",
        /// Application Intake
        ApplicationIntake => "Application Intake",
        /// Completeness
        Completeness => "Completeness",
        /// Federal Comment
        FederalComment => "Federal Comment",
        /// SDG Preparation
        SdgPreparation => "SDG Preparation",
        /// Review
        Review => "Review",
        /// Approval Package
        ApprovalPackage => "Approval Package",
        /// Approval Summary
        ApprovalSummary => "Approval Summary",
    }
}

string_enum! {
    /// Lifecycle status of one phase of one application.
    pub enum PhaseStatus {
        /// Not yet begun
        NotStarted => "Not Started",
        /// In progress
        Started => "Started",
        /// Finished normally
        Completed => "Completed",
        /// Bypassed
        Skipped => "Skipped",
        /// Declared incomplete; may be restarted
        Incomplete => "Incomplete",
    }
}

impl PhaseStatus {
    /// Completed or Skipped. Dates owned by a finished phase are locked.
    #[inline]
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

string_enum! {
    /// Overall status of an application.
    pub enum ApplicationStatus {
        /// Before the state submits
        PreSubmission => "Pre-Submission",
        /// Under federal review
        UnderReview => "Under Review",
        /// Approved
        Approved => "Approved",
        /// Denied
        Denied => "Denied",
        /// Withdrawn by the state
        Withdrawn => "Withdrawn",
        /// Paused
        OnHold => "On-hold",
    }
}
