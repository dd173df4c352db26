//! Per-date-type validation rules
//!
//! Every set date must sit on its expected Eastern day boundary. Some date
//! types must additionally follow, or be a fixed offset from, another.

use demos_model::{ApplicationId, DateType};

use crate::checks::{
    check_input_date_expected_timestamp, check_input_date_greater_than,
    check_input_date_greater_than_or_equal, check_input_date_meets_offset, InputDate, TargetDate,
};
use crate::error::CheckError;
use crate::offset::DateOffset;
use crate::resolver::TargetDateResolver;

/// Relationship between an input date and another date type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// Strictly after
    GreaterThan(DateType),
    /// At or after
    GreaterThanOrEqual(DateType),
    /// Exactly the target plus an offset
    Offset(DateType, DateOffset),
}

impl DateRule {
    /// Date type the rule reads
    #[must_use]
    pub const fn target(&self) -> DateType {
        match self {
            Self::GreaterThan(target) | Self::GreaterThanOrEqual(target) | Self::Offset(target, _) => {
                *target
            }
        }
    }
}

const NONE: &[DateRule] = &[];

const CONCEPT_COMPLETION: &[DateRule] = &[DateRule::GreaterThan(DateType::ConceptStartDate)];

const COMPLETENESS_REVIEW_DUE: &[DateRule] = &[DateRule::Offset(
    DateType::StateApplicationSubmittedDate,
    DateOffset::days_to_end_of_day(15),
)];

const APPLICATION_INTAKE_COMPLETION: &[DateRule] = &[
    DateRule::GreaterThan(DateType::ApplicationIntakeStartDate),
    DateRule::GreaterThanOrEqual(DateType::ConceptCompletionDate),
];

const STATE_APPLICATION_DEEMED_COMPLETE: &[DateRule] =
    &[DateRule::GreaterThan(DateType::StateApplicationSubmittedDate)];

const FEDERAL_COMMENT_PERIOD_START: &[DateRule] = &[DateRule::Offset(
    DateType::StateApplicationDeemedComplete,
    DateOffset::days(1),
)];

const FEDERAL_COMMENT_PERIOD_END: &[DateRule] = &[DateRule::Offset(
    DateType::FederalCommentPeriodStartDate,
    DateOffset::days_to_end_of_day(30),
)];

const COMPLETENESS_COMPLETION: &[DateRule] = &[
    DateRule::GreaterThan(DateType::CompletenessStartDate),
    DateRule::GreaterThanOrEqual(DateType::ApplicationIntakeCompletionDate),
];

/// Ordering and offset rules for `date_type`, in evaluation order.
#[must_use]
pub const fn rules_for(date_type: DateType) -> &'static [DateRule] {
    match date_type {
        DateType::ConceptCompletionDate => CONCEPT_COMPLETION,
        DateType::CompletenessReviewDueDate => COMPLETENESS_REVIEW_DUE,
        DateType::ApplicationIntakeCompletionDate => APPLICATION_INTAKE_COMPLETION,
        DateType::StateApplicationDeemedComplete => STATE_APPLICATION_DEEMED_COMPLETE,
        DateType::FederalCommentPeriodStartDate => FEDERAL_COMMENT_PERIOD_START,
        DateType::FederalCommentPeriodEndDate => FEDERAL_COMMENT_PERIOD_END,
        DateType::CompletenessCompletionDate => COMPLETENESS_COMPLETION,
        _ => NONE,
    }
}

/// Run the boundary check and every rule for one input date, stopping at
/// the first failure.
///
/// # Errors
///
/// The first failing check's error.
pub async fn validate_input_date<R>(
    resolver: &R,
    application_id: &ApplicationId,
    input: &InputDate,
) -> Result<(), CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    check_input_date_expected_timestamp(input)?;
    for rule in rules_for(input.date_type) {
        let target = TargetDate::new(application_id, rule.target());
        match rule {
            DateRule::GreaterThan(_) => check_input_date_greater_than(resolver, input, target).await?,
            DateRule::GreaterThanOrEqual(_) => {
                check_input_date_greater_than_or_equal(resolver, input, target).await?;
            }
            DateRule::Offset(_, offset) => {
                check_input_date_meets_offset(resolver, input, target, offset).await?;
            }
        }
    }
    tracing::debug!(
        "validated {} for application {}",
        input.date_type,
        application_id
    );
    Ok(())
}

/// Validate a batch of input dates in order, stopping at the first failure.
///
/// # Errors
///
/// The first failing check's error.
pub async fn validate_input_dates<R>(
    resolver: &R,
    application_id: &ApplicationId,
    inputs: &[InputDate],
) -> Result<(), CheckError>
where
    R: TargetDateResolver + ?Sized,
{
    for input in inputs {
        validate_input_date(resolver, application_id, input).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::resolver::MockTargetDateResolver;
    use chrono::{DateTime, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_rule_table() {
        assert!(rules_for(DateType::ReviewStartDate).is_empty());
        assert_eq!(
            rules_for(DateType::CompletenessCompletionDate)
                .iter()
                .map(DateRule::target)
                .collect::<Vec<_>>(),
            [
                DateType::CompletenessStartDate,
                DateType::ApplicationIntakeCompletionDate
            ]
        );
    }

    #[tokio::test]
    async fn test_unruled_date_only_checks_boundary() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver.expect_target_date_value().never();

        let input = InputDate::new(DateType::ReviewStartDate, utc("2025-07-01T04:00:00Z"));
        validate_input_date(&resolver, &app, &input).await.unwrap();
    }

    #[tokio::test]
    async fn test_boundary_failure_skips_target_reads() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver.expect_target_date_value().never();

        let input = InputDate::new(DateType::ConceptCompletionDate, utc("2025-07-01T12:00:00Z"));
        let err = validate_input_date(&resolver, &app, &input).await.unwrap_err();
        assert!(matches!(err.as_validation(), Some(ValidationError::NotStartOfDay { .. })));
    }

    #[tokio::test]
    async fn test_completeness_review_due_date_across_dst() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver
            .expect_target_date_value()
            .withf(|_, dt| *dt == DateType::StateApplicationSubmittedDate)
            .times(1)
            .returning(|_, _| Ok(Some(utc("2025-03-01T05:00:00Z"))));

        // Mar 1 EST + 15 days lands on Mar 16 EDT, end of day
        let input = InputDate::new(
            DateType::CompletenessReviewDueDate,
            utc("2025-03-17T03:59:59.999Z"),
        );
        validate_input_date(&resolver, &app, &input).await.unwrap();
    }

    #[tokio::test]
    async fn test_due_date_on_spring_forward_day_is_unreachable() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver
            .expect_target_date_value()
            .withf(|_, dt| *dt == DateType::StateApplicationSubmittedDate)
            .times(1)
            .returning(|_, _| Ok(Some(utc("2025-02-22T05:00:00Z"))));

        // Feb 22 + 15 days is Mar 9, a 23-hour day: the elapsed 23:59:59.999
        // runs one hour past its end of day
        let end_of_mar_9 = InputDate::new(
            DateType::CompletenessReviewDueDate,
            utc("2025-03-10T03:59:59.999Z"),
        );
        let err = validate_input_date(&resolver, &app, &end_of_mar_9)
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::OffsetMismatch { expected, .. })
                if *expected == utc("2025-03-10T04:59:59.999Z")
        ));

        let mut resolver = MockTargetDateResolver::new();
        resolver.expect_target_date_value().never();
        let offset_result = InputDate::new(
            DateType::CompletenessReviewDueDate,
            utc("2025-03-10T04:59:59.999Z"),
        );
        let err = validate_input_date(&resolver, &app, &offset_result)
            .await
            .unwrap_err();
        assert!(matches!(err.as_validation(), Some(ValidationError::NotEndOfDay { .. })));
    }

    #[tokio::test]
    async fn test_each_rule_reads_its_target_once() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver
            .expect_target_date_value()
            .withf(|_, dt| *dt == DateType::ApplicationIntakeStartDate)
            .times(1)
            .returning(|_, _| Ok(Some(utc("2025-01-01T05:00:00Z"))));
        resolver
            .expect_target_date_value()
            .withf(|_, dt| *dt == DateType::ConceptCompletionDate)
            .times(1)
            .returning(|_, _| Ok(Some(utc("2025-01-10T05:00:00Z"))));

        let input = InputDate::new(
            DateType::ApplicationIntakeCompletionDate,
            utc("2025-01-10T05:00:00Z"),
        );
        validate_input_date(&resolver, &app, &input).await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_stops_at_first_failure() {
        let app = ApplicationId::new("app-1");
        let mut resolver = MockTargetDateResolver::new();
        resolver.expect_target_date_value().never();

        let inputs = [
            InputDate::new(DateType::ReviewStartDate, utc("2025-07-01T05:00:00Z")),
            InputDate::new(DateType::ConceptCompletionDate, utc("2025-07-01T04:00:00Z")),
        ];
        let err = validate_input_dates(&resolver, &app, &inputs).await.unwrap_err();
        assert_eq!(
            err.as_validation().map(ValidationError::date_type),
            Some(DateType::ReviewStartDate)
        );
    }
}
