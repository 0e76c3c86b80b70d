//! The Business Rules stage (§4.2): cross-field checks that encode
//! domain conventions rather than pure data shape.

use async_trait::async_trait;
use kite_core::{Case, CancellationToken, CourtType};

use crate::report::{ErrorCode, ReportEntry, StageOutcome};
use crate::score::score_from_entries;
use crate::stage::{StageKind, ValidationStage};

/// Cross-field domain rules.
pub struct BusinessRulesStage;

#[async_trait]
impl ValidationStage for BusinessRulesStage {
    fn name(&self) -> &'static str {
        "business_rules"
    }

    fn kind(&self) -> StageKind {
        StageKind::BusinessRules
    }

    async fn validate(&self, case: &Case, cancel: &CancellationToken) -> StageOutcome {
        if cancel.is_cancelled() {
            return StageOutcome::default();
        }

        let mut warnings = Vec::new();
        let court_lower = case.court.to_lowercase();

        if court_lower.contains("supreme") && case.court_level != 3 {
            warnings.push(ReportEntry::new(
                "court_level",
                ErrorCode::RuleViolation,
                "court name contains 'supreme' but court_level is not 3",
            ));
        } else if court_lower.contains("appeal") && case.court_level != 2 {
            warnings.push(ReportEntry::new(
                "court_level",
                ErrorCode::RuleViolation,
                "court name contains 'appeal' but court_level is not 2",
            ));
        }

        if case.pdf_url.is_none() && !case.source_url.is_empty() {
            warnings.push(ReportEntry::new(
                "pdf_url",
                ErrorCode::MissingRelatedField,
                "source_url present but pdf_url is absent",
            ));
        }

        let is_criminal = case.court_type == CourtType::Criminal
            || case.concepts.iter().any(|c| c.to_lowercase().contains("criminal"));
        if is_criminal && case.parties.len() < 2 {
            warnings.push(ReportEntry::new(
                "parties",
                ErrorCode::RuleViolation,
                "criminal-concept case should have at least 2 parties",
            ));
        }

        if case.court_level >= 2 && case.summary.trim().is_empty() {
            warnings.push(ReportEntry::new(
                "summary",
                ErrorCode::MissingRecommendedField,
                "court level >= 2 should have a summary",
            ));
        }

        if case.concepts.is_empty() {
            warnings.push(ReportEntry::new(
                "concepts",
                ErrorCode::MissingRecommendedField,
                "no legal concepts tagged",
            ));
        }

        StageOutcome {
            valid: true,
            score: score_from_entries(&[], &warnings),
            completeness: 0.0,
            errors: Vec::new(),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_core::{Case, Party};

    #[tokio::test]
    async fn supreme_court_mismatch_flagged() {
        let mut case = Case::new("Alpha v. Beta", "UK Supreme Court", "UK");
        case.court_level = 1;
        let outcome = BusinessRulesStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.field == "court_level"));
    }

    #[tokio::test]
    async fn supreme_at_level_three_is_clean() {
        let mut case = Case::new("Alpha v. Beta", "UK Supreme Court", "UK");
        case.court_level = 3;
        let outcome = BusinessRulesStage.validate(&case, &CancellationToken::new()).await;
        assert!(!outcome.warnings.iter().any(|w| w.field == "court_level"));
    }

    #[tokio::test]
    async fn url_without_pdf_is_flagged() {
        let mut case = Case::new("Alpha v. Beta", "Court", "UK");
        case.source_url = "https://example.com/x".to_string();
        let outcome = BusinessRulesStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.field == "pdf_url"));
    }

    #[tokio::test]
    async fn criminal_case_needs_two_parties() {
        let mut case = Case::new("State v. X", "Court", "UK");
        case.court_type = CourtType::Criminal;
        case.parties.push(Party::new("State", "Prosecutor"));
        let outcome = BusinessRulesStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.field == "parties"));
    }

    #[tokio::test]
    async fn empty_concepts_flagged() {
        let case = Case::new("Alpha v. Beta", "Court", "UK");
        let outcome = BusinessRulesStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.field == "concepts"));
    }
}
