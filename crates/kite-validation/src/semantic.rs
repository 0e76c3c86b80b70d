//! The Semantic stage (§4.2): date sanity, a case-number format
//! heuristic, court-level range, and non-empty party strings.

use async_trait::async_trait;
use kite_core::{Case, CancellationToken};
use regex::Regex;
use std::sync::OnceLock;

use crate::report::{ErrorCode, ReportEntry, StageOutcome};
use crate::score::score_from_entries;
use crate::stage::{StageKind, ValidationStage};

const MIN_CASE_NUMBER_LEN: usize = 4;
const MAX_CASE_NUMBER_LEN: usize = 50;

/// Five common case-number shapes, used only to recognize a well-formed
/// number; a number that matches none of them can still be accepted by
/// the digits+length heuristic below.
fn case_number_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^\d{1,6}/\d{4}$",                 // 123/2020
            r"^[A-Za-z]{2,5}-\d{2,6}$",         // CR-12345
            r"^\d{4}-[A-Za-z]{1,4}-\d{1,6}$",   // 2020-CV-1234
            r"^No\.?\s?\d+$",                   // No. 1234
            r"^\d{2,4}[A-Za-z]{1,3}\d{1,6}$",   // 20CV1234
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static case-number pattern is valid"))
        .collect()
    })
}

fn case_number_accepted(case_number: &str) -> bool {
    if case_number_patterns().iter().any(|re| re.is_match(case_number)) {
        return true;
    }
    let has_digit = case_number.chars().any(|c| c.is_ascii_digit());
    let len = case_number.chars().count();
    has_digit && (MIN_CASE_NUMBER_LEN..=MAX_CASE_NUMBER_LEN).contains(&len)
}

/// Checks date sanity, case-number shape, court-level range, and party
/// non-emptiness.
pub struct SemanticStage;

#[async_trait]
impl ValidationStage for SemanticStage {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn kind(&self) -> StageKind {
        StageKind::Semantic
    }

    async fn validate(&self, case: &Case, cancel: &CancellationToken) -> StageOutcome {
        if cancel.is_cancelled() {
            return StageOutcome::default();
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Some(decision_date) = case.decision_date {
            let today = chrono::Utc::now().date_naive();
            if decision_date > today {
                errors.push(ReportEntry::new(
                    "decision_date",
                    ErrorCode::InvalidDate,
                    "decision date is in the future",
                ));
            } else if decision_date < today - chrono::Duration::days(200 * 365) {
                warnings.push(ReportEntry::new(
                    "decision_date",
                    ErrorCode::SuspiciousDate,
                    "decision date is more than 200 years old",
                ));
            }
        }

        if !case.case_number.is_empty() && !case_number_accepted(&case.case_number) {
            warnings.push(ReportEntry::new(
                "case_number",
                ErrorCode::InvalidFormat,
                "case number does not match a recognized format",
            ));
        }

        if !(1..=5).contains(&case.court_level) {
            warnings.push(ReportEntry::new(
                "court_level",
                ErrorCode::InvalidValue,
                "court level outside 1..=5",
            ));
        }

        for (idx, party) in case.parties.iter().enumerate() {
            if party.name.trim().is_empty() {
                warnings.push(ReportEntry::new(
                    format!("parties[{idx}].name"),
                    ErrorCode::EmptyValue,
                    "party name is empty",
                ));
            }
        }

        StageOutcome {
            valid: errors.is_empty(),
            score: score_from_entries(&errors, &warnings),
            completeness: 0.0,
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_core::{Case, Party};

    #[tokio::test]
    async fn future_decision_date_is_an_error() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.decision_date = Some(chrono::Utc::now().date_naive() + chrono::Duration::days(5));
        let outcome = SemanticStage.validate(&case, &CancellationToken::new()).await;
        assert!(!outcome.valid);
    }

    #[tokio::test]
    async fn ancient_decision_date_is_a_warning() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.decision_date = Some(chrono::Utc::now().date_naive() - chrono::Duration::days(201 * 365));
        let outcome = SemanticStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.valid);
        assert!(outcome.warnings.iter().any(|w| w.code == ErrorCode::SuspiciousDate));
    }

    #[tokio::test]
    async fn recognized_case_number_formats_pass() {
        for number in ["123/2020", "CR-12345", "2020-CV-1234", "No. 1234", "20CV1234"] {
            let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
            case.case_number = number.to_string();
            let outcome = SemanticStage.validate(&case, &CancellationToken::new()).await;
            assert!(
                !outcome.warnings.iter().any(|w| w.code == ErrorCode::InvalidFormat),
                "expected {number} to be accepted"
            );
        }
    }

    #[tokio::test]
    async fn garbage_case_number_is_flagged() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.case_number = "???".to_string();
        let outcome = SemanticStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.code == ErrorCode::InvalidFormat));
    }

    #[tokio::test]
    async fn empty_party_name_is_flagged() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.parties.push(Party::new("", "Plaintiff"));
        let outcome = SemanticStage.validate(&case, &CancellationToken::new()).await;
        assert!(outcome.warnings.iter().any(|w| w.code == ErrorCode::EmptyValue));
    }
}
