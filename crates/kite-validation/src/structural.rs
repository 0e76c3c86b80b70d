//! The Structural stage (§4.2): required fields present, field-length
//! bounds.

use async_trait::async_trait;
use kite_core::{Case, CancellationToken};

use crate::report::{ErrorCode, ReportEntry, StageOutcome};
use crate::stage::{StageKind, ValidationStage};
use crate::score::score_from_entries;

const MAX_CASE_NAME_LEN: usize = 500;
const SUMMARY_WARN_LEN: usize = 10_000;

/// Checks required-field presence and field-length bounds.
pub struct StructuralStage;

#[async_trait]
impl ValidationStage for StructuralStage {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn kind(&self) -> StageKind {
        StageKind::Structural
    }

    async fn validate(&self, case: &Case, cancel: &CancellationToken) -> StageOutcome {
        if cancel.is_cancelled() {
            return StageOutcome::default();
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if case.id.is_nil() {
            errors.push(ReportEntry::new(
                "id",
                ErrorCode::RequiredFieldMissing,
                "case id is required",
            ));
        }
        if case.case_name.trim().is_empty() {
            errors.push(ReportEntry::new(
                "case_name",
                ErrorCode::RequiredFieldMissing,
                "case name is required",
            ));
        }
        if case.court.trim().is_empty() {
            errors.push(ReportEntry::new(
                "court",
                ErrorCode::RequiredFieldMissing,
                "court is required",
            ));
        }
        if case.jurisdiction.trim().is_empty() {
            errors.push(ReportEntry::new(
                "jurisdiction",
                ErrorCode::RequiredFieldMissing,
                "jurisdiction is required",
            ));
        }
        if case.decision_date.is_none() {
            errors.push(ReportEntry::new(
                "decision_date",
                ErrorCode::RequiredFieldMissing,
                "decision date is required",
            ));
        }

        if case.case_name.chars().count() > MAX_CASE_NAME_LEN {
            errors.push(ReportEntry::new(
                "case_name",
                ErrorCode::FieldTooLong,
                format!("case name exceeds {MAX_CASE_NAME_LEN} characters"),
            ));
        }

        if case.summary.chars().count() > SUMMARY_WARN_LEN {
            warnings.push(ReportEntry::new(
                "summary",
                ErrorCode::FieldVeryLong,
                format!("summary exceeds {SUMMARY_WARN_LEN} characters"),
            ));
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
