//! The per-case validation report (§3, §6) and the error-code taxonomy
//! every stage reports through.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The fixed taxonomy of error/warning codes (§6). Not a wire format —
/// just a closed set of tags stage implementations attach to entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    RequiredFieldMissing,
    FieldTooLong,
    FieldVeryLong,
    InvalidDate,
    SuspiciousDate,
    InvalidFormat,
    InvalidValue,
    EmptyValue,
    RuleViolation,
    MissingRelatedField,
    MissingRecommendedField,
    MissingEnrichment,
    PotentialDuplicate,
    LowQuality,
    IncompleteData,
    Critical,
}

impl ErrorCode {
    /// Whether this code alone forces a report into "should reject"
    /// territory (§3's `CRITICAL` / `REQUIRED_FIELD_MISSING` clause).
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, ErrorCode::RequiredFieldMissing | ErrorCode::Critical)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::RequiredFieldMissing => "REQUIRED_FIELD_MISSING",
            ErrorCode::FieldTooLong => "FIELD_TOO_LONG",
            ErrorCode::FieldVeryLong => "FIELD_VERY_LONG",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::SuspiciousDate => "SUSPICIOUS_DATE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::EmptyValue => "EMPTY_VALUE",
            ErrorCode::RuleViolation => "RULE_VIOLATION",
            ErrorCode::MissingRelatedField => "MISSING_RELATED_FIELD",
            ErrorCode::MissingRecommendedField => "MISSING_RECOMMENDED_FIELD",
            ErrorCode::MissingEnrichment => "MISSING_ENRICHMENT",
            ErrorCode::PotentialDuplicate => "POTENTIAL_DUPLICATE",
            ErrorCode::LowQuality => "LOW_QUALITY",
            ErrorCode::IncompleteData => "INCOMPLETE_DATA",
            ErrorCode::Critical => "CRITICAL",
        }
    }
}

/// A single error or warning entry attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
}

impl ReportEntry {
    #[must_use]
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// What one stage produced for one case.
#[derive(Debug, Clone, Default)]
pub struct StageOutcome {
    pub valid: bool,
    pub score: f64,
    /// Only the Quality/Completeness stage contributes a non-zero value
    /// here (§4.2's aggregation rule); all other stages report 0.
    pub completeness: f64,
    pub errors: Vec<ReportEntry>,
    pub warnings: Vec<ReportEntry>,
}

/// The aggregated outcome of running every registered stage on a case.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub case_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub valid: bool,
    pub overall_score: f64,
    pub completeness: f64,
    pub errors: Vec<ReportEntry>,
    pub warnings: Vec<ReportEntry>,
}

impl ValidationReport {
    /// §3's "should reject" predicate.
    #[must_use]
    pub fn should_reject(&self) -> bool {
        self.errors.iter().any(|e| e.code.is_blocking())
            || self.overall_score < 0.5
            || self.completeness < 0.6
    }

    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn total_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// A one-line human-readable summary (spec §6).
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "case {} {} — score {:.2}, completeness {:.2}, {} error(s), {} warning(s)",
            self.case_id,
            if self.valid { "valid" } else { "invalid" },
            self.overall_score,
            self.completeness,
            self.total_errors(),
            self.total_warnings(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(valid: bool, score: f64, completeness: f64, errors: Vec<ReportEntry>) -> ValidationReport {
        ValidationReport {
            case_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            duration_ms: 0,
            valid,
            overall_score: score,
            completeness,
            errors,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn rejects_on_critical_error() {
        let r = report(
            true,
            0.9,
            0.9,
            vec![ReportEntry::new("x", ErrorCode::Critical, "boom")],
        );
        assert!(r.should_reject());
    }

    #[test]
    fn rejects_on_low_score() {
        let r = report(true, 0.4, 0.9, Vec::new());
        assert!(r.should_reject());
    }

    #[test]
    fn rejects_on_low_completeness() {
        let r = report(true, 0.9, 0.5, Vec::new());
        assert!(r.should_reject());
    }

    #[test]
    fn accepts_otherwise() {
        let r = report(true, 0.8, 0.8, Vec::new());
        assert!(!r.should_reject());
    }

    #[test]
    fn summary_mentions_counts() {
        let r = report(
            false,
            0.1,
            0.1,
            vec![ReportEntry::new("x", ErrorCode::RequiredFieldMissing, "missing")],
        );
        let summary = r.summary();
        assert!(summary.contains("invalid"));
        assert!(summary.contains("1 error"));
    }
}
