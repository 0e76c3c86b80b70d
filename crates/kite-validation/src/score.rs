//! Shared scoring helper for the stages that don't compute an explicit
//! quality score (Structural, Semantic, Business Rules): start at 1.0 and
//! deduct per finding, since the spec pins an explicit formula only for
//! the Quality/Completeness stage (§4.2) and leaves the others as
//! pass/fail-with-severity. This keeps `overall_score`'s arithmetic mean
//! (§4.2) meaningful instead of every non-quality stage reporting a flat
//! 1.0/0.0.

use crate::report::ReportEntry;

const ERROR_PENALTY: f64 = 0.3;
const WARNING_PENALTY: f64 = 0.05;

#[must_use]
pub fn score_from_entries(errors: &[ReportEntry], warnings: &[ReportEntry]) -> f64 {
    let penalty = errors.len() as f64 * ERROR_PENALTY + warnings.len() as f64 * WARNING_PENALTY;
    (1.0 - penalty).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ErrorCode;

    #[test]
    fn no_findings_scores_one() {
        assert_eq!(score_from_entries(&[], &[]), 1.0);
    }

    #[test]
    fn errors_reduce_score_more_than_warnings() {
        let error = ReportEntry::new("f", ErrorCode::InvalidValue, "m");
        let warning = ReportEntry::new("f", ErrorCode::SuspiciousDate, "m");
        let with_error = score_from_entries(&[error], &[]);
        let with_warning = score_from_entries(&[], &[warning]);
        assert!(with_error < with_warning);
    }

    #[test]
    fn score_never_goes_negative() {
        let errors: Vec<_> = (0..10)
            .map(|_| ReportEntry::new("f", ErrorCode::InvalidValue, "m"))
            .collect();
        assert_eq!(score_from_entries(&errors, &[]), 0.0);
    }
}
