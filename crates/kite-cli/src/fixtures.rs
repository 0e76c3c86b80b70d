//! Sample case corpus used by the `demo` and `ingest` commands. Not a
//! scraper — a hand-authored fixture standing in for one, the way the
//! core only needs a "scraper capability" per §9 and never implements a
//! real one itself.

use chrono::NaiveDate;
use kite_core::{Case, CaseStatus, CourtType, Party};

/// A handful of cases spanning several jurisdictions, used to exercise
/// validation, search relevance, and citation extraction together.
#[must_use]
pub fn sample_cases() -> Vec<Case> {
    vec![complete_uk_case(), sparse_case(), alpha_beta_case(), gamma_delta_case()]
}

/// Mirrors spec §8 scenario 3: a complete case expected to validate with
/// `overall_score >= 0.7` and `completeness >= 0.6`.
fn complete_uk_case() -> Case {
    let mut case = Case::new("Alpha v. Beta", "UK Supreme Court", "UK");
    case.case_number = "UKSC-2020-0042".to_string();
    case.court_level = 3;
    case.court_type = CourtType::Civil;
    case.decision_date = NaiveDate::from_ymd_opt(2020, 1, 1);
    case.filing_date = NaiveDate::from_ymd_opt(2019, 6, 1);
    case.summary = "A commercial dispute concerning breach of contract and negligence \
        in the supply of industrial components, considered at length by the \
        Supreme Court following an appeal from the Court of Appeal."
        .repeat(3);
    case.parties = vec![
        Party::new("Alpha Industries Ltd", "Appellant"),
        Party::new("Beta Manufacturing plc", "Respondent"),
    ];
    case.judges.insert("Lord Hale".to_string());
    case.concepts.insert("breach of contract".to_string());
    case.concepts.insert("negligence".to_string());
    case.concepts.insert("damages".to_string());
    case.source_url = "https://example.org/cases/uksc-2020-0042".to_string();
    case.source_database = "UK Case Law".to_string();
    case.full_text = "See 410 U.S. 113 (1973) for a comparable approach, and cf. [2020] UKSC 7.".to_string();
    case.status = CaseStatus::Closed;
    case
}

/// A deliberately sparse case that should fail or sit near the
/// validation pipeline's rejection boundary.
fn sparse_case() -> Case {
    let mut case = Case::new("Gamma v. Delta", "Local Court", "FR");
    case.court_level = 5;
    case.decision_date = NaiveDate::from_ymd_opt(2022, 3, 15);
    case
}

/// Spec §8 scenario 5's corpus: three cases whose names drive the
/// relevance-ordering example for the query text "alpha".
fn alpha_beta_case() -> Case {
    let mut case = Case::new("Alpha v. Beta", "High Court", "UK");
    case.court_level = 2;
    case.decision_date = NaiveDate::from_ymd_opt(2021, 5, 10);
    case.summary = "A property dispute.".to_string();
    case
}

fn gamma_delta_case() -> Case {
    let mut case = Case::new("Alpha beta gamma", "District Court", "UK");
    case.court_level = 4;
    case.decision_date = NaiveDate::from_ymd_opt(2018, 11, 2);
    case.summary = "An unrelated matter mentioning alpha only in passing.".to_string();
    case
}
