//! The Quality/Completeness stage (§4.2): the one stage that computes a
//! real completeness fraction, a content-quality assessment, and a
//! metadata-quality assessment, then averages the three.

use async_trait::async_trait;
use kite_core::{Case, CancellationToken};

use crate::report::{ErrorCode, ReportEntry, StageOutcome};
use crate::stage::{StageKind, ValidationStage};

const CORE_FIELD_COUNT: f64 = 5.0;
const IMPORTANT_FIELD_COUNT: f64 = 3.0;
const ENRICHMENT_FIELD_COUNT: f64 = 7.0;

/// The weighted-fraction-of-filled-fields completeness score (§4.2): 5
/// core fields, 3 important fields, 7 enrichment fields, each tier
/// weighted equally.
#[must_use]
pub fn completeness(case: &Case) -> f64 {
    let core_filled = [
        !case.case_name.trim().is_empty(),
        !case.court.trim().is_empty(),
        !case.jurisdiction.trim().is_empty(),
        case.decision_date.is_some(),
        !case.case_number.trim().is_empty(),
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64;

    let important_filled = [
        !case.summary.trim().is_empty(),
        !case.parties.is_empty(),
        !case.judges.is_empty(),
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64;

    let enrichment_filled = [
        !case.headnotes.trim().is_empty(),
        !case.full_text.trim().is_empty(),
        !case.concepts.is_empty(),
        !case.keywords.is_empty(),
        case.ecli.is_some(),
        case.outcome.is_some(),
        !case.citations.is_empty(),
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64;

    let core = core_filled / CORE_FIELD_COUNT;
    let important = important_filled / IMPORTANT_FIELD_COUNT;
    let enrichment = enrichment_filled / ENRICHMENT_FIELD_COUNT;

    (core + important + enrichment) / 3.0
}

/// Per-field text-quality assessment (§4.2): length bounds, repeated
/// characters, shouting caps, placeholder tokens, and special-character
/// density.
#[must_use]
pub fn text_field_quality(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let mut score: f64 = 1.0;
    let len = text.chars().count();

    if len < 10 {
        score -= 0.25;
    }

    if has_repeated_run(text, 5) {
        score -= 0.25;
    }

    if len > 20 && text.chars().any(|c| c.is_alphabetic()) && text == text.to_uppercase() {
        score -= 0.25;
    }

    if contains_placeholder(text) {
        score -= 0.4;
    }

    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    if len > 0 && special as f64 / len as f64 > 0.3 {
        score -= 0.25;
    }

    score.clamp(0.0, 1.0)
}

fn has_repeated_run(text: &str, run_len: usize) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(run_len).any(|w| w.iter().all(|c| *c == w[0]))
}

fn contains_placeholder(text: &str) -> bool {
    const PLACEHOLDERS: &[&str] = &["todo", "n/a", "tbd", "xxx", "placeholder", "lorem ipsum"];
    let lower = text.to_lowercase();
    PLACEHOLDERS.iter().any(|p| lower.contains(p))
}

/// Content-quality component: average of [`text_field_quality`] across
/// every populated free-text field.
#[must_use]
pub fn content_quality(case: &Case) -> f64 {
    let fields = [&case.case_name, &case.summary, &case.headnotes, &case.full_text];
    let scored: Vec<f64> = fields
        .iter()
        .filter(|f| !f.trim().is_empty())
        .map(|f| text_field_quality(f))
        .collect();

    if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    }
}

/// Metadata-quality component: fraction of satisfied metadata checks.
#[must_use]
pub fn metadata_quality(case: &Case) -> f64 {
    let date_valid = case
        .decision_date
        .map(|d| {
            let today = chrono::Utc::now().date_naive();
            d <= today && d >= today - chrono::Duration::days(200 * 365)
        })
        .unwrap_or(false);
    let court_level_valid = (1..=5).contains(&case.court_level);
    let jurisdiction_present = !case.jurisdiction.trim().is_empty();
    let court_type_present = true; // the field is mandatory and always set
    let concept_fraction = (case.concepts.len().min(10) as f64) / 10.0;
    let citation_fraction = (case.citations.len().min(10) as f64) / 10.0;
    let source_database_present = !case.source_database.trim().is_empty();

    fn as_score(flag: bool) -> f64 {
        if flag { 1.0 } else { 0.0 }
    }

    let checks = [
        as_score(date_valid),
        as_score(court_level_valid),
        as_score(jurisdiction_present),
        as_score(court_type_present),
        concept_fraction,
        citation_fraction,
        as_score(source_database_present),
    ];

    checks.iter().sum::<f64>() / checks.len() as f64
}

/// Computes completeness, content quality, and metadata quality, and
/// averages them into one stage score.
pub struct QualityStage;

#[async_trait]
impl ValidationStage for QualityStage {
    fn name(&self) -> &'static str {
        "quality"
    }

    fn kind(&self) -> StageKind {
        StageKind::Quality
    }

    async fn validate(&self, case: &Case, cancel: &CancellationToken) -> StageOutcome {
        if cancel.is_cancelled() {
            return StageOutcome::default();
        }

        let completeness = completeness(case);
        let content = content_quality(case);
        let metadata = metadata_quality(case);
        let score = (completeness + content + metadata) / 3.0;

        let mut warnings = Vec::new();
        if score < 0.5 {
            warnings.push(ReportEntry::new(
                "quality_score",
                ErrorCode::LowQuality,
                format!("overall quality score {score:.2} is below 0.5"),
            ));
        }
        if completeness < 0.6 {
            warnings.push(ReportEntry::new(
                "completeness",
                ErrorCode::IncompleteData,
                format!("completeness {completeness:.2} is below 0.6"),
            ));
        }

        StageOutcome {
            valid: true,
            score,
            completeness,
            errors: Vec::new(),
            warnings,
        }
    }
}
