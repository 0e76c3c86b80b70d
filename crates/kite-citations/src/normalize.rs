//! Citation normalization (C7, §4.6): reporter/court abbreviation
//! tables, year truncation, case-number zero-stripping, and
//! format-specific string regeneration.

use kite_core::{Citation, CitationFormat, CitationParts};

const REPORTER_TABLE: &[(&str, &str)] = &[
    ("u.s.", "U.S."),
    ("us", "U.S."),
    ("f.2d", "F.2d"),
    ("f2d", "F.2d"),
    ("f.3d", "F.3d"),
    ("f3d", "F.3d"),
    ("f.supp.", "F. Supp."),
    ("fsupp", "F. Supp."),
    ("s.ct.", "S. Ct."),
    ("sct", "S. Ct."),
    ("l.ed.", "L. Ed."),
    ("led", "L. Ed."),
];

fn canonical_key(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

fn normalize_reporter(reporter: &str) -> String {
    let key = canonical_key(reporter);
    REPORTER_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| (*v).to_string())
        .unwrap_or_else(|| reporter.trim().to_string())
}

fn normalize_court(court: &str) -> String {
    court.trim().to_uppercase()
}

fn normalize_year(year: &str) -> String {
    year.chars().filter(|c| c.is_ascii_digit()).take(4).collect()
}

fn normalize_case_number(number: &str) -> String {
    let trimmed = number.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

fn normalize_parts(parts: &CitationParts) -> CitationParts {
    CitationParts {
        volume: parts.volume.clone(),
        reporter: parts.reporter.as_deref().map(normalize_reporter),
        page: parts.page.clone(),
        year: parts.year.as_deref().map(normalize_year),
        court: parts.court.as_deref().map(normalize_court),
        case_number: parts.case_number.as_deref().map(normalize_case_number),
        country: parts.country.as_deref().map(|c| c.trim().to_uppercase()),
    }
}

fn render(format: CitationFormat, parts: &CitationParts, fallback: &str) -> String {
    match format {
        CitationFormat::Bluebook => match (&parts.volume, &parts.reporter, &parts.page, &parts.year) {
            (Some(v), Some(r), Some(p), Some(y)) => format!("{v} {r} {p} ({y})"),
            _ => fallback.to_string(),
        },
        CitationFormat::Neutral | CitationFormat::Uk | CitationFormat::Irish | CitationFormat::Australian => {
            match (&parts.year, &parts.court, &parts.case_number) {
                (Some(y), Some(c), Some(n)) => format!("[{y}] {c} {n}"),
                _ => fallback.to_string(),
            }
        }
        CitationFormat::Ecli => match (&parts.country, &parts.court, &parts.year, &parts.case_number) {
            (Some(co), Some(c), Some(y), Some(n)) => format!("ECLI:{co}:{c}:{y}:{n}"),
            _ => fallback.to_string(),
        },
        CitationFormat::Canadian => match (&parts.year, &parts.court, &parts.case_number) {
            (Some(y), Some(c), Some(n)) => format!("{y} {c} {n}"),
            _ => fallback.to_string(),
        },
        CitationFormat::Other => fallback.to_string(),
    }
}

/// Normalizes a citation's parts and regenerates `normalized`.
/// Idempotent: `normalize(normalize(c)) == normalize(c)`.
#[must_use]
pub fn normalize(citation: &Citation) -> Citation {
    let parts = normalize_parts(&citation.parts);
    let normalized = render(citation.format, &parts, &citation.raw);

    Citation {
        normalized,
        parts,
        ..citation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn citation(format: CitationFormat, parts: CitationParts) -> Citation {
        Citation::new("raw", format, parts, Uuid::new_v4(), 0.9)
    }

    #[test]
    fn bluebook_normalizes_to_template() {
        let parts = CitationParts {
            volume: Some("410".to_string()),
            reporter: Some("U.S.".to_string()),
            page: Some("113".to_string()),
            year: Some("1973".to_string()),
            ..CitationParts::default()
        };
        let normalized = normalize(&citation(CitationFormat::Bluebook, parts));
        assert_eq!(normalized.normalized, "410 U.S. 113 (1973)");
    }

    #[test]
    fn reporter_abbreviations_map_to_canonical_form() {
        let parts = CitationParts {
            volume: Some("1".to_string()),
            reporter: Some("f2d".to_string()),
            page: Some("1".to_string()),
            year: Some("1990".to_string()),
            ..CitationParts::default()
        };
        let normalized = normalize(&citation(CitationFormat::Bluebook, parts));
        assert!(normalized.normalized.contains("F.2d"));
    }

    #[test]
    fn case_number_leading_zeros_are_stripped() {
        let parts = CitationParts {
            year: Some("2020".to_string()),
            court: Some("uksc".to_string()),
            case_number: Some("007".to_string()),
            ..CitationParts::default()
        };
        let normalized = normalize(&citation(CitationFormat::Uk, parts));
        assert_eq!(normalized.normalized, "[2020] UKSC 7");
    }

    #[test]
    fn all_zero_case_number_becomes_zero() {
        assert_eq!(normalize_case_number("000"), "0");
    }

    #[test]
    fn missing_required_parts_falls_back_to_raw() {
        let parts = CitationParts {
            year: Some("2020".to_string()),
            ..CitationParts::default()
        };
        let c = citation(CitationFormat::Uk, parts);
        let normalized = normalize(&c);
        assert_eq!(normalized.normalized, c.raw);
    }

    #[test]
    fn normalization_is_idempotent() {
        let parts = CitationParts {
            year: Some("2020".to_string()),
            court: Some("uksc".to_string()),
            case_number: Some("07".to_string()),
            ..CitationParts::default()
        };
        let once = normalize(&citation(CitationFormat::Uk, parts));
        let twice = normalize(&once);
        assert_eq!(once.normalized, twice.normalized);
        assert_eq!(once.parts, twice.parts);
    }
}
