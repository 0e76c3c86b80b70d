//! Format-aware citation extraction (C7, §4.6). One regex per
//! jurisdictional format, compiled once at construction time.

use std::collections::HashSet;

use kite_core::{Case, Citation, CitationFormat, CitationParts};
use regex::Regex;

/// Compiles and owns every supported format's pattern.
pub struct CitationExtractor {
    bluebook: Regex,
    neutral: Regex,
    ecli: Regex,
    canadian: Regex,
    uk: Regex,
    irish: Regex,
    australian: Regex,
}

impl CitationExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bluebook: Regex::new(
                r"(?P<volume>\d+)\s+(?P<reporter>[A-Z][A-Za-z.]*(?:\s[A-Z][A-Za-z.]*)?)\s+(?P<page>\d+)\s*\(\s*(?:[A-Za-z.]+\s+)?(?P<year>\d{4})\s*\)",
            )
            .expect("static bluebook pattern is valid"),
            neutral: Regex::new(r"\[(?P<year>\d{4})\]\s+(?P<court>[A-Z]{2,})\s+(?P<number>\d+)")
                .expect("static neutral pattern is valid"),
            ecli: Regex::new(r"ECLI:(?P<country>[A-Z]{2}):(?P<court>[A-Z0-9.]+):(?P<year>\d{4}):(?P<number>\d+)")
                .expect("static ECLI pattern is valid"),
            canadian: Regex::new(
                r"(?P<year>\d{4})\s+(?P<court>SCC|FCA|FC|ONCA|BCCA|ABCA|QCCA|SKCA|MBCA|NSCA|NBCA|PECA|NLCA|NWTCA|NUCA|YKCA)\s+(?P<number>\d+)",
            )
            .expect("static Canadian pattern is valid"),
            uk: Regex::new(
                r"\[(?P<year>\d{4})\]\s+(?P<court>UKSC|UKPC|EWCA|EWHC|EWFC|EWCOP)(?:\s+(?P<division>Civ|Crim|Admin|Ch|Fam|Pat|Comm|QB|TCC))?\s+(?P<number>\d+)",
            )
            .expect("static UK pattern is valid"),
            irish: Regex::new(r"\[(?P<year>\d{4})\]\s+(?P<court>IESC|IECA|IEHC|IEIC)\s+(?P<number>\d+)")
                .expect("static Irish pattern is valid"),
            australian: Regex::new(
                r"\[(?P<year>\d{4})\]\s+(?P<court>HCA|FCAFC|FCA|NSWCA|VCA|QCA|WASCA|SASCFC|TASFC|ACTCA|NTCA)\s+(?P<number>\d+)",
            )
            .expect("static Australian pattern is valid"),
        }
    }

    /// Extracts every recognized citation from arbitrary UTF-8 text. Does
    /// not set `citing_case_id`; use [`Self::extract_from_case`] for that.
    #[must_use]
    pub fn extract_from_text(&self, text: &str) -> Vec<Citation> {
        let citing_case_id = uuid::Uuid::nil();
        let mut citations = Vec::new();

        citations.extend(self.extract_format(text, &self.bluebook, CitationFormat::Bluebook, citing_case_id, parse_bluebook));
        citations.extend(self.extract_format(text, &self.neutral, CitationFormat::Neutral, citing_case_id, parse_neutral));
        citations.extend(self.extract_format(text, &self.ecli, CitationFormat::Ecli, citing_case_id, parse_ecli));
        citations.extend(self.extract_format(text, &self.canadian, CitationFormat::Canadian, citing_case_id, parse_canadian));
        citations.extend(self.extract_format(text, &self.uk, CitationFormat::Uk, citing_case_id, parse_uk));
        citations.extend(self.extract_format(text, &self.irish, CitationFormat::Irish, citing_case_id, parse_irish));
        citations.extend(self.extract_format(text, &self.australian, CitationFormat::Australian, citing_case_id, parse_australian));

        citations
    }

    /// As [`Self::extract_from_text`], but over `case.full_text + " " +
    /// case.summary`, with `citing_case_id` set to `case.id` (§6).
    #[must_use]
    pub fn extract_from_case(&self, case: &Case) -> Vec<Citation> {
        let combined = format!("{} {}", case.full_text, case.summary);
        let mut citations = self.extract_from_text(&combined);
        for citation in &mut citations {
            citation.citing_case_id = case.id;
        }
        citations
    }

    fn extract_format(
        &self,
        text: &str,
        regex: &Regex,
        format: CitationFormat,
        citing_case_id: uuid::Uuid,
        parse: impl Fn(&regex::Captures) -> (CitationParts, f64),
    ) -> Vec<Citation> {
        let mut seen_raw = HashSet::new();
        let mut citations = Vec::new();

        for captures in regex.captures_iter(text) {
            let raw = captures.get(0).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
            if raw.is_empty() || !seen_raw.insert(raw.clone()) {
                continue;
            }

            let (parts, confidence) = parse(&captures);
            if parts.year.is_none() && parts.court.is_none() {
                continue;
            }

            citations.push(Citation::new(raw, format, parts, citing_case_id, confidence));
        }

        citations
    }
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn group(captures: &regex::Captures, name: &str) -> Option<String> {
    captures.name(name).map(|m| m.as_str().to_string())
}

fn parse_bluebook(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            volume: group(captures, "volume"),
            reporter: group(captures, "reporter"),
            page: group(captures, "page"),
            year: group(captures, "year"),
            ..CitationParts::default()
        },
        0.9,
    )
}

fn parse_neutral(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            year: group(captures, "year"),
            court: group(captures, "court"),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.8,
    )
}

fn parse_ecli(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            country: group(captures, "country"),
            court: group(captures, "court"),
            year: group(captures, "year"),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.95,
    )
}

fn parse_canadian(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            year: group(captures, "year"),
            court: group(captures, "court"),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.85,
    )
}

fn parse_uk(captures: &regex::Captures) -> (CitationParts, f64) {
    let court = match group(captures, "division") {
        Some(division) => format!("{} {}", captures.name("court").unwrap().as_str(), division),
        None => group(captures, "court").unwrap_or_default(),
    };
    (
        CitationParts {
            year: group(captures, "year"),
            court: Some(court),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.85,
    )
}

fn parse_irish(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            year: group(captures, "year"),
            court: group(captures, "court"),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.85,
    )
}

fn parse_australian(captures: &regex::Captures) -> (CitationParts, f64) {
    (
        CitationParts {
            year: group(captures, "year"),
            court: group(captures, "court"),
            case_number: group(captures, "number"),
            ..CitationParts::default()
        },
        0.85,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bluebook_extraction_matches_scenario() {
        let extractor = CitationExtractor::new();
        let citations = extractor.extract_from_text("See 410 U.S. 113 (1973) and cf.");
        let bluebook = citations.iter().find(|c| c.format == CitationFormat::Bluebook).unwrap();
        assert_eq!(bluebook.parts.volume.as_deref(), Some("410"));
        assert_eq!(bluebook.parts.reporter.as_deref(), Some("U.S."));
        assert_eq!(bluebook.parts.page.as_deref(), Some("113"));
        assert_eq!(bluebook.parts.year.as_deref(), Some("1973"));
    }

    #[test]
    fn neutral_and_uk_both_match_overlapping_citation() {
        let extractor = CitationExtractor::new();
        let citations = extractor.extract_from_text("[2023] UKSC 15");
        let neutral_hit = citations.iter().any(|c| c.format == CitationFormat::Neutral);
        let uk_hit = citations.iter().any(|c| c.format == CitationFormat::Uk);
        assert!(neutral_hit);
        assert!(uk_hit);
        assert!(citations.iter().all(|c| c.raw == "[2023] UKSC 15"));
    }

    #[test]
    fn empty_text_yields_no_citations() {
        let extractor = CitationExtractor::new();
        assert!(extractor.extract_from_text("").is_empty());
    }

    #[test]
    fn duplicate_raw_within_a_format_is_suppressed() {
        let extractor = CitationExtractor::new();
        let citations = extractor.extract_from_text("[2020] UKSC 1 ... later cites [2020] UKSC 1 again");
        let uk_count = citations.iter().filter(|c| c.format == CitationFormat::Uk).count();
        assert_eq!(uk_count, 1);
    }

    #[test]
    fn extract_from_case_sets_citing_case_id() {
        let extractor = CitationExtractor::new();
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.full_text = "Citing [2021] EWCA Civ 4.".to_string();
        case.id = uuid::Uuid::new_v4();
        let citations = extractor.extract_from_case(&case);
        assert!(!citations.is_empty());
        assert!(citations.iter().all(|c| c.citing_case_id == case.id));
    }

    #[test]
    fn ecli_extraction_populates_all_parts() {
        let extractor = CitationExtractor::new();
        let citations = extractor.extract_from_text("See ECLI:NL:HR:2019:123 for context.");
        let ecli = citations.iter().find(|c| c.format == CitationFormat::Ecli).unwrap();
        assert_eq!(ecli.parts.country.as_deref(), Some("NL"));
        assert_eq!(ecli.parts.court.as_deref(), Some("HR"));
        assert_eq!(ecli.parts.year.as_deref(), Some("2019"));
        assert_eq!(ecli.parts.case_number.as_deref(), Some("123"));
    }
}
