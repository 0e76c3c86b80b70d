//! The canonical case record (C1) and the cheap, dependency-free shape
//! checks that live directly on it.
//!
//! The authoritative validator is the multi-stage pipeline in
//! `kite-validation`; [`Case::validate_shape`] only checks the invariants
//! that are pure functions of the struct itself, the way
//! `legalis-core::Statute::validate()` gives the data type its own sanity
//! check independent of any richer external validator.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::citation::Citation;

/// Ordinal court hierarchy: 1 = highest (supreme) ... 5 = lowest (local).
pub type CourtLevel = u8;

/// The kind of matter a case concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CourtType {
    Civil,
    Criminal,
    Constitutional,
    Administrative,
    Family,
    Commercial,
    Mixed,
}

/// Lifecycle status of a case record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaseStatus {
    Pending,
    Active,
    Closed,
    Appealed,
    Overturned,
}

/// A named participant in a case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Party {
    pub name: String,
    /// Free-text role, e.g. "Plaintiff", "Appellant", "Respondent".
    pub role: String,
    /// Entity type, e.g. "individual", "corporation".
    pub party_type: Option<String>,
    pub lawyers: Vec<String>,
}

impl Party {
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            party_type: None,
            lawyers: Vec::new(),
        }
    }
}

/// The canonical case entity. See spec §3 for field-by-field invariants.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Case {
    pub id: Uuid,
    pub case_number: String,
    pub case_name: String,
    pub alternate_names: Vec<String>,
    pub filing_date: Option<NaiveDate>,
    pub hearing_date: Option<NaiveDate>,
    /// The primary temporal key.
    pub decision_date: Option<NaiveDate>,
    pub court: String,
    pub court_level: CourtLevel,
    pub court_type: CourtType,
    pub jurisdiction: String,
    pub parties: Vec<Party>,
    pub judges: HashSet<String>,
    pub summary: String,
    pub headnotes: String,
    pub full_text: String,
    pub language: String,
    pub concepts: HashSet<String>,
    pub keywords: Vec<String>,
    pub status: CaseStatus,
    pub outcome: Option<String>,
    pub source_url: String,
    /// URL of a downloadable PDF rendition of the decision, when the
    /// source database publishes one alongside `source_url`.
    pub pdf_url: Option<String>,
    pub source_database: String,
    pub scraped_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub quality_score: Option<f64>,
    pub completeness_score: Option<f64>,
    pub ecli: Option<String>,
    pub citations: Vec<Citation>,
}

impl Case {
    /// Creates a minimal case with the required identifying fields.
    #[must_use]
    pub fn new(
        case_name: impl Into<String>,
        court: impl Into<String>,
        jurisdiction: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            case_number: String::new(),
            case_name: case_name.into(),
            alternate_names: Vec::new(),
            filing_date: None,
            hearing_date: None,
            decision_date: None,
            court: court.into(),
            court_level: 1,
            court_type: CourtType::Civil,
            jurisdiction: jurisdiction.into(),
            parties: Vec::new(),
            judges: HashSet::new(),
            summary: String::new(),
            headnotes: String::new(),
            full_text: String::new(),
            language: "en".to_string(),
            concepts: HashSet::new(),
            keywords: Vec::new(),
            status: CaseStatus::Pending,
            outcome: None,
            source_url: String::new(),
            pdf_url: None,
            source_database: String::new(),
            scraped_at: now,
            last_updated: now,
            quality_score: None,
            completeness_score: None,
            ecli: None,
            citations: Vec::new(),
        }
    }

    /// Refreshes `last_updated`; every mutation to a stored case must call
    /// this (spec §3 lifecycle).
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Clamps quality/completeness scores into `[0, 1]` per the data model
    /// invariant.
    pub fn clamp_scores(&mut self) {
        self.quality_score = self.quality_score.map(|s| s.clamp(0.0, 1.0));
        self.completeness_score = self.completeness_score.map(|s| s.clamp(0.0, 1.0));
    }

    /// Cheap, struct-only shape check. Does not replace the C3 pipeline.
    #[must_use]
    pub fn validate_shape(&self) -> Vec<ShapeError> {
        let mut errors = Vec::new();

        if self.case_name.trim().is_empty() {
            errors.push(ShapeError::MissingRequiredField("case_name"));
        }
        if self.court.trim().is_empty() {
            errors.push(ShapeError::MissingRequiredField("court"));
        }
        if self.jurisdiction.trim().is_empty() {
            errors.push(ShapeError::MissingRequiredField("jurisdiction"));
        }

        if !(1..=5).contains(&self.court_level) {
            errors.push(ShapeError::InvalidCourtLevel(self.court_level));
        }

        if let Some(decision_date) = self.decision_date {
            let today = Utc::now().date_naive();
            let earliest = today - chrono::Duration::days(200 * 365);
            if decision_date > today || decision_date < earliest {
                errors.push(ShapeError::DecisionDateOutOfRange(decision_date));
            }

            if let Some(filing_date) = self.filing_date {
                if filing_date > decision_date {
                    errors.push(ShapeError::FilingAfterDecision {
                        filing: filing_date,
                        decision: decision_date,
                    });
                }
            }
        }

        if !self.source_url.is_empty() && !is_absolute_url(&self.source_url) {
            errors.push(ShapeError::InvalidUrl(self.source_url.clone()));
        }

        errors
    }

    /// Whether this case currently satisfies every structural invariant.
    #[must_use]
    pub fn is_shape_valid(&self) -> bool {
        self.validate_shape().is_empty()
    }
}

/// A cheap structural defect found by [`Case::validate_shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    MissingRequiredField(&'static str),
    InvalidCourtLevel(CourtLevel),
    DecisionDateOutOfRange(NaiveDate),
    FilingAfterDecision {
        filing: NaiveDate,
        decision: NaiveDate,
    },
    InvalidUrl(String),
}

/// Syntactic (not reachability) check that a URL is absolute: has a
/// scheme followed by `://`.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    match url.find("://") {
        Some(idx) if idx > 0 => url[..idx].chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.'),
        _ => false,
    }
}

/// A judge record, CRUD-addressable through the storage port independent
/// of any one case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Judge {
    pub id: Uuid,
    pub name: String,
    pub courts: Vec<String>,
}

impl Judge {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            courts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_case_is_missing_required_fields_only_when_blank() {
        let case = Case::new("", "", "");
        let errors = case.validate_shape();
        assert!(errors.contains(&ShapeError::MissingRequiredField("case_name")));
        assert!(errors.contains(&ShapeError::MissingRequiredField("court")));
        assert!(errors.contains(&ShapeError::MissingRequiredField("jurisdiction")));
    }

    #[test]
    fn complete_case_is_shape_valid() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.court_level = 1;
        case.decision_date = Some(Utc::now().date_naive());
        assert!(case.is_shape_valid());
    }

    #[test]
    fn future_decision_date_is_rejected() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.decision_date = Some(Utc::now().date_naive() + chrono::Duration::days(10));
        assert!(
            case.validate_shape()
                .iter()
                .any(|e| matches!(e, ShapeError::DecisionDateOutOfRange(_)))
        );
    }

    #[test]
    fn filing_after_decision_is_rejected() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        let today = Utc::now().date_naive();
        case.decision_date = Some(today);
        case.filing_date = Some(today + chrono::Duration::days(1));
        assert!(
            case.validate_shape()
                .iter()
                .any(|e| matches!(e, ShapeError::FilingAfterDecision { .. }))
        );
    }

    #[test]
    fn url_must_be_absolute() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.source_url = "not-a-url".to_string();
        assert!(
            case.validate_shape()
                .iter()
                .any(|e| matches!(e, ShapeError::InvalidUrl(_)))
        );

        case.source_url = "https://example.com/case/1".to_string();
        assert!(!case.validate_shape().iter().any(|e| matches!(e, ShapeError::InvalidUrl(_))));
    }

    #[test]
    fn invalid_court_level_is_rejected() {
        let mut case = Case::new("Alpha v. Beta", "Supreme Court", "UK");
        case.court_level = 9;
        assert!(
            case.validate_shape()
                .iter()
                .any(|e| matches!(e, ShapeError::InvalidCourtLevel(9)))
        );
    }
}
