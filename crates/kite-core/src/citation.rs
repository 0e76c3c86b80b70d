//! The `Citation` data type (C1). Extraction and normalization logic
//! lives in `kite-citations`; this crate only owns the shape, since the
//! storage port (C2) needs to save/get/list citations independent of the
//! extractor that produced them.

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The jurisdictional citation format a raw string was parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CitationFormat {
    Bluebook,
    Neutral,
    Ecli,
    Canadian,
    Uk,
    Irish,
    Australian,
    Other,
}

/// The structured parts a citation was parsed into. Not every format
/// populates every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CitationParts {
    pub volume: Option<String>,
    pub reporter: Option<String>,
    pub page: Option<String>,
    pub year: Option<String>,
    pub court: Option<String>,
    pub case_number: Option<String>,
    pub country: Option<String>,
}

/// A citation extracted from a citing case's text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Citation {
    pub raw: String,
    pub normalized: String,
    pub format: CitationFormat,
    pub parts: CitationParts,
    pub citing_case_id: Uuid,
    pub cited_case_id: Option<Uuid>,
    pub valid: bool,
    pub confidence: f64,
    pub extracted_at: DateTime<Utc>,
}

impl Citation {
    /// Constructs a citation, computing `valid` and clamping `confidence`
    /// per spec §3's invariant: a citation without both year and court is
    /// invalid.
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        format: CitationFormat,
        parts: CitationParts,
        citing_case_id: Uuid,
        confidence: f64,
    ) -> Self {
        let raw = raw.into();
        let valid = !raw.trim().is_empty() && (parts.year.is_some() || parts.court.is_some());
        Self {
            normalized: raw.clone(),
            raw,
            format,
            parts,
            citing_case_id,
            cited_case_id: None,
            valid,
            confidence: confidence.clamp(0.0, 1.0),
            extracted_at: Utc::now(),
        }
    }

    /// Checks the year invariant: `year ∈ [1600, now+1]` when set.
    #[must_use]
    pub fn year_in_range(&self) -> bool {
        match self.parts.year.as_deref().and_then(|y| y.parse::<i32>().ok()) {
            Some(year) => {
                let max = Utc::now().date_naive().year() + 1;
                (1600..=max).contains(&year)
            }
            None => true,
        }
    }
}
