//! The five SHA-256 fingerprints used by the Duplication stage and the
//! batch duplicate detector (§4.3). Two cases "share a tag" iff their
//! fingerprint for that tag is equal and their ids differ.

use kite_core::Case;
use sha2::{Digest, Sha256};

const MIN_CONTENT_FINGERPRINT_SUMMARY_LEN: usize = 100;
const CONTENT_FINGERPRINT_PREFIX_LEN: usize = 500;

/// The five tagged fingerprints computed for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprints {
    pub case_number: String,
    pub case_name: String,
    pub court_case_number: String,
    /// Only populated when the case's summary exceeds the minimum length
    /// (§4.3).
    pub content: Option<String>,
    pub structural: String,
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Lowercases, collapses whitespace, and strips punctuation from a case
/// name, for stable name-based fingerprinting.
#[must_use]
pub fn canonicalize_case_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped: String = lower
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Computes all five tagged fingerprints for a case.
#[must_use]
pub fn fingerprint(case: &Case) -> Fingerprints {
    let canonical_name = canonicalize_case_name(&case.case_name);

    let content = if case.summary.chars().count() > MIN_CONTENT_FINGERPRINT_SUMMARY_LEN {
        let prefix: String = case.summary.chars().take(CONTENT_FINGERPRINT_PREFIX_LEN).collect();
        Some(sha256_hex(&prefix))
    } else {
        None
    };

    Fingerprints {
        case_number: sha256_hex(&case.case_number),
        case_name: sha256_hex(&canonical_name),
        court_case_number: sha256_hex(&format!("{}|{}", case.court, case.case_number)),
        content,
        structural: sha256_hex(&format!(
            "{}|{}|{}|{}",
            case.jurisdiction, case.court, canonical_name, case.court_level
        )),
    }
}
