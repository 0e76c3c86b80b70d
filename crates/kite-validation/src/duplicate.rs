//! The duplicate detector (C4): multi-fingerprint equivalence classes
//! with **no transitive closure**, plus an opportunistic similarity
//! scorer and a merge rule.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use kite_core::Case;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::fingerprint::{self, Fingerprints};

/// Which fingerprint tag a duplicate group was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintTag {
    CaseNumber,
    CaseName,
    CourtCaseNumber,
    Content,
    Structural,
}

/// The relationship type reported for a duplicate group. Only `Exact` is
/// produced by [`DuplicateDetector::find_groups`]; `Similar` is reserved
/// for callers that bucket the opportunistic similarity scorer's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateType {
    Exact,
    Similar,
}

/// A group of case ids that share a fingerprint tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    pub hash: String,
    pub case_ids: Vec<Uuid>,
    pub similarity: f64,
    pub kind: DuplicateType,
}

/// The result of applying the merge rule to a duplicate group: the
/// highest-quality case (ties broken by first-seen order) becomes
/// `primary`; every other id maps to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeSuggestion {
    pub primary: Uuid,
    pub merged: Vec<Uuid>,
}

/// Thread-safe fingerprint cache shared across concurrent validation
/// stages (§5): reads are unsynchronized beyond the lock itself, all
/// mutations take the exclusive writer lock.
pub struct DuplicateDetector {
    cache: Arc<RwLock<HashMap<Uuid, Fingerprints>>>,
}

impl DuplicateDetector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Computes (and caches) the fingerprints for a case.
    pub async fn fingerprint_of(&self, case: &Case) -> Fingerprints {
        if let Some(cached) = self.cache.read().await.get(&case.id) {
            return cached.clone();
        }
        let fp = fingerprint::fingerprint(case);
        self.cache.write().await.insert(case.id, fp.clone());
        fp
    }

    /// Drops every cached fingerprint. Safe to call concurrently with
    /// reads and with [`Self::size`].
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    /// Current cache size. Safe to call concurrently.
    pub async fn size(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Groups a batch of cases by shared fingerprint tag. There is no
    /// transitive closure: a group is exactly the set of case ids that
    /// share one tag's fingerprint value, nothing more.
    pub async fn find_groups(&self, cases: &[Case]) -> Vec<DuplicateGroup> {
        let mut by_tag: HashMap<(FingerprintTag, String), Vec<Uuid>> = HashMap::new();

        for case in cases {
            let fp = self.fingerprint_of(case).await;
            by_tag
                .entry((FingerprintTag::CaseNumber, fp.case_number.clone()))
                .or_default()
                .push(case.id);
            by_tag
                .entry((FingerprintTag::CaseName, fp.case_name.clone()))
                .or_default()
                .push(case.id);
            by_tag
                .entry((FingerprintTag::CourtCaseNumber, fp.court_case_number.clone()))
                .or_default()
                .push(case.id);
            if let Some(content) = fp.content.clone() {
                by_tag
                    .entry((FingerprintTag::Content, content))
                    .or_default()
                    .push(case.id);
            }
            by_tag
                .entry((FingerprintTag::Structural, fp.structural.clone()))
                .or_default()
                .push(case.id);
        }

        by_tag
            .into_iter()
            .filter_map(|((_tag, hash), mut ids)| {
                ids.dedup();
                if ids.len() < 2 {
                    return None;
                }
                Some(DuplicateGroup {
                    hash,
                    case_ids: ids,
                    similarity: 1.0,
                    kind: DuplicateType::Exact,
                })
            })
            .collect()
    }

    /// Picks the highest-quality case in a group as the merge primary
    /// (ties broken by first-seen order in `cases`).
    #[must_use]
    pub fn merge_suggestion(group: &DuplicateGroup, cases: &[Case]) -> MergeSuggestion {
        let lookup: HashMap<Uuid, &Case> = cases.iter().map(|c| (c.id, c)).collect();
        let mut primary: Option<Uuid> = None;
        let mut best_quality = f64::MIN;

        for id in &group.case_ids {
            if let Some(case) = lookup.get(id) {
                let quality = case.quality_score.unwrap_or(0.0);
                if quality > best_quality {
                    best_quality = quality;
                    primary = Some(*id);
                }
            }
        }

        let primary = primary.unwrap_or(group.case_ids[0]);
        let merged = group
            .case_ids
            .iter()
            .copied()
            .filter(|id| *id != primary)
            .collect();

        MergeSuggestion { primary, merged }
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Opportunistic pairwise similarity, averaging five components each in
/// `[0, 1]` (§4.3). Used outside the exact-fingerprint batch path, e.g.
/// to rank "possible duplicate" suggestions.
#[must_use]
pub fn similarity(a: &Case, b: &Case) -> f64 {
    let case_number = if !a.case_number.is_empty() && a.case_number == b.case_number {
        1.0
    } else {
        0.0
    };

    let court = if a.court == b.court { 1.0 } else { 0.0 };
    let jurisdiction = if a.jurisdiction == b.jurisdiction { 1.0 } else { 0.0 };

    let name_tokens = jaccard(&tokenize(&a.case_name), &tokenize(&b.case_name));
    let summary_tokens = jaccard(&tokenize(&a.summary), &tokenize(&b.summary));

    let date_closeness = match (a.decision_date, b.decision_date) {
        (Some(da), Some(db)) => date_closeness(da, db),
        _ => 0.0,
    };

    (case_number + name_tokens + court + jurisdiction + date_closeness + summary_tokens) / 6.0
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    if union == 0.0 { 0.0 } else { intersection / union }
}

fn date_closeness(a: NaiveDate, b: NaiveDate) -> f64 {
    let delta_days = (a - b).num_days().unsigned_abs() as f64;
    (1.0 - delta_days / 365.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn case_with(name: &str, court: &str, number: &str) -> Case {
        let mut c = Case::new(name, court, "UK");
        c.case_number = number.to_string();
        c
    }

    #[tokio::test]
    async fn duplicate_by_court_and_number_forms_one_group() {
        let detector = DuplicateDetector::new();
        let a = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        let b = case_with("Totally Different Name", "Supreme Court", "123/2020");
        let groups = detector.find_groups(&[a.clone(), b.clone()]).await;
        let group = groups
            .iter()
            .find(|g| g.case_ids.contains(&a.id) && g.case_ids.contains(&b.id))
            .expect("expected a shared group");
        assert_eq!(group.kind, DuplicateType::Exact);
        assert!(group.case_ids.len() >= 2);
    }

    #[tokio::test]
    async fn distinct_cases_form_no_group() {
        let detector = DuplicateDetector::new();
        let a = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        let b = case_with("Gamma v. Delta", "District Court", "999/2021");
        let groups = detector.find_groups(&[a, b]).await;
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let detector = DuplicateDetector::new();
        let a = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        detector.fingerprint_of(&a).await;
        assert_eq!(detector.size().await, 1);
        detector.clear().await;
        assert_eq!(detector.size().await, 0);
    }

    #[test]
    fn merge_picks_highest_quality_case() {
        let mut a = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        a.quality_score = Some(0.4);
        let mut b = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        b.quality_score = Some(0.9);

        let group = DuplicateGroup {
            hash: "h".to_string(),
            case_ids: vec![a.id, b.id],
            similarity: 1.0,
            kind: DuplicateType::Exact,
        };

        let suggestion = DuplicateDetector::merge_suggestion(&group, &[a.clone(), b.clone()]);
        assert_eq!(suggestion.primary, b.id);
        assert_eq!(suggestion.merged, vec![a.id]);
    }

    #[test]
    fn identical_cases_are_fully_similar() {
        let a = case_with("Alpha v. Beta", "Supreme Court", "123/2020");
        let mut b = a.clone();
        b.id = Uuid::new_v4();
        assert!((similarity(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn date_closeness_decays_with_distance() {
        let mut a = case_with("Alpha", "Court", "1");
        let mut b = case_with("Beta", "Court", "2");
        a.decision_date = Some(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        b.decision_date = Some(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(400));
        assert_eq!(date_closeness(a.decision_date.unwrap(), b.decision_date.unwrap()), 0.0);
    }
}
