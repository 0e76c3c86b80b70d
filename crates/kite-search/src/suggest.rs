//! Prefix suggestions (C6, §4.5): merges candidates from case names,
//! judges, a fixed court list, and a fixed concept list.

use std::sync::Arc;

use kite_core::{CaseFilter, StoragePort};

const MIN_PARTIAL_LEN: usize = 2;

const COMMON_COURTS: &[&str] = &[
    "Supreme Court",
    "Court of Appeal",
    "High Court",
    "District Court",
    "Crown Court",
    "Family Court",
    "Magistrates' Court",
    "Court of Session",
    "Privy Council",
];

const COMMON_CONCEPTS: &[&str] = &[
    "negligence",
    "duty of care",
    "breach of contract",
    "damages",
    "misrepresentation",
    "unjust enrichment",
    "trespass",
    "defamation",
    "nuisance",
    "estoppel",
    "vicarious liability",
    "causation",
    "remoteness",
    "mitigation",
    "fiduciary duty",
    "ultra vires",
    "judicial review",
    "natural justice",
    "proportionality",
    "res judicata",
];

/// The kind of entity a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionType {
    CaseName,
    Judge,
    Court,
    Concept,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub text: String,
    pub score: f64,
    pub suggestion_type: SuggestionType,
}

/// §4.5's similarity function: prefix matches score highest, substring
/// matches score by inverse length, anything else scores a flat 0.1.
#[must_use]
pub fn similarity(partial: &str, candidate: &str) -> f64 {
    let partial = partial.to_lowercase();
    let candidate_lower = candidate.to_lowercase();

    if candidate_lower.starts_with(&partial) {
        1.0 / (candidate_lower.len() as f64 - partial.len() as f64 + 1.0)
    } else if candidate_lower.contains(&partial) {
        0.5 / candidate_lower.len().max(1) as f64
    } else {
        0.1
    }
}

/// Stateless except for its backing storage; safe to share (§5).
pub struct SuggestionEngine {
    storage: Arc<dyn StoragePort>,
}

impl SuggestionEngine {
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub async fn suggest(&self, partial: &str, limit: usize) -> Vec<Suggestion> {
        if partial.chars().count() < MIN_PARTIAL_LEN {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        candidates.extend(self.case_name_candidates(partial, limit).await);
        candidates.extend(self.judge_candidates(partial, limit).await);
        candidates.extend(fixed_list_candidates(partial, COMMON_COURTS, SuggestionType::Court, 1.0));
        candidates.extend(fixed_list_candidates(partial, COMMON_CONCEPTS, SuggestionType::Concept, 1.0));

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        candidates.truncate(limit);
        candidates
    }

    async fn case_name_candidates(&self, partial: &str, limit: usize) -> Vec<Suggestion> {
        let mut filter = CaseFilter::new();
        filter.limit = Some(limit * 2);
        let Ok(cases) = self.storage.list_cases(&filter).await else {
            return Vec::new();
        };
        cases
            .iter()
            .filter(|c| c.case_name.to_lowercase().contains(&partial.to_lowercase()))
            .map(|c| Suggestion {
                text: c.case_name.clone(),
                score: similarity(partial, &c.case_name) * 2.0,
                suggestion_type: SuggestionType::CaseName,
            })
            .collect()
    }

    async fn judge_candidates(&self, partial: &str, limit: usize) -> Vec<Suggestion> {
        let Ok(judges) = self.storage.list_judges().await else {
            return Vec::new();
        };
        judges
            .iter()
            .filter(|j| j.name.to_lowercase().contains(&partial.to_lowercase()))
            .take(limit * 2)
            .map(|j| Suggestion {
                text: j.name.clone(),
                score: similarity(partial, &j.name) * 1.5,
                suggestion_type: SuggestionType::Judge,
            })
            .collect()
    }
}

fn fixed_list_candidates(
    partial: &str,
    list: &[&str],
    suggestion_type: SuggestionType,
    weight: f64,
) -> Vec<Suggestion> {
    list.iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial.to_lowercase()))
        .map(|candidate| Suggestion {
            text: (*candidate).to_string(),
            score: similarity(partial, candidate) * weight,
            suggestion_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_core::{Case, InMemoryStorage};

    #[tokio::test]
    async fn short_partial_returns_empty() {
        let storage: Arc<dyn StoragePort> = Arc::new(InMemoryStorage::new());
        let engine = SuggestionEngine::new(storage);
        assert!(engine.suggest("a", 10).await.is_empty());
    }

    #[tokio::test]
    async fn two_char_partial_returns_results() {
        let storage = InMemoryStorage::new();
        storage
            .save_case(Case::new("Alpha v. Beta", "Supreme Court", "UK"))
            .await
            .unwrap();
        let engine = SuggestionEngine::new(Arc::new(storage));
        let suggestions = engine.suggest("al", 10).await;
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn prefix_match_scores_higher_than_substring_match() {
        let prefix = similarity("al", "alpha");
        let substring = similarity("al", "legal matter");
        assert!(prefix > substring);
    }

    #[tokio::test]
    async fn court_suggestions_come_from_fixed_list() {
        let storage: Arc<dyn StoragePort> = Arc::new(InMemoryStorage::new());
        let engine = SuggestionEngine::new(storage);
        let suggestions = engine.suggest("supreme", 10).await;
        assert!(suggestions.iter().any(|s| s.suggestion_type == SuggestionType::Court));
    }
}
