//! The query engine (C5, §4.4): delegates recall to the storage port,
//! then rescoring, highlighting, and faceting happen entirely in memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use kite_core::{CancellationToken, Case, SearchHint, StoragePort};

use crate::error::SearchError;
use crate::query::{Query, SortField};

const MAX_HIGHLIGHTS: usize = 5;
const SNIPPET_CONTEXT_BEFORE: usize = 50;
const SNIPPET_MAX_LEN: usize = 120;
const MAX_FACET_VALUES: usize = 20;

/// One scored, highlighted hit.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    pub case: Case,
    pub score: f64,
    pub highlights: Vec<String>,
}

/// One value/count pair within a facet.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// The full engine response (§6).
#[derive(Debug, Clone)]
pub struct Response {
    pub results: Vec<ScoredResult>,
    pub total_hits: usize,
    pub search_time_ms: u64,
    pub facets: HashMap<String, Vec<FacetValue>>,
}

/// Runs queries against a [`StoragePort`].
pub struct QueryEngine {
    storage: Arc<dyn StoragePort>,
}

impl QueryEngine {
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub async fn execute(&self, query: &Query, cancel: &CancellationToken) -> Result<Response, SearchError> {
        let started = Instant::now();
        query.validate()?;

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let hint = SearchHint {
            text: query.text.clone(),
            fuzzy: matches!(query.query_type, crate::query::QueryType::Fuzzy),
            filter: {
                let mut filter = query.filter.clone();
                filter.limit = None;
                filter.offset = None;
                filter
            },
        };

        let candidates = self
            .storage
            .search_cases(&hint)
            .await
            .map_err(SearchError::StorageFailure)?;

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let terms: Vec<String> = query
            .text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut scored: Vec<ScoredResult> = candidates
            .iter()
            .map(|case| {
                let score = relevance_score(case, &terms);
                let highlights = highlight(case, &terms);
                ScoredResult {
                    case: case.clone(),
                    score,
                    highlights,
                }
            })
            .collect();

        sort_results(&mut scored, query);

        let total_hits = scored.len();
        let offset = query.pagination.offset;
        let limit = query.pagination.limit;
        let page: Vec<ScoredResult> = scored.into_iter().skip(offset).take(limit).collect();

        let facets = build_facets(&candidates, &query.facets);

        Ok(Response {
            results: page,
            total_hits,
            search_time_ms: started.elapsed().as_millis() as u64,
            facets,
        })
    }
}

/// §4.4's relevance formula.
fn relevance_score(case: &Case, terms: &[String]) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }

    let name = case.case_name.to_lowercase();
    let summary = case.summary.to_lowercase();
    let full_text = case.full_text.to_lowercase();

    let per_term_total: f64 = terms
        .iter()
        .map(|term| {
            fn as_score(flag: bool) -> f64 {
                if flag { 1.0 } else { 0.0 }
            }

            let in_name = name.contains(term.as_str());
            let in_summary = summary.contains(term.as_str());
            let in_full_text = full_text.contains(term.as_str());
            let in_concept = case.concepts.iter().any(|c| c.to_lowercase().contains(term.as_str()));

            3.0 * as_score(in_name)
                + 2.0 * as_score(in_summary)
                + 1.0 * as_score(in_full_text)
                + 2.5 * as_score(in_concept)
        })
        .sum();

    let base = per_term_total / terms.len() as f64;
    base * (1.0 + case.quality_score.unwrap_or(0.0))
}

fn sort_results(scored: &mut [ScoredResult], query: &Query) {
    match query.sort.field {
        SortField::Relevance => {
            scored.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap()
                    .then_with(|| a.case.id.cmp(&b.case.id))
            });
        }
        SortField::DecisionDate => {
            scored.sort_by(|a, b| a.case.decision_date.cmp(&b.case.decision_date).then_with(|| a.case.id.cmp(&b.case.id)));
        }
        SortField::CaseName => {
            scored.sort_by(|a, b| a.case.case_name.cmp(&b.case.case_name).then_with(|| a.case.id.cmp(&b.case.id)));
        }
        SortField::QualityScore => {
            scored.sort_by(|a, b| {
                a.case
                    .quality_score
                    .unwrap_or(0.0)
                    .partial_cmp(&b.case.quality_score.unwrap_or(0.0))
                    .unwrap()
                    .then_with(|| a.case.id.cmp(&b.case.id))
            });
        }
        SortField::CourtLevel => {
            scored.sort_by(|a, b| a.case.court_level.cmp(&b.case.court_level).then_with(|| a.case.id.cmp(&b.case.id)));
        }
    }

    if query.sort.descending && !matches!(query.sort.field, SortField::Relevance) {
        scored.reverse();
    } else if matches!(query.sort.field, SortField::Relevance) && !query.sort.descending {
        // Relevance defaults to descending; an explicit ascending request reverses it.
        scored.reverse();
    }
}

/// Builds up to [`MAX_HIGHLIGHTS`] snippets around the earliest match of
/// any term, scanning case name then summary (§4.4).
fn highlight(case: &Case, terms: &[String]) -> Vec<String> {
    if terms.is_empty() {
        return Vec::new();
    }

    let mut snippets = Vec::new();
    for field in [&case.case_name, &case.summary] {
        if snippets.len() >= MAX_HIGHLIGHTS {
            break;
        }
        if let Some(snippet) = snippet_for(field, terms) {
            snippets.push(snippet);
        }
    }
    snippets.truncate(MAX_HIGHLIGHTS);
    snippets
}

fn snippet_for(field: &str, terms: &[String]) -> Option<String> {
    let lower = field.to_lowercase();
    let earliest = terms
        .iter()
        .filter_map(|term| lower.find(term.as_str()).map(|pos| (pos, term)))
        .min_by_key(|(pos, _)| *pos)?;

    let (match_pos, _) = earliest;
    let start = match_pos.saturating_sub(SNIPPET_CONTEXT_BEFORE);
    let end = (match_pos + SNIPPET_MAX_LEN).min(field.len());

    let start = char_boundary_at_or_before(field, start);
    let end = char_boundary_at_or_after(field, end);

    let mut snippet = field[start..end].to_string();
    for term in terms {
        snippet = wrap_matches(&snippet, term);
    }

    if start > 0 {
        snippet = format!("…{snippet}");
    }
    if end < field.len() {
        snippet = format!("{snippet}…");
    }

    Some(snippet)
}

fn char_boundary_at_or_before(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn char_boundary_at_or_after(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn wrap_matches(text: &str, term: &str) -> String {
    if term.is_empty() {
        return text.to_string();
    }
    let title_case = title_case(term);
    let mut result = text.to_string();
    for needle in [term.to_string(), title_case] {
        if needle.is_empty() {
            continue;
        }
        result = replace_case_insensitive(&result, &needle, |m| format!("<em>{m}</em>"));
    }
    result
}

fn title_case(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn replace_case_insensitive(text: &str, needle: &str, wrap: impl Fn(&str) -> String) -> String {
    let lower_text = text.to_lowercase();
    let lower_needle = needle.to_lowercase();
    if lower_needle.is_empty() {
        return text.to_string();
    }

    let mut result = String::new();
    let mut search_from = 0;
    while let Some(rel) = lower_text[search_from..].find(&lower_needle) {
        let pos = search_from + rel;
        result.push_str(&text[search_from..pos]);
        let matched = &text[pos..pos + needle.len()];
        result.push_str(&wrap(matched));
        search_from = pos + needle.len();
    }
    result.push_str(&text[search_from..]);
    result
}

fn build_facets(cases: &[Case], requested: &[String]) -> HashMap<String, Vec<FacetValue>> {
    let mut facets = HashMap::new();

    for field in requested {
        let counts = match field.as_str() {
            "jurisdiction" => count_by(cases, |c| vec![c.jurisdiction.clone()]),
            "court" => count_by(cases, |c| vec![c.court.clone()]),
            "court_level" => count_by(cases, |c| vec![c.court_level.to_string()]),
            "year" => count_by(cases, |c| {
                c.decision_date.map(|d| d.format("%Y").to_string()).into_iter().collect()
            }),
            "concepts" => count_by(cases, |c| c.concepts.iter().cloned().collect()),
            _ => continue,
        };

        let mut values: Vec<FacetValue> = counts
            .into_iter()
            .map(|(value, count)| FacetValue { value, count })
            .collect();
        values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        values.truncate(MAX_FACET_VALUES);
        facets.insert(field.clone(), values);
    }

    facets
}

fn count_by(cases: &[Case], extract: impl Fn(&Case) -> Vec<String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for case in cases {
        for value in extract(case) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}
