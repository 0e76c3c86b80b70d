//! The storage port (C2): a behavioral contract the core consumes, not a
//! database. Any backend — in-memory, SQL, document store — implements
//! this trait; the core never assumes a particular one.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::case::{Case, Judge};
use crate::citation::Citation;
use crate::error::StorageError;

/// Field to order a case listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    CreatedAt,
    DecisionDate,
    CaseName,
    QualityScore,
}

/// Declarative filter passed to `list_cases`/`search_cases`. Default
/// ordering is most-recently-created first.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub ids: Option<Vec<Uuid>>,
    pub jurisdiction: Option<String>,
    pub court: Option<String>,
    pub court_level: Option<u8>,
    pub status: Option<crate::case::CaseStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub judges: Option<Vec<String>>,
    pub concepts: Option<Vec<String>>,
    pub min_quality: Option<f64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub order_by: Option<OrderField>,
    pub descending: bool,
}

impl CaseFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given case matches this filter's declarative
    /// predicates (everything except limit/offset/ordering, which are
    /// applied by the caller after matching).
    #[must_use]
    pub fn matches(&self, case: &Case) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&case.id) {
                return false;
            }
        }
        if let Some(j) = &self.jurisdiction {
            if &case.jurisdiction != j {
                return false;
            }
        }
        if let Some(c) = &self.court {
            if &case.court != c {
                return false;
            }
        }
        if let Some(level) = self.court_level {
            if case.court_level != level {
                return false;
            }
        }
        if let Some(status) = self.status {
            if case.status != status {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if case.decision_date.map(|d| d < from).unwrap_or(true) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if case.decision_date.map(|d| d > to).unwrap_or(true) {
                return false;
            }
        }
        if let Some(judges) = &self.judges {
            if !judges.iter().any(|j| case.judges.contains(j)) {
                return false;
            }
        }
        if let Some(concepts) = &self.concepts {
            if !concepts.iter().any(|c| case.concepts.contains(c)) {
                return false;
            }
        }
        if let Some(min_quality) = self.min_quality {
            if case.quality_score.unwrap_or(0.0) < min_quality {
                return false;
            }
        }
        true
    }
}

/// A free-text search request forwarded to `search_cases`, carrying
/// enough of the query engine's intent (§4.4) that the storage backend
/// can do an efficient first-pass recall.
#[derive(Debug, Clone, Default)]
pub struct SearchHint {
    pub text: String,
    pub fuzzy: bool,
    pub filter: CaseFilter,
}

/// A write-only commit/rollback handle for an in-flight transaction.
#[async_trait]
pub trait Transaction: Send + Sync {
    async fn commit(self: Box<Self>) -> Result<(), StorageError>;
    async fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}

/// The storage port. A purely in-memory implementation
/// ([`crate::memory::InMemoryStorage`]) satisfies this contract and is
/// mandated for tests.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn save_case(&self, case: Case) -> Result<(), StorageError>;
    async fn get_case(&self, id: Uuid) -> Result<Case, StorageError>;
    async fn update_case(&self, case: Case) -> Result<(), StorageError>;
    async fn delete_case(&self, id: Uuid) -> Result<(), StorageError>;
    async fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, StorageError>;
    async fn count_cases(&self, filter: &CaseFilter) -> Result<usize, StorageError>;

    async fn save_judge(&self, judge: Judge) -> Result<(), StorageError>;
    async fn get_judge(&self, id: Uuid) -> Result<Judge, StorageError>;
    async fn list_judges(&self) -> Result<Vec<Judge>, StorageError>;

    async fn save_citation(&self, citation: Citation) -> Result<(), StorageError>;
    async fn get_citations_for_case(&self, case_id: Uuid) -> Result<Vec<Citation>, StorageError>;
    async fn list_citations(&self) -> Result<Vec<Citation>, StorageError>;

    /// Returns a filtered candidate set for the given search hint. The
    /// query engine (C5) performs all relevance rescoring itself; this is
    /// recall only.
    async fn search_cases(&self, hint: &SearchHint) -> Result<Vec<Case>, StorageError>;

    async fn ping(&self) -> Result<(), StorageError>;
    async fn close(&self) -> Result<(), StorageError>;

    /// Optional write-isolation capability. Backends that don't support
    /// transactions may return `None`.
    async fn begin_tx(&self) -> Result<Option<Box<dyn Transaction>>, StorageError> {
        Ok(None)
    }
}
