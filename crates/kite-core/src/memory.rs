//! A purely in-memory [`StoragePort`] implementation. Mandated by spec
//! §4.1 for tests; also useful as a reference implementation of the
//! contract for anyone writing a real backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::case::{Case, Judge};
use crate::citation::Citation;
use crate::error::StorageError;
use crate::storage::{CaseFilter, OrderField, SearchHint, StoragePort, Transaction};

#[derive(Default)]
struct Inner {
    cases: HashMap<Uuid, Case>,
    /// Insertion order, most-recent last; reversed on read for the
    /// "most recently created first" default (§4.1).
    case_order: Vec<Uuid>,
    judges: HashMap<Uuid, Judge>,
    citations: Vec<Citation>,
    reachable: bool,
}

/// In-memory storage backend.
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                reachable: true,
                ..Inner::default()
            })),
        }
    }

    /// Test/ops hook: simulate the backing store going away. Subsequent
    /// calls fail with `StorageError::Unavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().await.reachable = !unavailable;
    }

    async fn check_reachable(&self) -> Result<(), StorageError> {
        if self.inner.read().await.reachable {
            Ok(())
        } else {
            Err(StorageError::Unavailable("in-memory store marked unavailable".to_string()))
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_filter_and_page(mut cases: Vec<Case>, filter: &CaseFilter) -> Vec<Case> {
    cases.retain(|c| filter.matches(c));

    match filter.order_by {
        Some(OrderField::DecisionDate) => {
            cases.sort_by_key(|c| c.decision_date);
        }
        Some(OrderField::CaseName) => {
            cases.sort_by(|a, b| a.case_name.cmp(&b.case_name));
        }
        Some(OrderField::QualityScore) => {
            cases.sort_by(|a, b| {
                a.quality_score
                    .unwrap_or(0.0)
                    .partial_cmp(&b.quality_score.unwrap_or(0.0))
                    .unwrap()
            });
        }
        Some(OrderField::CreatedAt) | None => {
            // Already in most-recently-created-first order from the caller.
        }
    }

    if filter.descending {
        cases.reverse();
    }

    let offset = filter.offset.unwrap_or(0);
    let cases = if offset < cases.len() {
        cases.split_off(offset)
    } else {
        Vec::new()
    };

    if let Some(limit) = filter.limit {
        let mut cases = cases;
        cases.truncate(limit);
        cases
    } else {
        cases
    }
}

#[async_trait]
impl StoragePort for InMemoryStorage {
    async fn save_case(&self, case: Case) -> Result<(), StorageError> {
        self.check_reachable().await?;
        let mut inner = self.inner.write().await;
        if inner.cases.contains_key(&case.id) {
            return Err(StorageError::AlreadyExists(case.id));
        }
        inner.case_order.push(case.id);
        inner.cases.insert(case.id, case);
        Ok(())
    }

    async fn get_case(&self, id: Uuid) -> Result<Case, StorageError> {
        self.check_reachable().await?;
        self.inner
            .read()
            .await
            .cases
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn update_case(&self, case: Case) -> Result<(), StorageError> {
        self.check_reachable().await?;
        let mut inner = self.inner.write().await;
        if !inner.cases.contains_key(&case.id) {
            return Err(StorageError::NotFound(case.id));
        }
        inner.cases.insert(case.id, case);
        Ok(())
    }

    async fn delete_case(&self, id: Uuid) -> Result<(), StorageError> {
        self.check_reachable().await?;
        let mut inner = self.inner.write().await;
        if inner.cases.remove(&id).is_none() {
            return Err(StorageError::NotFound(id));
        }
        inner.case_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn list_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, StorageError> {
        self.check_reachable().await?;
        let inner = self.inner.read().await;
        let ordered = most_recent_first(&inner);
        Ok(apply_filter_and_page(ordered, filter))
    }

    async fn count_cases(&self, filter: &CaseFilter) -> Result<usize, StorageError> {
        self.check_reachable().await?;
        let inner = self.inner.read().await;
        Ok(inner.cases.values().filter(|c| filter.matches(c)).count())
    }

    async fn save_judge(&self, judge: Judge) -> Result<(), StorageError> {
        self.check_reachable().await?;
        let mut inner = self.inner.write().await;
        if inner.judges.contains_key(&judge.id) {
            return Err(StorageError::AlreadyExists(judge.id));
        }
        inner.judges.insert(judge.id, judge);
        Ok(())
    }

    async fn get_judge(&self, id: Uuid) -> Result<Judge, StorageError> {
        self.check_reachable().await?;
        self.inner
            .read()
            .await
            .judges
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn list_judges(&self) -> Result<Vec<Judge>, StorageError> {
        self.check_reachable().await?;
        Ok(self.inner.read().await.judges.values().cloned().collect())
    }

    async fn save_citation(&self, citation: Citation) -> Result<(), StorageError> {
        self.check_reachable().await?;
        self.inner.write().await.citations.push(citation);
        Ok(())
    }

    async fn get_citations_for_case(&self, case_id: Uuid) -> Result<Vec<Citation>, StorageError> {
        self.check_reachable().await?;
        Ok(self
            .inner
            .read()
            .await
            .citations
            .iter()
            .filter(|c| c.citing_case_id == case_id)
            .cloned()
            .collect())
    }

    async fn list_citations(&self) -> Result<Vec<Citation>, StorageError> {
        self.check_reachable().await?;
        Ok(self.inner.read().await.citations.clone())
    }

    async fn search_cases(&self, hint: &SearchHint) -> Result<Vec<Case>, StorageError> {
        self.check_reachable().await?;
        let inner = self.inner.read().await;
        let ordered = most_recent_first(&inner);
        let text = hint.text.to_lowercase();
        let mut candidates: Vec<Case> = ordered
            .into_iter()
            .filter(|c| hint.filter.matches(c))
            .filter(|c| {
                text.is_empty()
                    || c.case_name.to_lowercase().contains(&text)
                    || c.summary.to_lowercase().contains(&text)
                    || c.full_text.to_lowercase().contains(&text)
            })
            .collect();

        if let Some(limit) = hint.filter.limit {
            let offset = hint.filter.offset.unwrap_or(0);
            candidates = candidates.into_iter().skip(offset).take(limit).collect();
        }
        Ok(candidates)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.check_reachable().await
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn begin_tx(&self) -> Result<Option<Box<dyn Transaction>>, StorageError> {
        self.check_reachable().await?;
        let snapshot = {
            let inner = self.inner.read().await;
            Inner {
                cases: inner.cases.clone(),
                case_order: inner.case_order.clone(),
                judges: inner.judges.clone(),
                citations: inner.citations.clone(),
                reachable: inner.reachable,
            }
        };
        Ok(Some(Box::new(InMemoryTransaction {
            inner: self.inner.clone(),
            snapshot: Some(snapshot),
        })))
    }
}

fn most_recent_first(inner: &Inner) -> Vec<Case> {
    inner
        .case_order
        .iter()
        .rev()
        .filter_map(|id| inner.cases.get(id).cloned())
        .collect()
}

/// A snapshot/restore transaction handle: `commit` is a no-op (writes
/// already landed directly in the shared map), `rollback` restores the
/// pre-transaction snapshot.
struct InMemoryTransaction {
    inner: Arc<RwLock<Inner>>,
    snapshot: Option<Inner>,
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        if let Some(snapshot) = self.snapshot {
            *self.inner.write().await = snapshot;
        }
        Ok(())
    }
}
