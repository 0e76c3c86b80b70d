//! Operational errors surfaced by the query engine (§7): validation
//! failures and opaque storage failures, never a validation *outcome* —
//! those stay structured data on [`crate::engine::Response`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("search failed")]
    StorageFailure(#[from] kite_core::StorageError),
    #[error("search cancelled")]
    Cancelled,
}
