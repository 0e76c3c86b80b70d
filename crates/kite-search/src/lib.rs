//! The query engine (C5) and suggestion/expansion subsystem (C6) for
//! the Kite case-law engine.
//!
//! [`engine::QueryEngine`] delegates candidate recall to a
//! [`kite_core::StoragePort`] and performs all relevance rescoring,
//! highlighting, and faceting in memory. [`suggest::SuggestionEngine`]
//! answers partial-text prefix queries; [`spellcheck::Spellchecker`] and
//! [`expansion::expand`] round out the C6 surface.

pub mod engine;
pub mod error;
pub mod expansion;
pub mod query;
pub mod spellcheck;
pub mod suggest;

pub use engine::{FacetValue, QueryEngine, Response, ScoredResult};
pub use error::SearchError;
pub use expansion::expand;
pub use query::{Pagination, Query, QueryBuilder, QueryType, Sort, SortField};
pub use spellcheck::Spellchecker;
pub use suggest::{similarity, Suggestion, SuggestionEngine, SuggestionType};
