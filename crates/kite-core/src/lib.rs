//! Kite-Core: the canonical case entity, the storage port it is read and
//! written through, and the crate-wide operational error taxonomy.
//!
//! This crate is the foundation the rest of the Kite case-law engine is
//! built on:
//!
//! - [`case`] — [`Case`], [`Party`], [`Judge`], and the enums that shape a
//!   judicial record (C1).
//! - [`citation`] — the [`Citation`] data type citations are stored as,
//!   independent of whatever extracted them (part of C1; extraction
//!   itself lives in `kite-citations`).
//! - [`storage`] — [`StoragePort`], the abstract contract every backend
//!   (a database, a test double, or the bundled in-memory store) must
//!   satisfy (C2).
//! - [`memory`] — [`InMemoryStorage`], the mandated in-memory reference
//!   implementation of that contract.
//! - [`cancellation`] — the ambient [`CancellationToken`] threaded through
//!   every long-running operation in the validation and search engines.
//! - [`error`] — [`StorageError`], the operational error type returned by
//!   the storage port.

pub mod cancellation;
pub mod case;
pub mod citation;
pub mod error;
pub mod memory;
pub mod storage;

pub use cancellation::CancellationToken;
pub use case::{Case, CaseStatus, CourtLevel, CourtType, Judge, Party, ShapeError};
pub use citation::{Citation, CitationFormat, CitationParts};
pub use error::StorageError;
pub use memory::InMemoryStorage;
pub use storage::{CaseFilter, OrderField, SearchHint, StoragePort, Transaction};
