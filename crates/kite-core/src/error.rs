//! Crate-wide operational error taxonomy.
//!
//! These are the *operational* errors of the case-law core (§7 of the
//! spec): storage unavailability, missing/duplicate identifiers, and
//! cancellation. Validation outcomes are never represented as `Err` here —
//! they are plain data (see `kite_validation::ValidationReport`).

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the storage port (C2).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No record exists for the given identifier.
    #[error("not found: {0}")]
    NotFound(Uuid),

    /// A record with the given identifier already exists.
    #[error("already exists: {0}")]
    AlreadyExists(Uuid),

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The calling operation was cancelled before it could complete.
    #[error("operation cancelled")]
    Cancelled,
}
