//! Operational errors surfaced by the validation pipeline (§7): a
//! cancelled token, never a validation *outcome* — those stay structured
//! data on [`crate::report::ValidationReport`], the same separation
//! `kite_search::SearchError` draws between operational failure and
//! ranked results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation cancelled")]
    Cancelled,
}
