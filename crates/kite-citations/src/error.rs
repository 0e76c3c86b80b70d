use thiserror::Error;

#[derive(Debug, Error)]
pub enum CitationError {
    #[error("citation graph has no node for case {0}")]
    UnknownCase(uuid::Uuid),
}
