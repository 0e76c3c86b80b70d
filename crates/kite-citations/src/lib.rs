//! Citation extraction, normalization, and the citation graph (C7) for
//! the Kite case-law engine.
//!
//! - [`extract::CitationExtractor`] recognizes seven jurisdictional
//!   citation formats in free text and returns [`kite_core::Citation`]
//!   values, never mutating the case it reads from.
//! - [`normalize::normalize`] rewrites a citation's parts through
//!   abbreviation tables and regenerates its normalized string;
//!   idempotent by construction.
//! - [`graph::CitationGraph`] builds a directed multigraph over case
//!   identifiers and computes PageRank-style influence scores, the most
//!   cited cases, shortest citation chains, and citation depth.

pub mod error;
pub mod extract;
pub mod graph;
pub mod normalize;

pub use error::CitationError;
pub use extract::CitationExtractor;
pub use graph::{CitationEdge, CitationGraph, CitationNode};
pub use normalize::normalize;
