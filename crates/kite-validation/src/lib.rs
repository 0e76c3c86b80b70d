//! Concurrent multi-stage validation (C3) and duplicate detection (C4)
//! for the Kite case-law engine.
//!
//! [`pipeline::ValidationPipeline`] runs [`stage::ValidationStage`]
//! implementations concurrently against a [`kite_core::Case`] and
//! aggregates their [`report::StageOutcome`]s into one
//! [`report::ValidationReport`]. [`duplicate::DuplicateDetector`] finds
//! exact-fingerprint duplicate groups across a batch and offers an
//! opportunistic pairwise similarity scorer for everything else.

pub mod business;
pub mod duplicate;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod score;
pub mod semantic;
pub mod stage;
pub mod structural;

pub use business::BusinessRulesStage;
pub use duplicate::{DuplicateDetector, DuplicateGroup, DuplicateType, MergeSuggestion};
pub use error::PipelineError;
pub use fingerprint::{canonicalize_case_name, fingerprint, Fingerprints};
pub use pipeline::ValidationPipeline;
pub use quality::QualityStage;
pub use report::{ErrorCode, ReportEntry, StageOutcome, ValidationReport};
pub use semantic::SemanticStage;
pub use stage::{StageKind, ValidationStage};
pub use structural::StructuralStage;
