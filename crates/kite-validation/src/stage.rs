//! The validator-as-capability pattern (§9's "Validator set as open
//! polymorphism"): each stage is a small trait object rather than a
//! hardcoded enum, so the pipeline's stage set can grow without changing
//! its aggregation logic.

use async_trait::async_trait;
use kite_core::{Case, CancellationToken};

use crate::report::StageOutcome;

/// Which of the five named stages (§4.2) a validator belongs to. Used
/// only for labeling reports; it does not gate execution order since
/// stages run independently (§4.2's concurrency contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Structural,
    Semantic,
    BusinessRules,
    Quality,
    Duplication,
}

/// A single validation stage.
#[async_trait]
pub trait ValidationStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> StageKind;

    /// Validates an immutable snapshot of a case. Implementations must
    /// not mutate any shared state except through their own
    /// synchronized interior (§4.2).
    async fn validate(&self, case: &Case, cancel: &CancellationToken) -> StageOutcome;
}
