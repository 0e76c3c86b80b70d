//! The validation pipeline (C3, §4.2): runs every registered stage
//! concurrently against one case, aggregates their outcomes, and offers
//! a bounded-concurrency batch entry point.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use kite_core::{Case, CancellationToken};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::business::BusinessRulesStage;
use crate::error::PipelineError;
use crate::quality::QualityStage;
use crate::report::{StageOutcome, ValidationReport};
use crate::semantic::SemanticStage;
use crate::stage::ValidationStage;
use crate::structural::StructuralStage;

/// Cases are processed at most this many at a time by
/// [`ValidationPipeline::validate_batch`] (§4.2).
const MAX_BATCH_CONCURRENCY: usize = 10;

/// Runs a set of [`ValidationStage`]s and aggregates their outcomes into
/// one [`ValidationReport`] per case.
///
/// Stages run independently and concurrently by default (§4.2): nothing
/// in the aggregation depends on execution order, so results are
/// identical whether stages happen to finish in order or not.
pub struct ValidationPipeline {
    stages: Vec<Arc<dyn ValidationStage>>,
}

impl ValidationPipeline {
    /// An empty pipeline; stages are added with [`Self::with_stage`].
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard four-stage pipeline (§4.2): Structural, Semantic,
    /// Business Rules, Quality. The Duplication stage is deliberately not
    /// included here — it operates across a batch of cases, not on one
    /// case in isolation, and is driven separately through
    /// [`crate::duplicate::DuplicateDetector`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_stage(StructuralStage)
            .with_stage(SemanticStage)
            .with_stage(BusinessRulesStage)
            .with_stage(QualityStage)
    }

    #[must_use]
    pub fn with_stage(mut self, stage: impl ValidationStage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Runs every stage against one case, concurrently, and aggregates.
    /// A token cancelled before or during the run fails the whole
    /// operation (§5(d)) rather than handing back a report built from
    /// stages' cooperative empty outcomes.
    pub async fn validate(
        &self,
        case: &Case,
        cancel: &CancellationToken,
    ) -> Result<ValidationReport, PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let started = Instant::now();

        let futures = self
            .stages
            .iter()
            .map(|stage| {
                let stage = Arc::clone(stage);
                let case = case.clone();
                let cancel = cancel.clone();
                async move { stage.validate(&case, &cancel).await }
            })
            .collect::<Vec<_>>();

        let outcomes: Vec<StageOutcome> = join_all(futures).await;

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        Ok(aggregate(case.id, &outcomes, started))
    }

    /// Validates a batch of cases with at most
    /// [`MAX_BATCH_CONCURRENCY`] running at once. If `cancel` fires
    /// before or during the fan-out, the whole batch fails with
    /// [`PipelineError::Cancelled`] instead of returning partial results
    /// (§5(d)), the same contract `QueryEngine::execute` gives §4.4.
    pub async fn validate_batch(
        &self,
        cases: &[Case],
        cancel: &CancellationToken,
    ) -> Result<Vec<ValidationReport>, PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let semaphore = Arc::new(Semaphore::new(MAX_BATCH_CONCURRENCY));

        let futures = cases.iter().map(|case| {
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("semaphore is never closed");
                self.validate(case, &cancel).await
            }
        });

        join_all(futures).await.into_iter().collect()
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

fn aggregate(case_id: Uuid, outcomes: &[StageOutcome], started: Instant) -> ValidationReport {
    let valid = outcomes.iter().all(|o| o.valid);

    let overall_score = if outcomes.is_empty() {
        0.0
    } else {
        outcomes.iter().map(|o| o.score).sum::<f64>() / outcomes.len() as f64
    };

    // Only the Quality stage reports a non-zero completeness; every other
    // stage defaults to 0.0, so summing picks out the single real value.
    let completeness = outcomes.iter().map(|o| o.completeness).sum::<f64>();

    let errors = outcomes.iter().flat_map(|o| o.errors.clone()).collect();
    let warnings = outcomes.iter().flat_map(|o| o.warnings.clone()).collect();

    ValidationReport {
        case_id,
        timestamp: chrono::Utc::now(),
        duration_ms: started.elapsed().as_millis() as u64,
        valid,
        overall_score,
        completeness,
        errors,
        warnings,
    }
}
