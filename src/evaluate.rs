//! Side-by-side strategy evaluation.
//!
//! [`StrategyEvaluator`] runs several strategies over one immutable model,
//! each on a freshly derived cost matrix, and ranks the results by the
//! shared quality score. The hybrid strategy uses it internally; the CLI
//! exposes it as the `evaluate` workflow.

use crate::assignment::{Assignment, QualityMetrics};
use crate::conflict::{analyze, AnalyzerConfig, ConflictReport};
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;
use crate::strategy::StrategyKind;
use std::cell::OnceCell;

/// One strategy's outcome within an evaluation.
#[derive(Debug, Clone)]
pub struct StrategyEvaluation {
    pub strategy: String,
    pub assignment: Assignment,
    pub metrics: QualityMetrics,
}

/// Runs strategies against one model and ranks them best-first.
pub struct StrategyEvaluator<'a> {
    model: &'a PreferenceModel,
    analyzer: AnalyzerConfig,
    conflicts: OnceCell<ConflictReport>,
}

impl<'a> StrategyEvaluator<'a> {
    pub fn new(model: &'a PreferenceModel) -> Self {
        Self {
            model,
            analyzer: AnalyzerConfig::default(),
            conflicts: OnceCell::new(),
        }
    }

    pub fn with_analyzer_config(mut self, config: AnalyzerConfig) -> Self {
        self.analyzer = config;
        self
    }

    /// Conflict diagnostics for the session's model, computed once and
    /// reused across strategy runs.
    pub fn conflicts(&self) -> &ConflictReport {
        self.conflicts
            .get_or_init(|| analyze(self.model, &self.analyzer))
    }

    /// Runs each strategy independently and returns the results ordered by
    /// ascending ranking score (best first). Ties keep the order the
    /// strategies were requested in. Any strategy failure aborts the whole
    /// evaluation.
    pub fn run(&self, kinds: &[StrategyKind]) -> Result<Vec<StrategyEvaluation>, AssignError> {
        let evaluations = self.run_all(kinds)?;
        let mut ranked: Vec<StrategyEvaluation> = evaluations;
        // Stable sort preserves request order on equal scores.
        ranked.sort_by(|a, b| {
            a.metrics
                .ranking_score()
                .partial_cmp(&b.metrics.ranking_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for e in &ranked {
            tracing::debug!(
                strategy = %e.strategy,
                total_cost = e.metrics.total_cost,
                satisfied_ratio = e.metrics.satisfied_ratio,
                "evaluated strategy"
            );
        }
        Ok(ranked)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self, kinds: &[StrategyKind]) -> Result<Vec<StrategyEvaluation>, AssignError> {
        kinds.iter().map(|&kind| run_one(self.model, kind)).collect()
    }

    /// Strategy runs share no mutable state, so they are embarrassingly
    /// parallel; ranking afterwards keeps the output identical.
    #[cfg(feature = "parallel")]
    fn run_all(&self, kinds: &[StrategyKind]) -> Result<Vec<StrategyEvaluation>, AssignError> {
        use rayon::prelude::*;
        let model = self.model;
        kinds.par_iter().map(|&kind| run_one(model, kind)).collect()
    }
}

fn run_one(model: &PreferenceModel, kind: StrategyKind) -> Result<StrategyEvaluation, AssignError> {
    // Fresh matrix per run: no shared mutable state between strategies.
    let costs = CostMatrix::from_model(model);
    let assignment = kind.instance().run(model, &costs)?;
    let metrics = assignment.metrics(model);
    Ok(StrategyEvaluation {
        strategy: assignment.strategy().to_string(),
        assignment,
        metrics,
    })
}
