//! Run-all-and-keep-the-best meta-strategy.

use super::{check_capacity, AssignStrategy, StrategyKind};
use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::evaluate::StrategyEvaluator;
use crate::model::PreferenceModel;

/// Hybrid strategy.
///
/// Evaluates hungarian, balanced, priority_fair, and greedy_smart on the
/// same model and returns the best-scoring assignment, relabelled
/// `hybrid/<winner>` so the underlying producer stays visible. Never
/// includes itself in the comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hybrid;

impl AssignStrategy for Hybrid {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn run(
        &self,
        model: &PreferenceModel,
        _costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        check_capacity(model)?;

        let evaluator = StrategyEvaluator::new(model);
        let mut ranked = evaluator.run(&StrategyKind::COMPARABLE)?;
        // Evaluator output is best-first and never empty for this input.
        let best = ranked.remove(0);
        tracing::debug!(winner = %best.strategy, "hybrid selected strategy");
        Ok(best
            .assignment
            .relabel(format!("{}/{}", self.name(), best.strategy)))
    }
}
