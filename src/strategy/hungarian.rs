//! Exact minimum-cost assignment via Kuhn–Munkres.

use super::{check_capacity, AssignStrategy};
use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;

/// Exact strategy: slot-expanded minimum-cost bipartite matching.
///
/// Each character contributes one virtual column per slot, in lexical
/// character order, so multiplicity > 1 is handled by the standard square
/// solver. The result is cost-optimal for the given matrix; among equal-cost
/// matchings the solver's deterministic column scan favors lower column
/// indices, i.e. lexically earlier characters.
///
/// Built without the `exact-solver` feature this delegates to
/// [`GreedySmart`](super::GreedySmart) and marks the result approximate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hungarian;

impl AssignStrategy for Hungarian {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    #[cfg(feature = "exact-solver")]
    fn run(
        &self,
        model: &PreferenceModel,
        costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        use pathfinding::kuhn_munkres::kuhn_munkres_min;
        use pathfinding::matrix::Matrix;

        check_capacity(model)?;

        // One column per slot; column -> character.
        let columns: Vec<usize> = model
            .characters()
            .iter()
            .enumerate()
            .flat_map(|(ci, c)| std::iter::repeat(ci).take(c.slots))
            .collect();

        let weights = Matrix::from_fn(model.n_people(), columns.len(), |(p, j)| {
            costs.cost(p, columns[j])
        });
        let (_, matched) = kuhn_munkres_min(&weights);

        let assigned: Vec<usize> = matched.into_iter().map(|j| columns[j]).collect();
        Ok(Assignment::new(self.name(), assigned))
    }

    #[cfg(not(feature = "exact-solver"))]
    fn run(
        &self,
        model: &PreferenceModel,
        costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        check_capacity(model)?;
        tracing::warn!("exact solver not compiled in; hungarian falls back to greedy_smart");
        let fallback = super::GreedySmart.run(model, costs)?;
        Ok(fallback.relabel(self.name()).approximate())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{cyclic4, raw};
    use super::*;
    use crate::model::{Character, PreferenceModel};

    fn run(model: &PreferenceModel) -> Assignment {
        let costs = CostMatrix::from_model(model);
        Hungarian.run(model, &costs).unwrap()
    }

    #[test]
    fn test_cyclic_instance_everyone_gets_first_choice() {
        let model = cyclic4();
        let assignment = run(&model);
        let metrics = assignment.metrics(&model);
        // Four rank-1 picks: metric cost 0 (0-based ranks), 100% satisfied.
        assert_eq!(metrics.total_cost, 0);
        assert_eq!(metrics.satisfied, 4);
        assert!((metrics.satisfied_ratio - 1.0).abs() < 1e-12);
        for p in 0..4 {
            assert_eq!(assignment.achieved_rank(&model, p), Some(0));
        }
    }

    #[cfg(feature = "exact-solver")]
    #[test]
    fn test_exact_result_not_approximate() {
        let model = cyclic4();
        assert!(!run(&model).is_approximate());
    }

    #[test]
    fn test_slot_multiplicity_expands_columns() {
        let model = PreferenceModel::build(
            vec![
                raw("alice", &["lead"]),
                raw("bob", &["lead"]),
                raw("carol", &["extra"]),
            ],
            vec![
                Character::with_slots("lead", 2),
                Character::new("extra"),
            ],
        )
        .unwrap();
        let assignment = run(&model);
        let metrics = assignment.metrics(&model);
        assert_eq!(metrics.satisfied, 3);
        let lead_idx = model
            .characters()
            .iter()
            .position(|c| c.id == "lead")
            .unwrap();
        let lead_count = assignment.iter().filter(|&(_, c)| c == lead_idx).count();
        assert_eq!(lead_count, 2);
    }

    #[test]
    fn test_infeasible_before_solving() {
        let model = super::super::test_support::overfull();
        let costs = CostMatrix::from_model(&model);
        assert!(matches!(
            Hungarian.run(&model, &costs),
            Err(AssignError::Infeasible { .. })
        ));
    }
}
