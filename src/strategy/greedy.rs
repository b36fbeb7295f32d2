//! Urgency-aware global greedy assignment.

use super::{check_capacity, AssignStrategy, SlotPool};
use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;

/// Weight applied to a person's remaining viable declared options. A person
/// with few live options gets a lower effective cost and is matched sooner.
pub const URGENCY_WEIGHT: f64 = 0.5;

/// Smart greedy strategy.
///
/// Repeatedly picks the globally cheapest (person, character) pair among
/// unassigned people and characters with free slots, where the effective
/// cost is `cost + URGENCY_WEIGHT * viable_options(person)`. Viable options
/// (declared choices with remaining capacity) are recomputed after every
/// assignment, since each pick changes availability. Ties break toward the
/// lower person index, then the lower character index.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySmart;

impl AssignStrategy for GreedySmart {
    fn name(&self) -> &'static str {
        "greedy_smart"
    }

    fn run(
        &self,
        model: &PreferenceModel,
        costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        check_capacity(model)?;

        let n_people = model.n_people();
        let n_chars = model.n_characters();
        let mut pool = SlotPool::new(model);
        let mut assigned = vec![usize::MAX; n_people];
        let mut done = vec![false; n_people];

        for _ in 0..n_people {
            let viable = |p: usize| {
                model
                    .declared(p)
                    .iter()
                    .filter(|&&c| pool.available(c))
                    .count()
            };

            let mut best: Option<(f64, usize, usize)> = None;
            for p in (0..n_people).filter(|&p| !done[p]) {
                let urgency = URGENCY_WEIGHT * viable(p) as f64;
                for c in (0..n_chars).filter(|&c| pool.available(c)) {
                    let effective = costs.cost(p, c) as f64 + urgency;
                    // Strict < plus ascending scan order gives the
                    // (person, character) lexicographic tie-break.
                    if best.map_or(true, |(b, _, _)| effective < b) {
                        best = Some((effective, p, c));
                    }
                }
            }

            let (_, p, c) = best.expect("capacity checked; a free slot must exist");
            assigned[p] = c;
            done[p] = true;
            pool.take(c);
        }

        Ok(Assignment::new(self.name(), assigned))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{contested, cyclic4, raw};
    use super::*;
    use crate::model::PreferenceModel;

    fn run(model: &PreferenceModel) -> Assignment {
        let costs = CostMatrix::from_model(model);
        GreedySmart.run(model, &costs).unwrap()
    }

    #[test]
    fn test_cyclic_instance_fully_satisfied() {
        let model = cyclic4();
        let metrics = run(&model).metrics(&model);
        assert_eq!(metrics.total_cost, 0);
        assert_eq!(metrics.satisfied, 4);
    }

    #[test]
    fn test_urgency_protects_thin_lists() {
        // bob declared only the contested character; urgency must hand it to
        // him even though alice scans first.
        let model = PreferenceModel::from_preferences(vec![
            raw("alice", &["star", "side"]),
            raw("bob", &["star"]),
        ])
        .unwrap();
        let assignment = run(&model);
        let star = model
            .characters()
            .iter()
            .position(|c| c.id == "star")
            .unwrap();
        assert_eq!(assignment.character_for(1), star);
        assert_eq!(assignment.metrics(&model).satisfied, 2);
    }

    #[test]
    fn test_contested_never_oversubscribed() {
        let model = contested();
        let assignment = run(&model);
        let star = model
            .characters()
            .iter()
            .position(|c| c.id == "star")
            .unwrap();
        assert_eq!(assignment.iter().filter(|&(_, c)| c == star).count(), 1);
    }
}
