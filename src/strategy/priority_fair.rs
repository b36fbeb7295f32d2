//! Fewest-options-first constructive assignment.

use super::{check_capacity, AssignStrategy, SlotPool};
use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;

/// Priority-fair strategy.
///
/// People are served in ascending order of declared (non-synthesized)
/// preference count, ties broken by input order; each takes the first
/// still-available entry of their expanded ordering. Expansion guarantees a
/// pick exists whenever capacity remains, so the pass always completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityFair;

impl AssignStrategy for PriorityFair {
    fn name(&self) -> &'static str {
        "priority_fair"
    }

    fn run(
        &self,
        model: &PreferenceModel,
        _costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        check_capacity(model)?;

        let n_people = model.n_people();
        let mut order: Vec<usize> = (0..n_people).collect();
        order.sort_by_key(|&p| (model.declared_count(p), p));

        let mut pool = SlotPool::new(model);
        let mut assigned = vec![usize::MAX; n_people];

        for &p in &order {
            let c = model
                .expanded(p)
                .iter()
                .copied()
                .find(|&c| pool.available(c))
                .expect("capacity checked; a free slot must exist");
            assigned[p] = c;
            pool.take(c);
        }

        Ok(Assignment::new(self.name(), assigned))
    }
}
