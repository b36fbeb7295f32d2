//! Popularity-balanced constructive assignment.

use super::{check_capacity, AssignStrategy, SlotPool};
use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;

/// Weight of the popularity-pressure penalty added on top of the declared
/// cost. Pressure grows with a character's declared demand and with the
/// share of its slots already taken, steering picks away from oversubscribed
/// characters at some preference cost.
pub const PRESSURE_WEIGHT: f64 = 1.5;

/// Balanced strategy.
///
/// People are processed fewest-declared-options-first (ties by input order)
/// so constrained people are not starved. Each person takes the available
/// character minimizing `cost + PRESSURE_WEIGHT * pressure`, where pressure
/// is recomputed before every pick from current slot usage and declared
/// demand. Ties go to the earlier entry in the person's expanded ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Balanced;

impl AssignStrategy for Balanced {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn run(
        &self,
        model: &PreferenceModel,
        costs: &CostMatrix,
    ) -> Result<Assignment, AssignError> {
        check_capacity(model)?;

        let n_people = model.n_people();
        let mut order: Vec<usize> = (0..n_people).collect();
        order.sort_by_key(|&p| (model.declared_count(p), p));

        let mut pool = SlotPool::new(model);
        let mut taken = vec![0usize; model.n_characters()];
        let mut assigned = vec![usize::MAX; n_people];

        for &p in &order {
            let mut best: Option<(f64, usize)> = None;
            for &c in model.expanded(p) {
                if !pool.available(c) {
                    continue;
                }
                let slots = model.character(c).slots as f64;
                let demand = model.popularity(c) as f64 / n_people as f64;
                let pressure = (taken[c] as f64 + demand) / slots;
                let adjusted = costs.cost(p, c) as f64 + PRESSURE_WEIGHT * pressure;
                // Strict < keeps the earliest expanded entry on ties.
                if best.map_or(true, |(b, _)| adjusted < b) {
                    best = Some((adjusted, c));
                }
            }
            // Capacity was checked up front, so a slot always remains.
            let (_, c) = best.expect("capacity checked; a free slot must exist");
            assigned[p] = c;
            taken[c] += 1;
            pool.take(c);
        }

        Ok(Assignment::new(self.name(), assigned))
    }
}
