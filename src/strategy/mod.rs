//! Assignment strategies.
//!
//! Five interchangeable variants behind one [`AssignStrategy`] interface,
//! selected by name through [`StrategyKind`]:
//!
//! - **hungarian** — exact minimum-cost matching (Kuhn–Munkres), slots
//!   expanded into virtual columns; greedy fallback without the
//!   `exact-solver` feature.
//! - **balanced** — spreads load away from popular characters via a
//!   pressure-adjusted cost.
//! - **priority_fair** — fewest declared options served first.
//! - **greedy_smart** — globally cheapest pair next, urgency-adjusted.
//! - **hybrid** — runs the others and keeps the best-scoring result.
//!
//! Every variant is deterministic; tie-break rules are documented per
//! module. All fail with [`AssignError::Infeasible`] when slot capacity
//! cannot cover everyone, before any partial result is produced.

mod balanced;
mod greedy;
mod hungarian;
mod hybrid;
mod priority_fair;

pub use balanced::Balanced;
pub use greedy::GreedySmart;
pub use hungarian::Hungarian;
pub use hybrid::Hybrid;
pub use priority_fair::PriorityFair;

use crate::assignment::Assignment;
use crate::cost::CostMatrix;
use crate::error::AssignError;
use crate::model::PreferenceModel;
use std::str::FromStr;

/// Shared contract for all strategy variants.
pub trait AssignStrategy {
    fn name(&self) -> &'static str;

    /// Produces a complete assignment, or fails without a partial result.
    fn run(&self, model: &PreferenceModel, costs: &CostMatrix)
        -> Result<Assignment, AssignError>;
}

/// Strategy selector, convertible from its CLI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Hungarian,
    Balanced,
    PriorityFair,
    GreedySmart,
    Hybrid,
}

impl StrategyKind {
    /// All variants, hybrid last.
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Hungarian,
        StrategyKind::Balanced,
        StrategyKind::PriorityFair,
        StrategyKind::GreedySmart,
        StrategyKind::Hybrid,
    ];

    /// The variants hybrid (and the `evaluate` workflow) compare. Excludes
    /// hybrid itself to avoid recursion.
    pub const COMPARABLE: [StrategyKind; 4] = [
        StrategyKind::Hungarian,
        StrategyKind::Balanced,
        StrategyKind::PriorityFair,
        StrategyKind::GreedySmart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Hungarian => "hungarian",
            StrategyKind::Balanced => "balanced",
            StrategyKind::PriorityFair => "priority_fair",
            StrategyKind::GreedySmart => "greedy_smart",
            StrategyKind::Hybrid => "hybrid",
        }
    }

    pub fn instance(self) -> Box<dyn AssignStrategy> {
        match self {
            StrategyKind::Hungarian => Box::new(Hungarian),
            StrategyKind::Balanced => Box::new(Balanced),
            StrategyKind::PriorityFair => Box::new(PriorityFair),
            StrategyKind::GreedySmart => Box::new(GreedySmart),
            StrategyKind::Hybrid => Box::new(Hybrid),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hungarian" => Ok(StrategyKind::Hungarian),
            "balanced" => Ok(StrategyKind::Balanced),
            "priority_fair" => Ok(StrategyKind::PriorityFair),
            "greedy_smart" => Ok(StrategyKind::GreedySmart),
            "hybrid" => Ok(StrategyKind::Hybrid),
            other => Err(AssignError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Derives a fresh cost matrix and runs the selected strategy.
pub fn run(kind: StrategyKind, model: &PreferenceModel) -> Result<Assignment, AssignError> {
    let costs = CostMatrix::from_model(model);
    kind.instance().run(model, &costs)
}

/// Capacity precondition shared by every variant.
pub(crate) fn check_capacity(model: &PreferenceModel) -> Result<(), AssignError> {
    let people = model.n_people();
    let capacity = model.total_slots();
    if capacity < people {
        return Err(AssignError::Infeasible { people, capacity });
    }
    Ok(())
}

/// Remaining slot capacity per character during a constructive pass.
pub(crate) struct SlotPool {
    remaining: Vec<usize>,
}

impl SlotPool {
    pub(crate) fn new(model: &PreferenceModel) -> Self {
        Self {
            remaining: model.characters().iter().map(|c| c.slots).collect(),
        }
    }

    pub(crate) fn available(&self, character: usize) -> bool {
        self.remaining[character] > 0
    }

    pub(crate) fn take(&mut self, character: usize) {
        debug_assert!(self.remaining[character] > 0);
        self.remaining[character] -= 1;
    }
}
