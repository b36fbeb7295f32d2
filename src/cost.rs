//! Rank-based cost model and the dense cost matrix strategies consume.

use crate::model::PreferenceModel;

/// Cost offset for synthesized (expansion) entries. Any declared preference
/// costs strictly less than any synthesized one, so real choices always
/// dominate in a minimization. Declared lists are bounded by the roster size,
/// which stays far below this at the intended scale.
pub const SYNTHESIZED_COST_BASE: i64 = 1_000;

/// Converts a (person, character) pair into a non-negative cost.
///
/// Implementations must be total over all pairs of an expanded model and
/// monotone in declared rank (rank 1 cheapest).
pub trait CostModel {
    fn cost(&self, model: &PreferenceModel, person: usize, character: usize) -> i64;
}

/// Default cost model: a declared choice costs its 0-based rank; a
/// synthesized entry costs [`SYNTHESIZED_COST_BASE`] plus its position among
/// the synthesized tail, preserving the lexical expansion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankCost;

impl CostModel for RankCost {
    fn cost(&self, model: &PreferenceModel, person: usize, character: usize) -> i64 {
        let pos = model.expanded_rank(person, character);
        let declared = model.declared_count(person);
        if pos < declared {
            pos as i64
        } else {
            SYNTHESIZED_COST_BASE + (pos - declared) as i64
        }
    }
}

/// Dense person x character cost table, materialized once per strategy run.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    n_people: usize,
    n_characters: usize,
    costs: Vec<i64>,
}

impl CostMatrix {
    /// Prices every pair with the given cost model. Total by construction:
    /// the model's expansion guarantees a defined cost everywhere.
    pub fn build(model: &PreferenceModel, cost_model: &dyn CostModel) -> Self {
        let n_people = model.n_people();
        let n_characters = model.n_characters();
        let mut costs = Vec::with_capacity(n_people * n_characters);
        for p in 0..n_people {
            for c in 0..n_characters {
                let cost = cost_model.cost(model, p, c);
                debug_assert!(cost >= 0, "negative cost for ({p}, {c})");
                costs.push(cost);
            }
        }
        Self {
            n_people,
            n_characters,
            costs,
        }
    }

    /// Builds with the default [`RankCost`] model.
    pub fn from_model(model: &PreferenceModel) -> Self {
        Self::build(model, &RankCost)
    }

    pub fn n_people(&self) -> usize {
        self.n_people
    }

    pub fn n_characters(&self) -> usize {
        self.n_characters
    }

    pub fn cost(&self, person: usize, character: usize) -> i64 {
        self.costs[person * self.n_characters + character]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawPreference;
    use proptest::prelude::*;

    fn model() -> PreferenceModel {
        PreferenceModel::from_preferences(vec![
            RawPreference::new("alice", vec!["c1".into(), "c3".into()]),
            RawPreference::new("bob", vec!["c2".into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_declared_rank_costs() {
        let m = model();
        let costs = CostMatrix::from_model(&m);
        // roster sorted: c1=0, c2=1, c3=2
        assert_eq!(costs.cost(0, 0), 0); // alice -> c1, rank 1
        assert_eq!(costs.cost(0, 2), 1); // alice -> c3, rank 2
        assert_eq!(costs.cost(1, 1), 0); // bob -> c2, rank 1
    }

    #[test]
    fn test_synthesized_strictly_worse_than_declared() {
        let m = model();
        let costs = CostMatrix::from_model(&m);
        // alice never listed c2
        assert_eq!(costs.cost(0, 1), SYNTHESIZED_COST_BASE);
        // bob's synthesized tail keeps lexical order: c1 then c3
        assert_eq!(costs.cost(1, 0), SYNTHESIZED_COST_BASE);
        assert_eq!(costs.cost(1, 2), SYNTHESIZED_COST_BASE + 1);
        // every declared cost beats every synthesized cost
        assert!(costs.cost(0, 2) < costs.cost(1, 0));
    }

    proptest! {
        /// The matrix is total and non-negative for arbitrary sparse input.
        #[test]
        fn prop_matrix_total(
            n_chars in 1usize..7,
            picks in proptest::collection::vec(proptest::collection::vec(0usize..7, 0..4), 1..5)
        ) {
            let roster: Vec<crate::model::Character> =
                (0..n_chars).map(|i| crate::model::Character::new(format!("r{i}"))).collect();
            let prefs: Vec<RawPreference> = picks
                .iter()
                .enumerate()
                .map(|(p, cs)| {
                    let mut seen = std::collections::HashSet::new();
                    let list: Vec<String> = cs
                        .iter()
                        .map(|c| format!("r{}", c % n_chars))
                        .filter(|id| seen.insert(id.clone()))
                        .collect();
                    RawPreference::new(format!("p{p}"), list)
                })
                .collect();
            let model = PreferenceModel::build(prefs, roster).unwrap();
            let costs = CostMatrix::from_model(&model);
            for p in 0..model.n_people() {
                let declared = model.declared_count(p) as i64;
                for c in 0..model.n_characters() {
                    let cost = costs.cost(p, c);
                    prop_assert!(cost >= 0);
                    // declared costs sit below the synthesized band
                    if model.declared_rank(p, c).is_some() {
                        prop_assert!(cost < declared);
                    } else {
                        prop_assert!(cost >= SYNTHESIZED_COST_BASE);
                    }
                }
            }
        }
    }
}
