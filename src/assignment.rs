//! Assignment results and quality scoring.

use crate::cost::SYNTHESIZED_COST_BASE;
use crate::model::PreferenceModel;
use serde::Serialize;

/// Cost charged against the quality score when a person ends up outside
/// their declared list. Matches the synthesized-cost band so quality totals
/// and matrix totals stay comparable.
pub const UNRANKED_PENALTY: i64 = SYNTHESIZED_COST_BASE;

/// Satisfaction-ratio thresholds for the quality bands.
pub const EXCELLENT_THRESHOLD: f64 = 0.90;
pub const GOOD_THRESHOLD: f64 = 0.70;
pub const FAIR_THRESHOLD: f64 = 0.50;

/// A complete person -> character mapping produced by one strategy run.
///
/// Always covers every person exactly once and never exceeds any
/// character's slot multiplicity; strategies fail instead of returning a
/// partial mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    strategy: String,
    /// Set when the result came from a documented non-optimal fallback
    /// (Hungarian built without the exact solver).
    approximate: bool,
    /// Per person index: assigned character index.
    assigned: Vec<usize>,
}

impl Assignment {
    pub(crate) fn new(strategy: impl Into<String>, assigned: Vec<usize>) -> Self {
        Self {
            strategy: strategy.into(),
            approximate: false,
            assigned,
        }
    }

    pub(crate) fn approximate(mut self) -> Self {
        self.approximate = true;
        self
    }

    pub(crate) fn relabel(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Name of the strategy that produced this assignment. The hybrid
    /// strategy tags results as `hybrid/<winner>`.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// True when this came from a fallback rather than the exact solver.
    pub fn is_approximate(&self) -> bool {
        self.approximate
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Character index assigned to a person.
    pub fn character_for(&self, person: usize) -> usize {
        self.assigned[person]
    }

    /// (person index, character index) pairs in person order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assigned.iter().copied().enumerate()
    }

    /// 0-based declared rank the person achieved, or `None` if they landed
    /// outside their declared list.
    pub fn achieved_rank(&self, model: &PreferenceModel, person: usize) -> Option<usize> {
        model.declared_rank(person, self.assigned[person])
    }

    /// Derives quality metrics against the model the assignment was run on.
    pub fn metrics(&self, model: &PreferenceModel) -> QualityMetrics {
        let mut total_cost = 0i64;
        let mut satisfied = 0usize;
        let mut unranked = 0usize;
        for (person, _) in self.iter() {
            match self.achieved_rank(model, person) {
                Some(rank) => {
                    total_cost += rank as i64;
                    satisfied += 1;
                }
                None => {
                    total_cost += UNRANKED_PENALTY;
                    unranked += 1;
                }
            }
        }
        let satisfied_ratio = satisfied as f64 / self.assigned.len() as f64;
        QualityMetrics {
            total_cost,
            satisfied,
            satisfied_ratio,
            unranked,
        }
    }

    /// Name-resolved rows for reporting and export, in person order.
    pub fn rows(&self, model: &PreferenceModel) -> Vec<AssignmentRow> {
        self.iter()
            .map(|(person, character)| AssignmentRow {
                person: model.person_id(person).to_string(),
                character: model.character(character).id.clone(),
                rank: self.achieved_rank(model, person).map(|r| r + 1),
            })
            .collect()
    }
}

/// One line of a resolved assignment: person, character, and the 1-based
/// declared rank achieved (`None` = outside the declared list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    pub person: String,
    pub character: String,
    pub rank: Option<usize>,
}

/// Quality summary of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    /// Sum of achieved declared ranks, plus [`UNRANKED_PENALTY`] per person
    /// outside their declared list.
    pub total_cost: i64,
    /// People who received something from their declared list.
    pub satisfied: usize,
    pub satisfied_ratio: f64,
    pub unranked: usize,
}

impl QualityMetrics {
    /// Scalar used to rank assignments against each other: total cost scaled
    /// up as satisfaction drops (factor between 1 and 2). Lower is better.
    pub fn ranking_score(&self) -> f64 {
        self.total_cost as f64 * (2.0 - self.satisfied_ratio)
    }

    pub fn band(&self) -> QualityBand {
        if self.satisfied_ratio >= EXCELLENT_THRESHOLD {
            QualityBand::Excellent
        } else if self.satisfied_ratio >= GOOD_THRESHOLD {
            QualityBand::Good
        } else if self.satisfied_ratio >= FAIR_THRESHOLD {
            QualityBand::Fair
        } else {
            QualityBand::Poor
        }
    }
}

/// Classification of an assignment's overall satisfaction ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QualityBand::Excellent => "excellent",
            QualityBand::Good => "good",
            QualityBand::Fair => "fair",
            QualityBand::Poor => "poor",
        };
        f.write_str(s)
    }
}
