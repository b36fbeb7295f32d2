//! Error taxonomy for model construction, assignment, and data loading.

use thiserror::Error;

/// Malformed or inconsistent preference input, detected while building a
/// [`PreferenceModel`](crate::model::PreferenceModel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no people in input")]
    EmptyPeople,

    #[error("no characters in roster")]
    EmptyRoster,

    #[error("person '{0}' appears more than once")]
    DuplicatePerson(String),

    #[error("character '{0}' appears more than once in the roster")]
    DuplicateCharacter(String),

    #[error("person '{person}' ranked character '{character}' more than once")]
    DuplicateChoice { person: String, character: String },

    #[error("person '{person}' ranked unknown character '{character}'")]
    UnknownCharacter { person: String, character: String },

    #[error("character '{0}' has zero slots")]
    ZeroSlots(String),
}

/// Errors surfaced by assignment strategies and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Total slot capacity cannot cover everyone. Carries the shortfall so
    /// callers can report how many people would be left out; no partial
    /// assignment is ever produced.
    #[error("infeasible: {people} people but only {capacity} character slots")]
    Infeasible { people: usize, capacity: usize },

    #[error("unknown strategy '{0}' (expected hungarian, balanced, priority_fair, greedy_smart, or hybrid)")]
    UnknownStrategy(String),
}

/// Errors from the CSV loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("unknown preference format '{0}' (expected 'wide' or 'long')")]
    UnknownFormat(String),
}
