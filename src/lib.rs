//! Preference-based character assignment engine.
//!
//! Assigns a fixed set of characters to a fixed set of people from ranked
//! preference lists, maximizing overall satisfaction under interchangeable
//! strategies:
//!
//! - **Hungarian**: exact minimum-cost bipartite matching (Kuhn–Munkres),
//!   with slot multiplicities expanded into virtual columns.
//! - **Balanced**: constructive assignment with a popularity-pressure
//!   penalty that spreads load away from oversubscribed characters.
//! - **PriorityFair**: fewest-declared-options-first, protecting people
//!   with thin preference lists.
//! - **GreedySmart**: globally cheapest pair next, with an urgency bonus
//!   recomputed as slots fill up.
//! - **Hybrid**: runs the others and keeps the best-scoring result.
//!
//! # Pipeline
//!
//! Raw input ([`model::RawPreference`]) becomes an immutable, validated
//! [`model::PreferenceModel`] with every person's preference list expanded
//! to cover the full roster. From it, [`conflict::analyze`] produces
//! advisory diagnostics and [`cost::CostMatrix`] prices every pair; each
//! strategy consumes those and returns an [`assignment::Assignment`] with
//! derived [`assignment::QualityMetrics`].
//! [`evaluate::StrategyEvaluator`] compares strategies side by side.
//!
//! All strategies are deterministic and single-threaded; the optional
//! `parallel` feature only parallelizes independent evaluator runs. The
//! default `exact-solver` feature links the Kuhn–Munkres solver; without
//! it the Hungarian strategy degrades to a documented greedy fallback.

pub mod assignment;
pub mod conflict;
pub mod cost;
pub mod error;
pub mod evaluate;
pub mod generate;
pub mod loader;
pub mod model;
pub mod report;
pub mod strategy;
