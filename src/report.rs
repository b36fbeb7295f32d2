//! Plain-text rendering of reports.
//!
//! Formatting only: all data comes from the structured core types, so other
//! front-ends can render the same information differently.

use crate::assignment::{Assignment, QualityMetrics};
use crate::conflict::ConflictReport;
use crate::evaluate::StrategyEvaluation;
use crate::model::PreferenceModel;
use std::fmt::Write;

/// Renders the pre-assignment conflict analysis.
pub fn render_conflicts(report: &ConflictReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== conflict analysis ===");
    let _ = writeln!(
        out,
        "people: {}   characters: {}   slots: {}",
        report.n_people, report.n_characters, report.total_slots
    );
    let _ = writeln!(
        out,
        "average preferences per person: {:.1}",
        report.avg_preferences
    );

    let requested: Vec<_> = report.demand.iter().filter(|d| d.count > 0).collect();
    if !requested.is_empty() {
        let _ = writeln!(out, "\nmost requested:");
        for d in requested.iter().take(5) {
            let _ = writeln!(
                out,
                "  {}: {} people ({:.1}%)",
                d.character, d.count, d.demand_pct
            );
        }
    }
    if !report.at_risk.is_empty() {
        let _ = writeln!(out, "\nat risk:");
        for r in &report.at_risk {
            let _ = writeln!(
                out,
                "  {}: {} preference(s), {} contested",
                r.person, r.declared, r.contested
            );
        }
    }
    if !report.suggestions.is_empty() {
        let _ = writeln!(out, "\nsuggestions:");
        for s in &report.suggestions {
            let _ = writeln!(out, "  - {s}");
        }
    }
    out
}

/// Renders a finished assignment grouped by outcome quality.
pub fn render_assignment(model: &PreferenceModel, assignment: &Assignment) -> String {
    let metrics = assignment.metrics(model);
    let mut out = String::new();
    let _ = writeln!(out, "=== assignment ({}) ===", assignment.strategy());
    if assignment.is_approximate() {
        let _ = writeln!(out, "note: produced by a non-optimal fallback");
    }

    let mut first_choice = Vec::new();
    let mut ranked = Vec::new();
    let mut unranked = Vec::new();
    for row in assignment.rows(model) {
        match row.rank {
            Some(1) => first_choice.push(row),
            Some(_) => ranked.push(row),
            None => unranked.push(row),
        }
    }
    for (label, rows) in [
        ("first choice", first_choice),
        ("ranked choice", ranked),
        ("outside preferences", unranked),
    ] {
        if rows.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{label}:");
        for row in rows {
            match row.rank {
                Some(r) => {
                    let _ = writeln!(out, "  {} -> {} (choice #{r})", row.person, row.character);
                }
                None => {
                    let _ = writeln!(out, "  {} -> {}", row.person, row.character);
                }
            }
        }
    }

    let _ = writeln!(out, "\n{}", render_metrics(&metrics));
    out
}

/// One-paragraph quality summary.
pub fn render_metrics(metrics: &QualityMetrics) -> String {
    format!(
        "total cost: {}   satisfied: {}/{} ({:.1}%)   overall: {}",
        metrics.total_cost,
        metrics.satisfied,
        metrics.satisfied + metrics.unranked,
        metrics.satisfied_ratio * 100.0,
        metrics.band()
    )
}

/// Renders a ranked strategy comparison, best first.
pub fn render_comparison(results: &[StrategyEvaluation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== strategy comparison (best first) ===");
    for (i, e) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:14} cost {:>5}  satisfied {:.1}%  score {:.1}",
            i + 1,
            e.strategy,
            e.metrics.total_cost,
            e.metrics.satisfied_ratio * 100.0,
            e.metrics.ranking_score()
        );
    }
    out
}
