//! Pre-assignment conflict and risk analysis.
//!
//! Pure diagnostics over a [`PreferenceModel`]: demand pressure per
//! character, people whose thin preference lists put them at risk, and
//! input-quality suggestions. Advisory only; nothing here influences the
//! strategies.

use crate::model::PreferenceModel;
use serde::Serialize;

/// Analyzer thresholds.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    /// Demand ratio at or above which a character counts as "hot".
    pub hot_demand_threshold: f64,

    /// People declaring fewer distinct choices than this are flagged at risk.
    pub min_preferences: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            hot_demand_threshold: 0.5,
            min_preferences: 2,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_hot_demand_threshold(mut self, t: f64) -> Self {
        self.hot_demand_threshold = t;
        self
    }

    pub fn with_min_preferences(mut self, n: usize) -> Self {
        self.min_preferences = n;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.hot_demand_threshold > 0.0 && self.hot_demand_threshold <= 1.0) {
            return Err(format!(
                "hot_demand_threshold must be in (0, 1], got {}",
                self.hot_demand_threshold
            ));
        }
        Ok(())
    }
}

/// Demand statistics for one character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDemand {
    pub character: String,
    pub slots: usize,
    /// Number of people who declared this character.
    pub count: usize,
    /// `count / n_people * 100`.
    pub demand_pct: f64,
    /// Rank-proximity weighted popularity.
    pub weighted: f64,
}

/// A person flagged as likely to end up unsatisfied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRisk {
    pub person: String,
    pub declared: usize,
    /// How many of their declared choices are contested (declared by
    /// somebody else too).
    pub contested: usize,
}

/// Aggregate pre-assignment diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    pub n_people: usize,
    pub n_characters: usize,
    pub total_slots: usize,
    pub avg_preferences: f64,
    /// All characters, most demanded first (ties lexical).
    pub demand: Vec<CharacterDemand>,
    /// Characters at or above the hot-demand threshold.
    pub hot: Vec<String>,
    /// Characters declared by nobody.
    pub cold: Vec<String>,
    pub at_risk: Vec<PersonRisk>,
    pub suggestions: Vec<String>,
}

/// Analyzes a model. Pure and idempotent: the same model and config always
/// produce the same report.
pub fn analyze(model: &PreferenceModel, config: &AnalyzerConfig) -> ConflictReport {
    let n_people = model.n_people();
    let n_characters = model.n_characters();

    let mut demand: Vec<CharacterDemand> = (0..n_characters)
        .map(|ci| {
            let character = model.character(ci);
            let count = model.popularity(ci);
            CharacterDemand {
                character: character.id.clone(),
                slots: character.slots,
                count,
                demand_pct: count as f64 / n_people as f64 * 100.0,
                weighted: model.weighted_popularity(ci),
            }
        })
        .collect();
    demand.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.character.cmp(&b.character)));

    let hot: Vec<String> = demand
        .iter()
        .filter(|d| d.count as f64 / n_people as f64 >= config.hot_demand_threshold)
        .map(|d| d.character.clone())
        .collect();
    let mut cold: Vec<String> = demand
        .iter()
        .filter(|d| d.count == 0)
        .map(|d| d.character.clone())
        .collect();
    cold.sort();

    let at_risk: Vec<PersonRisk> = (0..n_people)
        .filter(|&p| model.declared_count(p) < config.min_preferences)
        .map(|p| {
            let contested = model
                .declared(p)
                .iter()
                .filter(|&&ci| model.popularity(ci) > 1)
                .count();
            PersonRisk {
                person: model.person_id(p).to_string(),
                declared: model.declared_count(p),
                contested,
            }
        })
        .collect();

    let mut suggestions = Vec::new();
    if !hot.is_empty() {
        suggestions.push(format!("highly requested characters: {}", hot.join(", ")));
    }
    if !at_risk.is_empty() {
        let names: Vec<&str> = at_risk.iter().map(|r| r.person.as_str()).collect();
        suggestions.push(format!(
            "people with few preferences, at risk of a poor match: {}",
            names.join(", ")
        ));
    }
    if !cold.is_empty() {
        suggestions.push(format!(
            "characters nobody requested: {} (consider removing or promoting them)",
            cold.join(", ")
        ));
    }
    let total_slots = model.total_slots();
    if total_slots < n_people + 2 {
        suggestions.push("little spare capacity; consider adding characters or slots".to_string());
    }

    ConflictReport {
        n_people,
        n_characters,
        total_slots,
        avg_preferences: model.avg_declared(),
        demand,
        hot,
        cold,
        at_risk,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Character, RawPreference};

    fn raw(person: &str, choices: &[&str]) -> RawPreference {
        RawPreference::new(person, choices.iter().map(|s| s.to_string()).collect())
    }

    fn model() -> PreferenceModel {
        PreferenceModel::build(
            vec![
                raw("alice", &["hero", "mage"]),
                raw("bob", &["hero", "rogue"]),
                raw("carol", &["hero"]),
                raw("dave", &["mage", "rogue"]),
            ],
            vec![
                Character::new("hero"),
                Character::new("mage"),
                Character::new("rogue"),
                Character::new("bard"),
                Character::new("tank"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_demand_sorted_and_percentages() {
        let report = analyze(&model(), &AnalyzerConfig::default());
        assert_eq!(report.n_people, 4);
        assert_eq!(report.n_characters, 5);
        assert_eq!(report.demand[0].character, "hero");
        assert_eq!(report.demand[0].count, 3);
        assert!((report.demand[0].demand_pct - 75.0).abs() < 1e-12);
        assert!((report.avg_preferences - 7.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_hot_and_cold() {
        let report = analyze(&model(), &AnalyzerConfig::default());
        // hero 75%, mage and rogue 50% — all at or above the 0.5 default
        assert_eq!(report.hot, vec!["hero", "mage", "rogue"]);
        assert_eq!(report.cold, vec!["bard", "tank"]);
    }

    #[test]
    fn test_at_risk_flags_thin_lists() {
        let report = analyze(&model(), &AnalyzerConfig::default());
        assert_eq!(report.at_risk.len(), 1);
        assert_eq!(report.at_risk[0].person, "carol");
        assert_eq!(report.at_risk[0].declared, 1);
        assert_eq!(report.at_risk[0].contested, 1);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = AnalyzerConfig::default().with_hot_demand_threshold(0.7);
        let report = analyze(&model(), &config);
        assert_eq!(report.hot, vec!["hero"]);
    }

    #[test]
    fn test_idempotent() {
        let m = model();
        let config = AnalyzerConfig::default();
        assert_eq!(analyze(&m, &config), analyze(&m, &config));
    }

    #[test]
    fn test_config_validation() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        assert!(AnalyzerConfig::default()
            .with_hot_demand_threshold(1.5)
            .validate()
            .is_err());
    }
}
