//! Validated preference data and deterministic preference expansion.
//!
//! [`PreferenceModel`] is the immutable input to everything else: it owns the
//! character roster (with slot multiplicities), each person's declared ranked
//! choices, the expanded total ordering per person, and popularity statistics.
//! Build it once from raw input; strategies and the analyzer only read it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A character that people can be assigned to.
///
/// `slots` is how many people the character can receive simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub slots: usize,
}

impl Character {
    /// Single-slot character.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slots: 1,
        }
    }

    pub fn with_slots(id: impl Into<String>, slots: usize) -> Self {
        Self {
            id: id.into(),
            slots,
        }
    }
}

/// One person's raw ranked choices, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPreference {
    pub person: String,
    pub choices: Vec<String>,
}

impl RawPreference {
    pub fn new(person: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            person: person.into(),
            choices,
        }
    }
}

/// Validated, expanded preference data.
///
/// Characters are stored sorted lexically by id; people keep input order.
/// For every person the expanded ordering covers the whole roster: declared
/// choices first (rank order), then every unlisted character in lexical
/// order. This makes every derived cost matrix total by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceModel {
    characters: Vec<Character>,
    people: Vec<String>,
    /// Per person: declared choices as character indices, rank order.
    declared: Vec<Vec<usize>>,
    /// Per person: all character indices, declared first then synthesized.
    expanded: Vec<Vec<usize>>,
    /// Per person, per character: position in the expanded ordering.
    expanded_rank: Vec<Vec<usize>>,
    /// Per character: how many people declared it.
    popularity: Vec<usize>,
    /// Per character: rank-proximity weighted popularity (mention at declared
    /// rank r contributes 1/(r+1)).
    weighted_popularity: Vec<f64>,
}

impl PreferenceModel {
    /// Builds a model against an explicit character roster.
    ///
    /// Fails with [`ValidationError`] on empty input, duplicate people or
    /// characters, duplicate ranks, zero-slot characters, or choices that
    /// reference a character outside the roster.
    pub fn build(
        preferences: Vec<RawPreference>,
        mut characters: Vec<Character>,
    ) -> Result<Self, ValidationError> {
        if preferences.is_empty() {
            return Err(ValidationError::EmptyPeople);
        }
        if characters.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }

        characters.sort_by(|a, b| a.id.cmp(&b.id));

        let mut char_index: HashMap<&str, usize> = HashMap::with_capacity(characters.len());
        for (i, c) in characters.iter().enumerate() {
            if c.slots == 0 {
                return Err(ValidationError::ZeroSlots(c.id.clone()));
            }
            if char_index.insert(c.id.as_str(), i).is_some() {
                return Err(ValidationError::DuplicateCharacter(c.id.clone()));
            }
        }

        let n_chars = characters.len();
        let mut people = Vec::with_capacity(preferences.len());
        let mut declared = Vec::with_capacity(preferences.len());
        let mut seen_people: HashMap<&str, ()> = HashMap::with_capacity(preferences.len());
        let mut popularity = vec![0usize; n_chars];
        let mut weighted_popularity = vec![0.0f64; n_chars];

        for pref in &preferences {
            if seen_people.insert(pref.person.as_str(), ()).is_some() {
                return Err(ValidationError::DuplicatePerson(pref.person.clone()));
            }

            let mut choices = Vec::with_capacity(pref.choices.len());
            for (rank, choice) in pref.choices.iter().enumerate() {
                let &ci = char_index.get(choice.as_str()).ok_or_else(|| {
                    ValidationError::UnknownCharacter {
                        person: pref.person.clone(),
                        character: choice.clone(),
                    }
                })?;
                if choices.contains(&ci) {
                    return Err(ValidationError::DuplicateChoice {
                        person: pref.person.clone(),
                        character: choice.clone(),
                    });
                }
                choices.push(ci);
                popularity[ci] += 1;
                weighted_popularity[ci] += 1.0 / (rank as f64 + 1.0);
            }
            people.push(pref.person.clone());
            declared.push(choices);
        }

        // Expansion: append every unlisted character in lexical order, so
        // each person's ordering covers the full roster.
        let mut expanded = Vec::with_capacity(declared.len());
        let mut expanded_rank = Vec::with_capacity(declared.len());
        for choices in &declared {
            let mut listed = vec![false; n_chars];
            for &ci in choices {
                listed[ci] = true;
            }
            let mut order = choices.clone();
            order.extend((0..n_chars).filter(|&ci| !listed[ci]));

            let mut rank_of = vec![0usize; n_chars];
            for (pos, &ci) in order.iter().enumerate() {
                rank_of[ci] = pos;
            }
            expanded.push(order);
            expanded_rank.push(rank_of);
        }

        Ok(Self {
            characters,
            people,
            declared,
            expanded,
            expanded_rank,
            popularity,
            weighted_popularity,
        })
    }

    /// Builds a model discovering the roster from the choices themselves:
    /// every mentioned character, one slot each.
    pub fn from_preferences(preferences: Vec<RawPreference>) -> Result<Self, ValidationError> {
        let mut ids: Vec<&str> = preferences
            .iter()
            .flat_map(|p| p.choices.iter().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        let roster = ids.into_iter().map(Character::new).collect();
        Self::build(preferences, roster)
    }

    pub fn n_people(&self) -> usize {
        self.people.len()
    }

    pub fn n_characters(&self) -> usize {
        self.characters.len()
    }

    /// Total slot capacity across the roster.
    pub fn total_slots(&self) -> usize {
        self.characters.iter().map(|c| c.slots).sum()
    }

    pub fn people(&self) -> &[String] {
        &self.people
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn person_id(&self, person: usize) -> &str {
        &self.people[person]
    }

    pub fn character(&self, character: usize) -> &Character {
        &self.characters[character]
    }

    /// Declared choices of a person, as character indices in rank order.
    pub fn declared(&self, person: usize) -> &[usize] {
        &self.declared[person]
    }

    pub fn declared_count(&self, person: usize) -> usize {
        self.declared[person].len()
    }

    /// Full expanded ordering for a person: declared choices first, then
    /// synthesized entries in lexical character order.
    pub fn expanded(&self, person: usize) -> &[usize] {
        &self.expanded[person]
    }

    /// Position of `character` in the person's expanded ordering.
    pub fn expanded_rank(&self, person: usize, character: usize) -> usize {
        self.expanded_rank[person][character]
    }

    /// 0-based declared rank, or `None` if the pair is synthesized.
    pub fn declared_rank(&self, person: usize, character: usize) -> Option<usize> {
        let pos = self.expanded_rank[person][character];
        (pos < self.declared[person].len()).then_some(pos)
    }

    /// Number of people who declared this character.
    pub fn popularity(&self, character: usize) -> usize {
        self.popularity[character]
    }

    /// Popularity weighted by rank proximity: a mention at declared rank `r`
    /// (0-based) contributes `1/(r+1)`.
    pub fn weighted_popularity(&self, character: usize) -> f64 {
        self.weighted_popularity[character]
    }

    /// Mean number of declared choices per person.
    pub fn avg_declared(&self) -> f64 {
        let total: usize = self.declared.iter().map(Vec::len).sum();
        total as f64 / self.people.len() as f64
    }
}
