//! CSV ingestion and export.
//!
//! Two tabular layouts are supported:
//!
//! - **wide** — one row per person: `person, pref1, pref2, ...`; blank
//!   cells are skipped.
//! - **long** — one row per (person, character) pair, ranks implied by row
//!   order; rows for the same person need not be adjacent.
//!
//! Both expect a header row. People with no usable choices are dropped, as
//! validation and expansion handle the rest downstream.

use crate::assignment::AssignmentRow;
use crate::error::LoadError;
use crate::model::RawPreference;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Input table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceFormat {
    Wide,
    Long,
}

impl FromStr for PreferenceFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide" => Ok(PreferenceFormat::Wide),
            "long" => Ok(PreferenceFormat::Long),
            other => Err(LoadError::UnknownFormat(other.to_string())),
        }
    }
}

/// Loads preferences from a CSV file.
pub fn load_preferences(
    path: &Path,
    format: PreferenceFormat,
    delimiter: u8,
) -> Result<Vec<RawPreference>, LoadError> {
    let file = File::open(path)?;
    let prefs = read_preferences(file, format, delimiter)?;
    tracing::info!(
        people = prefs.len(),
        path = %path.display(),
        "loaded preference data"
    );
    Ok(prefs)
}

/// Reads preferences from any CSV source.
pub fn read_preferences<R: io::Read>(
    reader: R,
    format: PreferenceFormat,
    delimiter: u8,
) -> Result<Vec<RawPreference>, LoadError> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    match format {
        PreferenceFormat::Wide => read_wide(&mut csv),
        PreferenceFormat::Long => read_long(&mut csv),
    }
}

fn read_wide<R: io::Read>(csv: &mut csv::Reader<R>) -> Result<Vec<RawPreference>, LoadError> {
    let mut prefs = Vec::new();
    for record in csv.records() {
        let record = record?;
        let mut fields = record.iter().map(str::trim);
        let Some(person) = fields.next() else {
            continue;
        };
        if person.is_empty() {
            continue;
        }
        let choices: Vec<String> = fields
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if !choices.is_empty() {
            prefs.push(RawPreference::new(person, choices));
        }
    }
    Ok(prefs)
}

fn read_long<R: io::Read>(csv: &mut csv::Reader<R>) -> Result<Vec<RawPreference>, LoadError> {
    // Preserve first-seen person order while grouping rows.
    let mut order: Vec<String> = Vec::new();
    let mut by_person: HashMap<String, Vec<String>> = HashMap::new();

    for record in csv.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let person = record
            .get(0)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::MalformedRow {
                line,
                reason: "missing person column".to_string(),
            })?;
        let character = record
            .get(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::MalformedRow {
                line,
                reason: "long format needs person and character columns".to_string(),
            })?;

        let entry = by_person.entry(person.to_string()).or_insert_with(|| {
            order.push(person.to_string());
            Vec::new()
        });
        entry.push(character.to_string());
    }

    Ok(order
        .into_iter()
        .map(|person| {
            let choices = by_person.remove(&person).unwrap_or_default();
            RawPreference::new(person, choices)
        })
        .collect())
}

/// Writes a finished assignment as `person, character, rank` rows.
pub fn write_assignment<W: io::Write>(
    writer: W,
    rows: &[AssignmentRow],
    delimiter: u8,
) -> Result<(), LoadError> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv.write_record(["person", "character", "rank"])?;
    for row in rows {
        let rank = row.rank.map(|r| r.to_string()).unwrap_or_default();
        csv.write_record([row.person.as_str(), row.character.as_str(), rank.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_skips_blank_cells() {
        let data = "person,p1,p2,p3\nalice,c1,c2,c3\nbob,c2,c3,\n";
        let prefs = read_preferences(data.as_bytes(), PreferenceFormat::Wide, b',').unwrap();
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs[0].person, "alice");
        assert_eq!(prefs[0].choices, vec!["c1", "c2", "c3"]);
        assert_eq!(prefs[1].choices, vec!["c2", "c3"]);
    }

    #[test]
    fn test_wide_drops_people_without_choices() {
        let data = "person,p1\nalice,c1\nghost,\n";
        let prefs = read_preferences(data.as_bytes(), PreferenceFormat::Wide, b',').unwrap();
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].person, "alice");
    }

    #[test]
    fn test_long_groups_by_person_in_first_seen_order() {
        let data = "person,character\nbob,c1\nalice,c2\nbob,c3\n";
        let prefs = read_preferences(data.as_bytes(), PreferenceFormat::Long, b',').unwrap();
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs[0].person, "bob");
        assert_eq!(prefs[0].choices, vec!["c1", "c3"]);
        assert_eq!(prefs[1].person, "alice");
    }

    #[test]
    fn test_long_rejects_missing_character_column() {
        let data = "person,character\nalice\n";
        let err = read_preferences(data.as_bytes(), PreferenceFormat::Long, b',').unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let data = "person;p1;p2\nalice;c1;c2\n";
        let prefs = read_preferences(data.as_bytes(), PreferenceFormat::Wide, b';').unwrap();
        assert_eq!(prefs[0].choices, vec!["c1", "c2"]);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(
            "wide".parse::<PreferenceFormat>().unwrap(),
            PreferenceFormat::Wide
        );
        assert!("tall".parse::<PreferenceFormat>().is_err());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "person,p1,p2").unwrap();
        writeln!(file, "alice,c1,c2").unwrap();
        let prefs = load_preferences(file.path(), PreferenceFormat::Wide, b',').unwrap();
        assert_eq!(prefs.len(), 1);
    }

    #[test]
    fn test_write_assignment_round_trip() {
        let rows = vec![
            AssignmentRow {
                person: "alice".into(),
                character: "c1".into(),
                rank: Some(1),
            },
            AssignmentRow {
                person: "bob".into(),
                character: "c9".into(),
                rank: None,
            },
        ];
        let mut out = Vec::new();
        write_assignment(&mut out, &rows, b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "person,character,rank\nalice,c1,1\nbob,c9,\n");
    }
}
