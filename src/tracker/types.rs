//! Core data types for the symptom tracker
//!
//! This module defines the record kept for each tracked day:
//! - `TrackingEntry`: One dated symptom-tracking record
//! - `Bleeding`, `CervicalMucus`, `Mood`: Categorical fields
//! - `Level`: A 0-10 slider value

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Symptom tags offered as checkboxes on the tracker form
pub const KNOWN_SYMPTOMS: &[&str] = &[
    "acne",
    "bloating",
    "breast-tenderness",
    "dizziness",
    "hair-loss",
    "hot-flashes",
    "nausea",
    "weight-gain",
];

/// A slider reading on the 0-10 scale
///
/// [`Level::new`] clamps values above 10; parsing rejects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Share of the full scale, as a percentage
    pub fn percent(&self) -> u8 {
        self.0 * 10
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Level {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u8>() {
            Ok(v) if v <= Self::MAX => Ok(Level(v)),
            _ => Err(ParseFieldError::new("level", s)),
        }
    }
}

/// A form or CSV value that could not be mapped onto a tracker field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: {value:?}")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

impl ParseFieldError {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Menstrual bleeding intensity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bleeding {
    #[default]
    None,
    Spotting,
    Light,
    Medium,
    Heavy,
}

impl Bleeding {
    pub fn all() -> &'static [Bleeding] {
        &[
            Bleeding::None,
            Bleeding::Spotting,
            Bleeding::Light,
            Bleeding::Medium,
            Bleeding::Heavy,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bleeding::None => "none",
            Bleeding::Spotting => "spotting",
            Bleeding::Light => "light",
            Bleeding::Medium => "medium",
            Bleeding::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Bleeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bleeding {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bleeding::all()
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError::new("bleeding", s))
    }
}

/// Cervical mucus consistency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CervicalMucus {
    #[default]
    Dry,
    Sticky,
    Creamy,
    Watery,
    EggWhite,
}

impl CervicalMucus {
    pub fn all() -> &'static [CervicalMucus] {
        &[
            CervicalMucus::Dry,
            CervicalMucus::Sticky,
            CervicalMucus::Creamy,
            CervicalMucus::Watery,
            CervicalMucus::EggWhite,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CervicalMucus::Dry => "dry",
            CervicalMucus::Sticky => "sticky",
            CervicalMucus::Creamy => "creamy",
            CervicalMucus::Watery => "watery",
            CervicalMucus::EggWhite => "egg-white",
        }
    }
}

impl fmt::Display for CervicalMucus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CervicalMucus {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CervicalMucus::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError::new("cervicalMucus", s))
    }
}

/// Self-reported mood for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Terrible,
    Bad,
    Okay,
    Good,
    Great,
}

impl Mood {
    pub fn all() -> &'static [Mood] {
        &[Mood::Terrible, Mood::Bad, Mood::Okay, Mood::Good, Mood::Great]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Terrible => "terrible",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Good => "good",
            Mood::Great => "great",
        }
    }

    /// Emoji shown next to the mood in history summaries
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Terrible => "😢",
            Mood::Bad => "😞",
            Mood::Okay => "😐",
            Mood::Good => "😊",
            Mood::Great => "😄",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError::new("mood", s))
    }
}

/// One dated symptom-tracking record
///
/// The `date` is the key within a [`TrackerStore`](super::TrackerStore);
/// `timestamp` only records when the entry was last saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub pain_level: Level,
    #[serde(default)]
    pub pelvic_pain: Level,
    #[serde(default)]
    pub back_pain: Level,
    #[serde(default)]
    pub headache_level: Level,
    #[serde(default)]
    pub bleeding: Bleeding,
    #[serde(default)]
    pub cycle_day: Option<u32>,
    #[serde(default)]
    pub cervical_mucus: CervicalMucus,
    #[serde(default)]
    pub cramps: Level,
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub anxiety_level: Level,
    #[serde(default)]
    pub stress_level: Level,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Level,
    #[serde(default)]
    pub energy_level: Level,
    #[serde(default)]
    pub fatigue_level: Level,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl TrackingEntry {
    /// Create an entry for a date with every slider at its resting value
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pain_level: Level::default(),
            pelvic_pain: Level::default(),
            back_pain: Level::default(),
            headache_level: Level::default(),
            bleeding: Bleeding::default(),
            cycle_day: None,
            cervical_mucus: CervicalMucus::default(),
            cramps: Level::default(),
            symptoms: BTreeSet::new(),
            mood: None,
            anxiety_level: Level::default(),
            stress_level: Level::default(),
            sleep_hours: None,
            sleep_quality: Level::new(5),
            energy_level: Level::new(5),
            fatigue_level: Level::default(),
            notes: None,
            medications: None,
            timestamp: Utc::now(),
        }
    }

    /// Builder method: set the overall pain level
    pub fn pain(mut self, level: u8) -> Self {
        self.pain_level = Level::new(level);
        self
    }

    /// Builder method: set the mood
    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Builder method: set free-text notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method: add a symptom tag
    pub fn symptom(mut self, tag: impl Into<String>) -> Self {
        self.symptoms.insert(tag.into());
        self
    }

    /// Whether the checkbox for `tag` should render as checked
    pub fn has_symptom(&self, tag: &str) -> bool {
        self.symptoms.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_clamps() {
        assert_eq!(Level::new(14).value(), 10);
        assert_eq!(Level::new(7).percent(), 70);
        assert!("eleven".parse::<Level>().is_err());
        assert_eq!("10".parse::<Level>().unwrap().value(), 10);
        assert!("11".parse::<Level>().is_err());
        assert!("50".parse::<Level>().is_err());
    }

    #[test]
    fn test_categorical_parsing() {
        assert_eq!("Heavy".parse::<Bleeding>().unwrap(), Bleeding::Heavy);
        assert_eq!(
            "egg-white".parse::<CervicalMucus>().unwrap(),
            CervicalMucus::EggWhite
        );
        assert_eq!("great".parse::<Mood>().unwrap(), Mood::Great);
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn test_entry_json_uses_camel_case() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let entry = TrackingEntry::new(date).pain(4).symptom("bloating");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["painLevel"], 4);
        assert_eq!(json["cervicalMucus"], "dry");
        assert_eq!(json["symptoms"][0], "bloating");
        assert!(json["mood"].is_null());
    }

    #[test]
    fn test_symptoms_have_set_semantics() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let entry = TrackingEntry::new(date)
            .symptom("nausea")
            .symptom("acne")
            .symptom("nausea");

        assert_eq!(entry.symptoms.len(), 2);
        assert!(entry.has_symptom("acne"));
        assert!(!entry.has_symptom("bloating"));
    }
}
