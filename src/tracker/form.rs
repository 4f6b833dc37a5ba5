//! Tracker form decoding
//!
//! Builds a [`TrackingEntry`] from a submitted tracker form, and turns an
//! entry back into the field values the form is rendered from. Input names
//! match the entry's camelCase field names.

use chrono::{NaiveDate, Utc};
use std::str::FromStr;

use super::types::{Level, TrackingEntry, KNOWN_SYMPTOMS};
use crate::form::FormFields;
use crate::validation::ValidationErrors;

const LEVEL_FIELDS: [&str; 10] = [
    "painLevel",
    "pelvicPain",
    "backPain",
    "headacheLevel",
    "cramps",
    "anxietyLevel",
    "stressLevel",
    "sleepQuality",
    "energyLevel",
    "fatigueLevel",
];

/// Decode a tracker submission
///
/// The symptom set is exactly the set of checked `symptoms` inputs. Only
/// tags from [`KNOWN_SYMPTOMS`] are accepted.
pub fn entry_from_form(form: &FormFields) -> Result<TrackingEntry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let date = match form.get("date") {
        None => {
            errors.add("date", "Please choose a date");
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.add("date", "Please choose a valid date");
                None
            }
        },
    };

    let mut entry = TrackingEntry::new(date.unwrap_or_default());

    for name in LEVEL_FIELDS {
        if let Some(level) = parse_field::<Level>(form, name, &mut errors, "Choose a value from 0 to 10") {
            *level_slot(&mut entry, name) = level;
        }
    }

    if let Some(b) = parse_field(form, "bleeding", &mut errors, "Unknown bleeding level") {
        entry.bleeding = b;
    }
    if let Some(m) = parse_field(form, "cervicalMucus", &mut errors, "Unknown cervical mucus type") {
        entry.cervical_mucus = m;
    }
    entry.mood = parse_field(form, "mood", &mut errors, "Unknown mood");

    entry.cycle_day = parse_field::<u32>(form, "cycleDay", &mut errors, "Cycle day must be a whole number");
    if matches!(entry.cycle_day, Some(0)) {
        errors.add("cycleDay", "Cycle day starts at 1");
    }

    entry.sleep_hours = parse_field::<f64>(form, "sleepHours", &mut errors, "Sleep hours must be a number");
    if let Some(h) = entry.sleep_hours {
        if !(0.0..=24.0).contains(&h) {
            errors.add("sleepHours", "Sleep hours must be between 0 and 24");
        }
    }

    for tag in form.all("symptoms") {
        if KNOWN_SYMPTOMS.contains(&tag) {
            entry.symptoms.insert(tag.to_string());
        } else {
            errors.add("symptoms", "Unknown symptom");
        }
    }
    entry.notes = form.get("notes").map(String::from);
    entry.medications = form.get("medications").map(String::from);
    entry.timestamp = Utc::now();

    errors.into_result(entry)
}

/// Field values that re-render `entry` in the tracker form
pub fn form_values(entry: &TrackingEntry) -> FormFields {
    let mut pairs: Vec<(&str, String)> = vec![("date", entry.date.format("%Y-%m-%d").to_string())];

    for name in LEVEL_FIELDS {
        pairs.push((name, level_of(entry, name).to_string()));
    }
    pairs.push(("bleeding", entry.bleeding.to_string()));
    pairs.push(("cervicalMucus", entry.cervical_mucus.to_string()));
    if let Some(mood) = entry.mood {
        pairs.push(("mood", mood.to_string()));
    }
    pairs.push(("cycleDay", entry.cycle_day.map(|d| d.to_string()).unwrap_or_default()));
    pairs.push(("sleepHours", entry.sleep_hours.map(|h| h.to_string()).unwrap_or_default()));
    for tag in &entry.symptoms {
        pairs.push(("symptoms", tag.clone()));
    }
    pairs.push(("notes", entry.notes.clone().unwrap_or_default()));
    pairs.push(("medications", entry.medications.clone().unwrap_or_default()));

    FormFields::from_pairs(pairs)
}

fn parse_field<T: FromStr>(
    form: &FormFields,
    name: &'static str,
    errors: &mut ValidationErrors,
    message: &str,
) -> Option<T> {
    let raw = form.get(name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(name, message);
            None
        }
    }
}

fn level_of(entry: &TrackingEntry, name: &str) -> Level {
    match name {
        "painLevel" => entry.pain_level,
        "pelvicPain" => entry.pelvic_pain,
        "backPain" => entry.back_pain,
        "headacheLevel" => entry.headache_level,
        "cramps" => entry.cramps,
        "anxietyLevel" => entry.anxiety_level,
        "stressLevel" => entry.stress_level,
        "sleepQuality" => entry.sleep_quality,
        "energyLevel" => entry.energy_level,
        _ => entry.fatigue_level,
    }
}

fn level_slot<'a>(entry: &'a mut TrackingEntry, name: &str) -> &'a mut Level {
    match name {
        "painLevel" => &mut entry.pain_level,
        "pelvicPain" => &mut entry.pelvic_pain,
        "backPain" => &mut entry.back_pain,
        "headacheLevel" => &mut entry.headache_level,
        "cramps" => &mut entry.cramps,
        "anxietyLevel" => &mut entry.anxiety_level,
        "stressLevel" => &mut entry.stress_level,
        "sleepQuality" => &mut entry.sleep_quality,
        "energyLevel" => &mut entry.energy_level,
        _ => &mut entry.fatigue_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::types::{Bleeding, CervicalMucus, Mood};

    #[test]
    fn test_full_submission() {
        let form = FormFields::parse(
            "date=2026-10-12&painLevel=6&pelvicPain=2&backPain=1&headacheLevel=0&bleeding=light\
             &cycleDay=3&cervicalMucus=egg-white&cramps=4&symptoms=bloating&symptoms=acne\
             &mood=good&anxietyLevel=3&stressLevel=5&sleepHours=7.5&sleepQuality=8\
             &energyLevel=6&fatigueLevel=2&notes=felt+ok%2C+mostly&medications=",
        );

        let entry = entry_from_form(&form).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(entry.pain_level.value(), 6);
        assert_eq!(entry.sleep_quality.value(), 8);
        assert_eq!(entry.bleeding, Bleeding::Light);
        assert_eq!(entry.cervical_mucus, CervicalMucus::EggWhite);
        assert_eq!(entry.mood, Some(Mood::Good));
        assert_eq!(entry.cycle_day, Some(3));
        assert_eq!(entry.sleep_hours, Some(7.5));
        assert_eq!(entry.notes.as_deref(), Some("felt ok, mostly"));
        assert_eq!(entry.medications, None);

        let symptoms: Vec<&str> = entry.symptoms.iter().map(String::as_str).collect();
        assert_eq!(symptoms, vec!["acne", "bloating"]);
    }

    #[test]
    fn test_unchecked_symptoms_are_absent() {
        let form = FormFields::parse("date=2026-10-12");
        let entry = entry_from_form(&form).unwrap();

        assert!(entry.symptoms.is_empty());
        assert_eq!(entry.mood, None);
    }

    #[test]
    fn test_field_errors() {
        let form = FormFields::parse("painLevel=loud&cycleDay=0&sleepHours=30&mood=meh");
        let errors = entry_from_form(&form).unwrap_err();

        assert!(errors.get("date").is_some());
        assert!(errors.get("painLevel").is_some());
        assert!(errors.get("cycleDay").is_some());
        assert!(errors.get("sleepHours").is_some());
        assert!(errors.get("mood").is_some());
    }

    #[test]
    fn test_form_values_decode_to_the_same_entry() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        let mut entry = TrackingEntry::new(day)
            .pain(7)
            .mood(Mood::Bad)
            .symptom("acne")
            .symptom("bloating")
            .notes("heavy day");
        entry.sleep_hours = Some(6.5);
        entry.bleeding = Bleeding::Heavy;

        let values = form_values(&entry);
        assert_eq!(values.get("painLevel"), Some("7"));
        assert_eq!(values.get("energyLevel"), Some("5"));
        assert_eq!(values.get("medications"), None);

        let decoded = entry_from_form(&values).unwrap();
        assert_eq!(decoded.pain_level, entry.pain_level);
        assert_eq!(decoded.mood, entry.mood);
        assert_eq!(decoded.symptoms, entry.symptoms);
        assert_eq!(decoded.bleeding, entry.bleeding);
        assert_eq!(decoded.sleep_hours, Some(6.5));
        assert_eq!(decoded.notes.as_deref(), Some("heavy day"));
    }

    #[test]
    fn test_level_above_scale_is_rejected() {
        let errors = entry_from_form(&FormFields::parse("date=2026-10-12&painLevel=50")).unwrap_err();
        assert_eq!(errors.get("painLevel"), Some("Choose a value from 0 to 10"));
    }

    #[test]
    fn test_unknown_symptom_is_rejected() {
        let form = FormFields::parse("date=2026-10-12&symptoms=acne&symptoms=acne%3B+nausea");
        let errors = entry_from_form(&form).unwrap_err();
        assert_eq!(errors.get("symptoms"), Some("Unknown symptom"));
    }
}
