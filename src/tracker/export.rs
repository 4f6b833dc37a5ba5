//! CSV Export
//!
//! Serialises the tracker collection for download. Free-text columns and the
//! symptom list are always quoted; numeric and enum columns never are.

use chrono::NaiveDate;

use super::error::{TrackerError, TrackerResult};
use super::types::TrackingEntry;

/// Header row, in column order
pub const CSV_HEADERS: [&str; 19] = [
    "Date",
    "Pain Level",
    "Pelvic Pain",
    "Back Pain",
    "Headache",
    "Bleeding",
    "Cycle Day",
    "Cervical Mucus",
    "Cramps",
    "Physical Symptoms",
    "Mood",
    "Anxiety",
    "Stress",
    "Sleep Hours",
    "Sleep Quality",
    "Energy Level",
    "Fatigue",
    "Notes",
    "Medications",
];

/// Separator between symptom tags inside the quoted symptom column
pub const SYMPTOM_SEPARATOR: &str = "; ";

/// A finished export, ready to be sent as a download
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

impl CsvExport {
    pub const CONTENT_TYPE: &'static str = "text/csv; charset=utf-8";
}

/// Download filename for an export produced on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("gynai-symptom-tracker-{}.csv", date.format("%Y-%m-%d"))
}

/// Export entries to CSV text
///
/// Returns [`TrackerError::NothingToExport`] when there is nothing to write.
pub fn export_csv<'a, I>(entries: I, today: NaiveDate) -> TrackerResult<CsvExport>
where
    I: IntoIterator<Item = &'a TrackingEntry>,
{
    let mut content = String::new();
    content.push_str(&CSV_HEADERS.join(","));

    let mut rows = 0;
    for entry in entries {
        content.push('\n');
        content.push_str(&format_row(entry));
        rows += 1;
    }

    if rows == 0 {
        return Err(TrackerError::NothingToExport);
    }

    tracing::info!(rows, "Exported tracker data");

    Ok(CsvExport {
        filename: export_filename(today),
        content,
        rows,
    })
}

fn format_row(entry: &TrackingEntry) -> String {
    let symptoms: Vec<&str> = entry.symptoms.iter().map(String::as_str).collect();

    let fields = [
        entry.date.format("%Y-%m-%d").to_string(),
        entry.pain_level.to_string(),
        entry.pelvic_pain.to_string(),
        entry.back_pain.to_string(),
        entry.headache_level.to_string(),
        entry.bleeding.to_string(),
        optional(entry.cycle_day),
        entry.cervical_mucus.to_string(),
        entry.cramps.to_string(),
        quoted(&symptoms.join(SYMPTOM_SEPARATOR)),
        optional(entry.mood),
        entry.anxiety_level.to_string(),
        entry.stress_level.to_string(),
        optional(entry.sleep_hours),
        entry.sleep_quality.to_string(),
        entry.energy_level.to_string(),
        entry.fatigue_level.to_string(),
        quoted(entry.notes.as_deref().unwrap_or("")),
        quoted(entry.medications.as_deref().unwrap_or("")),
    ];

    fields.join(",")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::types::Mood;
    use crate::tracker::TrackerStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_empty_export_signals_nothing() {
        let store = TrackerStore::new();
        let result = export_csv(store.all(), day(18));
        assert!(matches!(result, Err(TrackerError::NothingToExport)));
    }

    #[test]
    fn test_filename_pattern() {
        assert_eq!(export_filename(day(18)), "gynai-symptom-tracker-2026-10-18.csv");
    }

    #[test]
    fn test_notes_with_comma_reparse_to_same_string() {
        let mut store = TrackerStore::new();
        store.upsert(TrackingEntry::new(day(5)).notes("tired, \"achy\" and sore"));

        let export = export_csv(store.all(), day(18)).unwrap();
        assert_eq!(export.rows, 1);

        let mut reader = csv::Reader::from_reader(export.content.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), CSV_HEADERS.len());

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[17], "tired, \"achy\" and sore");
    }

    #[test]
    fn test_quoting_and_missing_values() {
        let entry = TrackingEntry::new(day(2))
            .pain(6)
            .symptom("bloating")
            .symptom("acne");

        let row = format_row(&entry);
        assert!(row.starts_with("2026-10-02,6,0,0,0,none,,dry,0,\"acne; bloating\",,"));
        assert!(row.ends_with(",\"\",\"\""));
        assert!(!row.contains("null"));
        assert!(!row.contains("None"));
    }

    #[test]
    fn test_rows_follow_store_order() {
        let mut store = TrackerStore::new();
        store.upsert(TrackingEntry::new(day(1)).mood(Mood::Okay));
        store.upsert(TrackingEntry::new(day(9)).mood(Mood::Great));

        let export = export_csv(store.all(), day(18)).unwrap();
        let lines: Vec<&str> = export.content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date,Pain Level"));
        assert!(lines[1].starts_with("2026-10-09"));
        assert!(lines[2].starts_with("2026-10-01"));
    }
}
