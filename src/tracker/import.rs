//! CSV Import
//!
//! Reads a file produced by the exporter back into tracking entries, so a
//! downloaded history can be restored into a new session.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use std::io::Read;
use std::str::FromStr;

use super::error::{TrackerError, TrackerResult};
use super::export::{CSV_HEADERS, SYMPTOM_SEPARATOR};
use super::store::TrackerStore;
use super::types::{Level, TrackingEntry, KNOWN_SYMPTOMS};

/// Outcome of an import
#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries: Vec<TrackingEntry>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Upsert every parsed entry into `store`
    pub fn apply(self, store: &mut TrackerStore) -> usize {
        let count = self.entries.len();
        for entry in self.entries {
            store.upsert(entry);
        }
        count
    }
}

/// Parse exported CSV data
///
/// Rows that fail to parse are counted and described in the report rather
/// than aborting the whole import. A malformed header is an error.
pub fn import_csv<R: Read>(reader: R) -> TrackerResult<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() != CSV_HEADERS.len() {
        return Err(TrackerError::InvalidRow {
            row: 0,
            message: format!(
                "expected {} columns, found {}",
                CSV_HEADERS.len(),
                headers.len()
            ),
        });
    }

    let mut report = ImportReport::default();

    for (index, record) in rdr.records().enumerate() {
        // Header is row 1
        let row = index + 2;
        report.rows_processed += 1;

        let parsed = record
            .map_err(TrackerError::from)
            .and_then(|r| parse_record(&r, row));

        match parsed {
            Ok(entry) => report.entries.push(entry),
            Err(e) => {
                report.rows_failed += 1;
                report.errors.push(e.to_string());
            }
        }
    }

    tracing::info!(
        processed = report.rows_processed,
        failed = report.rows_failed,
        "Imported tracker CSV"
    );

    Ok(report)
}

fn parse_record(record: &csv::StringRecord, row: usize) -> TrackerResult<TrackingEntry> {
    if record.len() != CSV_HEADERS.len() {
        return Err(TrackerError::InvalidRow {
            row,
            message: format!("expected {} columns, found {}", CSV_HEADERS.len(), record.len()),
        });
    }

    let col = |i: usize| record.get(i).unwrap_or("").trim();
    let invalid = |e: &dyn std::fmt::Display| TrackerError::InvalidRow {
        row,
        message: e.to_string(),
    };

    let date = NaiveDate::parse_from_str(col(0), "%Y-%m-%d")
        .map_err(|_| invalid(&format!("invalid date {:?}", col(0))))?;

    let level = |i: usize| Level::from_str(col(i)).map_err(|e| invalid(&e));

    let mut symptoms = BTreeSet::new();
    for tag in col(9).split(SYMPTOM_SEPARATOR.trim()).map(str::trim) {
        if tag.is_empty() {
            continue;
        }
        if !KNOWN_SYMPTOMS.contains(&tag) {
            return Err(invalid(&format!("unknown symptom {:?}", tag)));
        }
        symptoms.insert(tag.to_string());
    }

    Ok(TrackingEntry {
        date,
        pain_level: level(1)?,
        pelvic_pain: level(2)?,
        back_pain: level(3)?,
        headache_level: level(4)?,
        bleeding: col(5).parse().map_err(|e| invalid(&e))?,
        cycle_day: optional(col(6)).map_err(|_| invalid(&format!("invalid cycle day {:?}", col(6))))?,
        cervical_mucus: col(7).parse().map_err(|e| invalid(&e))?,
        cramps: level(8)?,
        symptoms,
        mood: optional(col(10)).map_err(|e| invalid(&e))?,
        anxiety_level: level(11)?,
        stress_level: level(12)?,
        sleep_hours: optional(col(13))
            .map_err(|_| invalid(&format!("invalid sleep hours {:?}", col(13))))?,
        sleep_quality: level(14)?,
        energy_level: level(15)?,
        fatigue_level: level(16)?,
        notes: text(record.get(17)),
        medications: text(record.get(18)),
        timestamp: Utc::now(),
    })
}

fn optional<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn text(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::export::export_csv;
    use crate::tracker::types::{Bleeding, Mood};

    #[test]
    fn test_import_restores_exported_entries() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let mut entry = TrackingEntry::new(date)
            .pain(7)
            .mood(Mood::Bad)
            .symptom("nausea")
            .symptom("acne")
            .notes("headache after lunch, took a nap");
        entry.bleeding = Bleeding::Heavy;
        entry.cycle_day = Some(2);
        entry.sleep_hours = Some(6.5);
        entry.medications = Some("ibuprofen".to_string());

        let mut store = TrackerStore::new();
        store.upsert(entry.clone());
        let export = export_csv(store.all(), date).unwrap();

        let report = import_csv(export.content.as_bytes()).unwrap();
        assert_eq!(report.rows_processed, 1);
        assert_eq!(report.rows_failed, 0);

        let restored = &report.entries[0];
        assert_eq!(restored.date, entry.date);
        assert_eq!(restored.pain_level, entry.pain_level);
        assert_eq!(restored.bleeding, Bleeding::Heavy);
        assert_eq!(restored.cycle_day, Some(2));
        assert_eq!(restored.mood, Some(Mood::Bad));
        assert_eq!(restored.symptoms, entry.symptoms);
        assert_eq!(restored.sleep_hours, Some(6.5));
        assert_eq!(restored.notes, entry.notes);
        assert_eq!(restored.medications, entry.medications);
    }

    #[test]
    fn test_bad_rows_are_reported() {
        let mut csv_text = CSV_HEADERS.join(",");
        csv_text.push_str("\nnot-a-date,1,1,1,1,none,,dry,1,\"\",,1,1,,5,5,1,\"\",\"\"");
        csv_text.push_str("\n2026-10-01,1,1,1,1,flood,,dry,1,\"\",,1,1,,5,5,1,\"\",\"\"");
        csv_text.push_str("\n2026-10-02,1,1,1,1,light,,dry,1,\"\",,1,1,,5,5,1,\"\",\"\"");

        let report = import_csv(csv_text.as_bytes()).unwrap();
        assert_eq!(report.rows_processed, 3);
        assert_eq!(report.rows_failed, 2);
        assert_eq!(report.entries.len(), 1);
        assert!(report.errors[0].starts_with("Row 2"));

        let mut store = TrackerStore::new();
        assert_eq!(report.apply(&mut store), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_symptom_row_is_reported() {
        let mut csv_text = CSV_HEADERS.join(",");
        csv_text.push_str("\n2026-10-01,1,1,1,1,none,,dry,1,\"acne; spots\",,1,1,,5,5,1,\"\",\"\"");
        csv_text.push_str("\n2026-10-02,11,1,1,1,none,,dry,1,\"acne; nausea\",,1,1,,5,5,1,\"\",\"\"");

        let report = import_csv(csv_text.as_bytes()).unwrap();
        assert_eq!(report.rows_failed, 2);
        assert!(report.errors[0].contains("unknown symptom \"spots\""));
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_wrong_header_rejected() {
        let result = import_csv("a,b,c\n1,2,3".as_bytes());
        assert!(matches!(result, Err(TrackerError::InvalidRow { row: 0, .. })));
    }
}
