//! Symptom Tracker
//!
//! Daily symptom entries for one session:
//!
//! - **types**: `TrackingEntry` and its categorical fields
//! - **store**: upsert-by-date collection kept newest first
//! - **form**: decoding a tracker form submission and re-populating it
//! - **history**: the recent-entries summary panel
//! - **export** / **import**: CSV download and restore
//! - **error**: error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gynai::tracker::{export_csv, Mood, TrackerStore, TrackingEntry};
//!
//! let mut store = TrackerStore::new();
//! let day = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
//! store.upsert(TrackingEntry::new(day).pain(3).mood(Mood::Good));
//! store.upsert(TrackingEntry::new(day).pain(5));
//!
//! assert_eq!(store.len(), 1);
//! let export = export_csv(store.all(), day).unwrap();
//! assert_eq!(export.rows, 1);
//! ```

pub mod error;
pub mod export;
pub mod form;
pub mod history;
pub mod import;
pub mod store;
pub mod types;

pub use error::{TrackerError, TrackerResult};
pub use export::{export_csv, export_filename, CsvExport, CSV_HEADERS};
pub use form::{entry_from_form, form_values};
pub use history::{date_label, history_items, render_history, HistoryItem, HISTORY_LIMIT};
pub use import::{import_csv, ImportReport};
pub use store::TrackerStore;
pub use types::{Bleeding, CervicalMucus, Level, Mood, TrackingEntry, KNOWN_SYMPTOMS};
