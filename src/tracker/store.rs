//! Tracker Store
//!
//! Session-scoped collection of tracking entries, keyed by date and kept
//! sorted newest first.

use chrono::NaiveDate;

use super::types::TrackingEntry;

/// Ordered collection of [`TrackingEntry`] values
///
/// Holds at most one entry per date. Every mutation leaves the entries sorted
/// descending by date.
#[derive(Debug, Clone, Default)]
pub struct TrackerStore {
    entries: Vec<TrackingEntry>,
}

impl TrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry for the same date
    pub fn upsert(&mut self, entry: TrackingEntry) {
        match self.entries.iter().position(|e| e.date == entry.date) {
            Some(index) => {
                tracing::debug!(date = %entry.date, "Replacing tracking entry");
                self.entries[index] = entry;
            }
            None => {
                tracing::debug!(date = %entry.date, "Adding tracking entry");
                self.entries.push(entry);
            }
        }

        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Look up the entry recorded for `date`
    pub fn find_by_date(&self, date: NaiveDate) -> Option<&TrackingEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Iterate over all entries, newest first
    ///
    /// The iterator is cheap to clone, so callers can walk it more than once.
    pub fn all(&self) -> std::slice::Iter<'_, TrackingEntry> {
        self.entries.iter()
    }

    /// The `n` most recent entries
    pub fn recent(&self, n: usize) -> &[TrackingEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Entries dated within `start..=end`, newest first
    pub fn window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &TrackingEntry> + Clone + '_ {
        self.entries
            .iter()
            .filter(move |e| e.date >= start && e.date <= end)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TrackerStore {
    type Item = &'a TrackingEntry;
    type IntoIter = std::slice::Iter<'a, TrackingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
