//! History Renderer
//!
//! Summarises the most recent tracking entries for the tracker page.

use chrono::{Duration, NaiveDate};

use super::types::TrackingEntry;
use maud::{html, Markup};

/// Number of entries shown in the history panel
pub const HISTORY_LIMIT: usize = 5;

/// Glyph shown when no mood was recorded
pub const MOOD_PLACEHOLDER: &str = "—";

/// One summarised history row
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub date_label: String,
    pub pain: String,
    pub mood_glyph: &'static str,
    pub mood_text: String,
    pub bleeding: String,
    pub sleep: String,
    pub notes: Option<String>,
}

/// Label a date relative to `today`
///
/// "Today", "Yesterday", or an en-US short date such as `Oct 3, 2026`.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_sub_signed(Duration::days(1)) {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

impl HistoryItem {
    pub fn from_entry(entry: &TrackingEntry, today: NaiveDate) -> Self {
        Self {
            date_label: date_label(entry.date, today),
            pain: format!("{}/10", entry.pain_level),
            mood_glyph: entry.mood.map(|m| m.glyph()).unwrap_or(MOOD_PLACEHOLDER),
            mood_text: entry
                .mood
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Not set".to_string()),
            bleeding: entry.bleeding.to_string(),
            sleep: entry
                .sleep_hours
                .map(|h| h.to_string())
                .unwrap_or_else(|| MOOD_PLACEHOLDER.to_string()),
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Build the history view for the newest entries
pub fn history_items<'a, I>(entries: I, today: NaiveDate) -> Vec<HistoryItem>
where
    I: IntoIterator<Item = &'a TrackingEntry>,
{
    entries
        .into_iter()
        .take(HISTORY_LIMIT)
        .map(|e| HistoryItem::from_entry(e, today))
        .collect()
}

/// Render the history panel
///
/// An empty list renders a single placeholder block.
pub fn render_history(items: &[HistoryItem]) -> Markup {
    html! {
        @if items.is_empty() {
            div class="history-empty" {
                p { "No entries yet. Start tracking your symptoms!" }
            }
        }
        @for item in items {
            div class="history-item" {
                div class="history-date" { (item.date_label) }
                div class="history-summary" {
                    "Pain: " (item.pain)
                    " • Mood: " (item.mood_glyph) " " (item.mood_text)
                    " • Bleeding: " (item.bleeding)
                    " • Sleep: " (item.sleep) " hrs"
                }
                @if let Some(notes) = &item.notes {
                    div class="history-notes" { (notes) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::types::{Bleeding, Mood};
    use crate::tracker::TrackerStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_date_labels() {
        assert_eq!(date_label(today(), today()), "Today");
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(), today()),
            "Yesterday"
        );
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(), today()),
            "Oct 3, 2026"
        );
    }

    #[test]
    fn test_mood_glyphs() {
        let mut entry = TrackingEntry::new(today()).mood(Mood::Great);
        let item = HistoryItem::from_entry(&entry, today());
        assert_eq!(item.mood_glyph, "😄");
        assert_eq!(item.mood_text, "great");

        entry.mood = None;
        let item = HistoryItem::from_entry(&entry, today());
        assert_eq!(item.mood_glyph, MOOD_PLACEHOLDER);
        assert_eq!(item.mood_text, "Not set");
    }

    #[test]
    fn test_history_limited_to_five() {
        let mut store = TrackerStore::new();
        for d in 1..=9 {
            store.upsert(TrackingEntry::new(NaiveDate::from_ymd_opt(2026, 10, d).unwrap()));
        }

        let items = history_items(store.all(), today());
        assert_eq!(items.len(), HISTORY_LIMIT);
        assert_eq!(items[0].date_label, "Oct 9, 2026");
    }

    #[test]
    fn test_render_empty_placeholder() {
        let html = render_history(&[]).into_string();
        assert!(html.contains("No entries yet"));
        assert!(!html.contains("history-item"));
    }

    #[test]
    fn test_render_escapes_notes() {
        let mut entry = TrackingEntry::new(today()).notes("<b>cramps</b> & rest");
        entry.bleeding = Bleeding::Light;
        entry.sleep_hours = Some(7.5);

        let s = render_history(&history_items([&entry], today())).into_string();
        assert!(s.contains("Today"));
        assert!(s.contains("Bleeding: light"));
        assert!(s.contains("Sleep: 7.5 hrs"));
        assert!(s.contains("&lt;b&gt;cramps&lt;/b&gt; &amp; rest"));
    }
}
