//! Dashboard views: month calendar, weekly energy chart and metric cards

use chrono::{Datelike, Duration, Months, NaiveDate};

use maud::{html, Markup};

use super::query_string;
use crate::session::{display_name, initial, AuthSession};
use crate::tracker::TrackerStore;

/// Cells in the calendar grid, six rows of seven
pub const CALENDAR_CELLS: usize = 42;

const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CHART_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Resting heart rate shown on the metric card, in bpm
pub const HEART_RATE_BPM: u32 = 72;
/// Hemoglobin shown on the metric card, in g/dL
pub const HEMOGLOBIN_G_DL: f64 = 12.5;

/// Years the month navigation accepts
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Parse a `YYYY-MM` month parameter into the month's first day
///
/// Months outside [`YEAR_RANGE`] are rejected.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .ok()
        .filter(|d| YEAR_RANGE.contains(&d.year()))
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    // Only December rolls into the next year
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(31)
}

pub fn month_param(first: NaiveDate) -> String {
    first.format("%Y-%m").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    OtherMonth,
    CurrentMonth,
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub kind: CellKind,
}

/// One month laid out on a Sunday-first grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub first: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

impl CalendarView {
    /// Lay out the month containing `month`, highlighting `today`
    pub fn new(month: NaiveDate, today: NaiveDate) -> Self {
        let first = month.with_day(1).unwrap_or(month);
        let days_in_month = days_in_month(first);
        // The month before January is always December
        let prev_last = first.pred_opt().map(|d| d.day()).unwrap_or(31);
        let leading = first.weekday().num_days_from_sunday();

        let mut cells = Vec::with_capacity(CALENDAR_CELLS);

        for i in (0..leading).rev() {
            cells.push(CalendarCell {
                day: prev_last - i,
                kind: CellKind::OtherMonth,
            });
        }

        let is_current_month = today.year() == first.year() && today.month() == first.month();
        for day in 1..=days_in_month {
            let kind = if is_current_month && day == today.day() {
                CellKind::Today
            } else {
                CellKind::CurrentMonth
            };
            cells.push(CalendarCell { day, kind });
        }

        let mut day = 1;
        while cells.len() < CALENDAR_CELLS {
            cells.push(CalendarCell {
                day,
                kind: CellKind::OtherMonth,
            });
            day += 1;
        }

        Self { first, cells }
    }

    /// Heading such as `October 2026`
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn previous(&self) -> NaiveDate {
        self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first)
    }

    pub fn next(&self) -> NaiveDate {
        self.first.checked_add_months(Months::new(1)).unwrap_or(self.first)
    }
}

/// One bar of the weekly chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: &'static str,
    pub date: NaiveDate,
    pub percent: u8,
}

/// Energy levels for Monday to Sunday of the current week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekChart {
    pub bars: Vec<ChartBar>,
}

impl WeekChart {
    /// Days without an entry chart as 0%
    pub fn from_store(store: &TrackerStore, today: NaiveDate) -> Self {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

        let bars = CHART_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let date = monday + Duration::days(i as i64);
                let percent = store
                    .find_by_date(date)
                    .map(|e| e.energy_level.percent())
                    .unwrap_or(0);
                ChartBar {
                    label: *label,
                    date,
                    percent,
                }
            })
            .collect();

        Self { bars }
    }
}

/// Everything the dashboard page shows
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub auth: Option<AuthSession>,
    /// Identity came from `?name=&email=` rather than a session
    pub legacy_identity: bool,
    pub calendar: CalendarView,
    pub chart: WeekChart,
}

impl DashboardView {
    fn month_link(&self, month: NaiveDate) -> String {
        let month = month_param(month);
        match (&self.auth, self.legacy_identity) {
            (Some(auth), true) => format!(
                "/dashboard{}",
                query_string(&[
                    ("month", month.as_str()),
                    ("name", auth.username.as_str()),
                    ("email", auth.email.as_str()),
                ])
            ),
            _ => format!("/dashboard{}", query_string(&[("month", month.as_str())])),
        }
    }

    pub fn render(&self) -> Markup {
        let auth = self.auth.as_ref();
        let email = auth.map(|a| a.email.as_str()).filter(|e| !e.is_empty());

        html! {
            section class="dashboard-header" {
                div class="user-avatar" id="userAvatar" { (initial(auth)) }
                div {
                    h1 { "Welcome back, " span id="welcomeName" { (display_name(auth)) } "!" }
                    @if let Some(email) = email {
                        p class="user-email" { (email) }
                    }
                }
            }
            section class="metrics" {
                div class="metric-card" {
                    h3 { "Heart Rate" }
                    p { span id="heartRate" { (HEART_RATE_BPM) } " bpm" }
                }
                div class="metric-card" {
                    h3 { "Hemoglobin" }
                    p { span id="hemoglobin" { (format!("{:.1}", HEMOGLOBIN_G_DL)) } " g/dL" }
                }
            }
            (self.render_calendar())
            (self.render_chart())
        }
    }

    fn render_calendar(&self) -> Markup {
        html! {
            section class="calendar" {
                div class="calendar-nav" {
                    a class="month-prev" href=(self.month_link(self.calendar.previous())) { "‹" }
                    h2 id="calendarMonth" { (self.calendar.title()) }
                    a class="month-next" href=(self.month_link(self.calendar.next())) { "›" }
                }
                div class="calendar-grid" id="calendarGrid" {
                    @for header in WEEKDAY_HEADERS {
                        div class="calendar-day header" { (header) }
                    }
                    @for cell in &self.calendar.cells {
                        div class=(cell_class(cell.kind)) { (cell.day) }
                    }
                }
            }
        }
    }

    fn render_chart(&self) -> Markup {
        html! {
            section class="chart" {
                h2 { "Energy This Week" }
                div class="chart-container" id="chartContainer" {
                    @for bar in &self.chart.bars {
                        div class="bar-group" {
                            div class="bar" style={ "height: " (bar.percent) "%" } {}
                            div class="bar-label" { (bar.label) }
                        }
                    }
                }
            }
        }
    }
}

fn cell_class(kind: CellKind) -> &'static str {
    match kind {
        CellKind::OtherMonth => "calendar-day other-month",
        CellKind::CurrentMonth => "calendar-day",
        CellKind::Today => "calendar-day today",
    }
}
