//! View Rendering
//!
//! Turns view models into HTML with `maud::html!`. Interpolated values are
//! escaped by the macro; nothing here splices raw strings into markup.
//!
//! - **layout**: page shell, navigation and toast
//! - **forms**: login, registration, tracker and prediction forms
//! - **dashboard**: calendar grid, weekly bar chart, metric cards
//! - **doctors**: doctor cards, statistics and filter tags
//! - **assessment**: risk result, risk factors and recommendation lists

pub mod assessment;
pub mod dashboard;
pub mod doctors;
pub mod forms;
pub mod layout;

pub use layout::{page, Toast, ToastKind};
pub use maud::{html, Markup};

/// Build a query string from key/value pairs, skipping empty values
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();

    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}
