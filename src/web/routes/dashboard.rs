//! Dashboard Route
//!
//! - GET /dashboard?month=YYYY-MM[&name=&email=]

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use super::{html_page, today};
use crate::form::FormFields;
use crate::render::dashboard::{parse_month, CalendarView, DashboardView, WeekChart};
use crate::session::AuthSession;
use crate::tracker::TrackerStore;
use crate::web::state::AppState;

/// GET /dashboard
///
/// Identity comes from the session; without one, the legacy `name`/`email`
/// parameters are shown as a display-only identity. The weekly chart reads
/// the session's tracker entries.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let query = FormFields::parse(query.as_deref().unwrap_or(""));
    let today = today();
    let month = query.get("month").and_then(parse_month).unwrap_or(today);

    let session = state.sessions.from_headers(&headers).await;
    let session_auth = match &session {
        Some(s) => s.auth().await,
        None => None,
    };

    let chart = match &session {
        Some(s) => WeekChart::from_store(&*s.tracker().read().await, today),
        None => WeekChart::from_store(&TrackerStore::new(), today),
    };

    let (auth, legacy_identity) = match session_auth {
        Some(auth) => (Some(auth), false),
        None => {
            let legacy = AuthSession::from_query(&query);
            let is_legacy = legacy.is_some();
            (legacy, is_legacy)
        }
    };

    let view = DashboardView {
        auth,
        legacy_identity,
        calendar: CalendarView::new(month, today),
        chart,
    };

    let nav_auth = if legacy_identity { None } else { view.auth.as_ref() };
    html_page(StatusCode::OK, "Dashboard", nav_auth, &view.render(), None)
}
