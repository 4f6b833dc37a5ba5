//! Symptom Tracker Routes
//!
//! - GET /tracker?date=YYYY-MM-DD - Form for a date, pre-filled when an entry exists
//! - POST /tracker - Save (upsert) the entry for the submitted date
//! - GET /tracker/export - Download every entry as CSV
//!
//! The first tracker visit starts a guest session when none exists.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use std::sync::Arc;

use super::{html_page, redirect, today, with_cookie};
use crate::form::FormFields;
use crate::render::forms::{tracker_date, tracker_form};
use crate::render::{html, query_string, Markup, Toast};
use crate::session::{session_cookie, Session};
use crate::tracker::{
    entry_from_form, export_csv, form_values, history_items, render_history, CsvExport,
    TrackerError, TrackingEntry,
};
use crate::validation::ValidationErrors;
use crate::web::error::WebResult;
use crate::web::state::AppState;

pub const SAVED_MESSAGE: &str = "Entry saved successfully!";
pub const NOTHING_TO_EXPORT_MESSAGE: &str = "No data to export yet!";

/// Form values for the stored entry on `date`, or a fresh one
async fn stored_values(session: &Session, date: NaiveDate) -> FormFields {
    let store = session.tracker().read().await;
    match store.find_by_date(date) {
        Some(entry) => form_values(entry),
        None => form_values(&TrackingEntry::new(date)),
    }
}

/// Tracker form plus the history panel
async fn tracker_body(session: &Session, values: &FormFields, errors: &ValidationErrors) -> Markup {
    let store = session.tracker().read().await;
    let history = render_history(&history_items(store.all(), today()));

    html! {
        section class="tracker" {
            h1 { "Symptom Tracker" }
            (tracker_form(values, errors))
        }
        section class="history" {
            h2 { "Recent Entries" }
            div id="historyList" { (history) }
        }
    }
}

/// GET /tracker
pub async fn tracker_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let query = FormFields::parse(query.as_deref().unwrap_or(""));
    let (session, created) = state.sessions.get_or_create(&headers).await;
    let date = tracker_date(&query, today());
    let toast = query.checked("saved").then(|| Toast::success(SAVED_MESSAGE));

    let values = stored_values(&session, date).await;
    let body = tracker_body(&session, &values, &ValidationErrors::new()).await;
    let auth = session.auth().await;
    let response = html_page(StatusCode::OK, "Symptom Tracker", auth.as_ref(), &body, toast.as_ref());

    if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    }
}

/// POST /tracker
///
/// A valid submission replaces any entry for the same date and redirects
/// back to that date. An invalid one re-renders the form as submitted, with
/// inline errors.
pub async fn save_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let form = FormFields::parse(&body);
    let (session, created) = state.sessions.get_or_create(&headers).await;

    let response = match entry_from_form(&form) {
        Ok(entry) => {
            let date = entry.date.format("%Y-%m-%d").to_string();
            {
                let mut store = session.tracker().write().await;
                store.upsert(entry);
                tracing::info!(session = %session.id(), date = %date, entries = store.len(), "Tracker entry saved");
            }
            redirect(&format!(
                "/tracker{}",
                query_string(&[("date", date.as_str()), ("saved", "1")])
            ))
        }
        Err(errors) => {
            tracing::debug!(session = %session.id(), errors = errors.len(), "Tracker entry rejected");
            let date = tracker_date(&form, today());
            let values = form.clone().or_defaults(form_values(&TrackingEntry::new(date)));
            let body = tracker_body(&session, &values, &errors).await;
            let auth = session.auth().await;
            html_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Symptom Tracker",
                auth.as_ref(),
                &body,
                None,
            )
        }
    };

    if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    }
}

fn download(export: CsvExport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, CsvExport::CONTENT_TYPE)],
        export.content,
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

/// GET /tracker/export
///
/// With nothing recorded the tracker page is shown again with a notice and
/// no file is produced.
pub async fn export(State(state): State<Arc<AppState>>, headers: HeaderMap) -> WebResult<Response> {
    let (session, created) = state.sessions.get_or_create(&headers).await;
    let today = today();

    let result = {
        let store = session.tracker().read().await;
        export_csv(store.all(), today)
    };

    let response = match result {
        Ok(export) => {
            tracing::info!(session = %session.id(), rows = export.rows, "Tracker export downloaded");
            download(export)
        }
        Err(TrackerError::NothingToExport) => {
            let values = stored_values(&session, today).await;
            let body = tracker_body(&session, &values, &ValidationErrors::new()).await;
            let auth = session.auth().await;
            html_page(
                StatusCode::NOT_FOUND,
                "Symptom Tracker",
                auth.as_ref(),
                &body,
                Some(&Toast::info(NOTHING_TO_EXPORT_MESSAGE)),
            )
        }
        Err(e) => return Err(e.into()),
    };

    Ok(if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::*;

    const ENTRY: &str = "date=2026-10-12&painLevel=6&energyLevel=8&bleeding=light\
        &cervicalMucus=creamy&symptoms=bloating&symptoms=acne&mood=good\
        &sleepHours=7.5&notes=Long+day%2C+tired";

    #[tokio::test]
    async fn test_first_visit_starts_guest_session() {
        let app = app();
        let response = get(&app, "/tracker?date=2026-10-12", None).await;
        assert_status(&response, StatusCode::OK);
        assert!(response_session_cookie(&response).is_some());

        let html = body_text(response).await;
        assert!(html.contains(r#"value="2026-10-12""#));
        assert!(html.contains("No entries yet"));
    }

    #[tokio::test]
    async fn test_save_then_reload_prefills_form() {
        let app = app();
        let response = post_form(&app, "/tracker", ENTRY, None).await;
        assert_status(&response, StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&response), Some("/tracker?date=2026-10-12&saved=1"));
        let cookie = response_session_cookie(&response).unwrap();

        let html = body_text(get(&app, "/tracker?date=2026-10-12&saved=1", Some(&cookie)).await).await;
        assert!(html.contains(SAVED_MESSAGE));
        assert!(html.contains(r#"id="painLevel" name="painLevel" min="0" max="10" value="6""#));
        assert!(html.contains("Long day, tired"));
    }

    #[tokio::test]
    async fn test_resubmitting_a_date_replaces_entry() {
        let app = app();
        let response = post_form(&app, "/tracker", ENTRY, None).await;
        let cookie = response_session_cookie(&response).unwrap();

        let replacement = "date=2026-10-12&painLevel=2&bleeding=none&cervicalMucus=dry";
        let response = post_form(&app, "/tracker", replacement, Some(&cookie)).await;
        assert_status(&response, StatusCode::SEE_OTHER);

        let response = get(&app, "/tracker/export", Some(&cookie)).await;
        assert_status(&response, StatusCode::OK);
        let csv = body_text(response).await;
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("2026-10-12,2,"));
    }

    #[tokio::test]
    async fn test_invalid_submission_is_unprocessable() {
        let app = app();
        let response = post_form(&app, "/tracker", "date=2026-10-12&painLevel=lots", None).await;
        assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains(r#"id="painLevelError""#));
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_what_was_typed() {
        let app = app();
        let response = post_form(&app, "/tracker", ENTRY, None).await;
        let cookie = response_session_cookie(&response).unwrap();

        let edit = "date=2026-10-12&painLevel=7&notes=keep+me&sleepHours=30&symptoms=nausea";
        let response = post_form(&app, "/tracker", edit, Some(&cookie)).await;
        assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains(r#"id="sleepHoursError""#));
        assert!(html.contains(r#"class="form-input error" value="30""#));
        assert!(html.contains(r#"id="painLevel" name="painLevel" min="0" max="10" value="7""#));
        assert!(html.contains(">keep me</textarea>"));
        assert!(html.contains(r#"value="nausea" checked"#));
        assert!(!html.contains(r#"value="bloating" checked"#));
        assert!(html.contains(r#"id="energyLevel" name="energyLevel" min="0" max="10" value="5""#));
    }

    #[tokio::test]
    async fn test_export_download_headers() {
        let app = app();
        let response = post_form(&app, "/tracker", ENTRY, None).await;
        let cookie = response_session_cookie(&response).unwrap();

        let response = get(&app, "/tracker/export", Some(&cookie)).await;
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], CsvExport::CONTENT_TYPE);
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"gynai-symptom-tracker-"));

        let csv = body_text(response).await;
        assert!(csv.starts_with("Date,Pain Level,Pelvic Pain"));
        assert!(csv.contains("\"Long day, tired\""));
    }

    #[tokio::test]
    async fn test_empty_export_produces_no_file() {
        let app = app();
        let response = get(&app, "/tracker/export", None).await;
        assert_status(&response, StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());

        let html = body_text(response).await;
        assert!(html.contains(NOTHING_TO_EXPORT_MESSAGE));
    }
}
