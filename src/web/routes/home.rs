//! Home Route
//!
//! - GET / - Landing page

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use super::html_page;
use crate::form::FormFields;
use crate::render::html;
use crate::session::{display_name, AuthSession};
use crate::web::state::AppState;

/// GET /
///
/// Signed-in visitors are offered the dashboard, everyone else the login.
/// A legacy `?name=` parameter counts as signed in for the dashboard link.
pub async fn home(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let session_auth = match state.sessions.from_headers(&headers).await {
        Some(session) => session.auth().await,
        None => None,
    };
    let legacy = AuthSession::from_query(&FormFields::parse(query.as_deref().unwrap_or("")));

    let dashboard_link = match (&session_auth, &legacy) {
        (Some(_), _) => "/dashboard".to_string(),
        (None, Some(auth)) => format!("/dashboard{}", auth.to_query()),
        (None, None) => "/login".to_string(),
    };
    let greeting_auth = session_auth.as_ref().or(legacy.as_ref());

    let body = html! {
        section class="hero" {
            h1 { "Your health, understood" }
            p {
                @if greeting_auth.is_some() {
                    "Welcome, " (display_name(greeting_auth)) ". "
                }
                "Track symptoms, find gynecologists near you and check your PCOS risk."
            }
            a class="btn btn-primary dashboard-btn" href=(dashboard_link) { "Go to Dashboard" }
        }
        section class="features" {
            a class="feature-card" href="/tracker" {
                h3 { "Symptom Tracker" }
                p { "Log pain, mood, sleep and cycle details every day." }
            }
            a class="feature-card" href="/doctors" {
                h3 { "Find Doctors" }
                p { "Search specialists by name, specialty, availability and distance." }
            }
            a class="feature-card" href="/predict" {
                h3 { "Risk Assessment" }
                p { "Get a PCOS risk estimate with personalized recommendations." }
            }
        }
    };

    html_page(StatusCode::OK, "Home", session_auth.as_ref(), &body, None)
}

#[cfg(test)]
mod tests {
    use crate::web::test_support::*;

    #[tokio::test]
    async fn test_guest_is_sent_to_login() {
        let app = app();
        let html = body_text(get(&app, "/", None).await).await;
        assert!(html.contains(r#"class="btn btn-primary dashboard-btn" href="/login""#));
    }

    #[tokio::test]
    async fn test_legacy_name_links_dashboard() {
        let app = app();
        let html = body_text(get(&app, "/?name=Ada", None).await).await;
        assert!(html.contains(r#"href="/dashboard?name=Ada""#));
        assert!(html.contains("Welcome, Ada."));
    }
}
