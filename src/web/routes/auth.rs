//! Authentication Routes
//!
//! - GET /login, POST /login - Sign in through the backend
//! - GET /register, POST /register - Create an account
//! - POST /logout - End the session
//!
//! Sign-in and registration run under the session's `Login` and `Register`
//! slots, so a second submission supersedes one still in flight.

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use super::{html_page, redirect, with_cookie};
use crate::client::{ClientError, RequestKind};
use crate::form::FormFields;
use crate::render::forms::{login_form, register_form};
use crate::render::Toast;
use crate::session::{clear_session_cookie, session_cookie, AuthSession};
use crate::validation::{validate_login, validate_registration, ValidationErrors};
use crate::web::state::AppState;

/// Toast shown on the login page after registering
pub const REGISTERED_MESSAGE: &str = "Account created successfully! Please log in.";

/// Status and toast for a failed backend call
fn failure(error: &ClientError) -> (StatusCode, Toast) {
    match error {
        ClientError::Rejected(msg) => (StatusCode::UNAUTHORIZED, Toast::error(msg.clone())),
        ClientError::Superseded => (StatusCode::CONFLICT, Toast::info(error.user_message())),
        _ => (StatusCode::BAD_GATEWAY, Toast::error(error.user_message())),
    }
}

/// GET /login
pub async fn login_page(RawQuery(query): RawQuery) -> Response {
    let query = FormFields::parse(query.as_deref().unwrap_or(""));
    let toast = query
        .checked("registered")
        .then(|| Toast::success(REGISTERED_MESSAGE));

    html_page(
        StatusCode::OK,
        "Login",
        None,
        &login_form("", &ValidationErrors::new()),
        toast.as_ref(),
    )
}

/// POST /login
///
/// On success the session is signed in and the browser is sent to the
/// dashboard.
pub async fn login(State(state): State<Arc<AppState>>, headers: HeaderMap, body: String) -> Response {
    let form = FormFields::parse(&body);
    let identifier = form.raw("email");

    let credentials = match validate_login(identifier, form.raw("password")) {
        Ok(c) => c,
        Err(errors) => {
            return html_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Login",
                None,
                &login_form(identifier, &errors),
                None,
            );
        }
    };

    let (session, created) = state.sessions.get_or_create(&headers).await;
    let result = session
        .guards()
        .run(
            RequestKind::Login,
            state.backend.login(&credentials.identifier, &credentials.password),
        )
        .await;

    let response = match result {
        Ok(user) => {
            session
                .sign_in(AuthSession::new(user.username, user.email))
                .await;
            redirect("/dashboard")
        }
        Err(e) => {
            tracing::warn!(session = %session.id(), error = %e, "Login failed");
            let (status, toast) = failure(&e);
            html_page(
                status,
                "Login",
                None,
                &login_form(identifier, &ValidationErrors::new()),
                Some(&toast),
            )
        }
    };

    if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    }
}

/// GET /register
pub async fn register_page() -> Response {
    html_page(
        StatusCode::OK,
        "Sign Up",
        None,
        &register_form("", "", &ValidationErrors::new()),
        None,
    )
}

/// POST /register
///
/// On success the browser is sent to the login page.
pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let form = FormFields::parse(&body);
    let (name, email) = (form.raw("name"), form.raw("email"));

    let registration = match validate_registration(
        name,
        email,
        form.raw("password"),
        form.raw("repeat-password"),
    ) {
        Ok(r) => r,
        Err(errors) => {
            return html_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Sign Up",
                None,
                &register_form(name, email, &errors),
                None,
            );
        }
    };

    let (session, created) = state.sessions.get_or_create(&headers).await;
    let result = session
        .guards()
        .run(RequestKind::Register, state.backend.register(&registration))
        .await;

    let response = match result {
        Ok(()) => {
            tracing::info!(username = %registration.username, "Account registered");
            redirect("/login?registered=1")
        }
        Err(e) => {
            tracing::warn!(session = %session.id(), error = %e, "Registration failed");
            let (status, toast) = failure(&e);
            let status = if status == StatusCode::UNAUTHORIZED {
                StatusCode::CONFLICT
            } else {
                status
            };
            html_page(
                status,
                "Sign Up",
                None,
                &register_form(name, email, &ValidationErrors::new()),
                Some(&toast),
            )
        }
    };

    if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    }
}

/// POST /logout
///
/// Drops the session with everything it held, tracker entries included.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(session) = state.sessions.from_headers(&headers).await {
        state.sessions.remove(session.id()).await;
    }
    with_cookie(redirect("/"), &clear_session_cookie())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockBackend;
    use crate::web::test_support::*;

    #[tokio::test]
    async fn test_invalid_login_is_rejected_inline() {
        let app = app();
        let response = post_form(&app, "/login", "email=ab&password=123", None).await;
        assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains(r#"id="emailError""#));
        assert!(html.contains("Password must be at least 6 characters long"));
    }

    #[tokio::test]
    async fn test_login_signs_in_session() {
        let app = app();
        let response = post_form(
            &app,
            "/login",
            "email=alice%40example.com&password=secret1",
            None,
        )
        .await;
        assert_status(&response, StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&response), Some("/dashboard"));

        let cookie = response_session_cookie(&response).unwrap();
        let html = body_text(get(&app, "/dashboard", Some(&cookie)).await).await;
        assert!(html.contains(r#"<span id="welcomeName">alice</span>"#));
    }

    #[tokio::test]
    async fn test_wrong_password_shows_backend_error() {
        let app = app();
        let response = post_form(&app, "/login", "email=alice&password=wrong12", None).await;
        assert_status(&response, StatusCode::UNAUTHORIZED);

        let html = body_text(response).await;
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains(r#"value="alice""#));
    }

    #[tokio::test]
    async fn test_backend_down_is_bad_gateway() {
        let app = app_with(MockBackend::offline());
        let response = post_form(&app, "/login", "email=alice&password=secret1", None).await;
        assert_status(&response, StatusCode::BAD_GATEWAY);

        let html = body_text(response).await;
        assert!(html.contains("Please check if the server is running"));
    }

    #[tokio::test]
    async fn test_register_then_login_page_toast() {
        let app = app();
        let response = post_form(
            &app,
            "/register",
            "name=bob&email=bob%40example.com&password=secret1&repeat-password=secret1",
            None,
        )
        .await;
        assert_status(&response, StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&response), Some("/login?registered=1"));

        let html = body_text(get(&app, "/login?registered=1", None).await).await;
        assert!(html.contains(REGISTERED_MESSAGE));
    }

    #[tokio::test]
    async fn test_register_mismatch_and_duplicate() {
        let app = app();
        let response = post_form(
            &app,
            "/register",
            "name=bob&email=bob%40example.com&password=secret1&repeat-password=secret2",
            None,
        )
        .await;
        assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Passwords do not match"));

        let response = post_form(
            &app,
            "/register",
            "name=alice&email=alice%40example.com&password=secret1&repeat-password=secret1",
            None,
        )
        .await;
        assert_status(&response, StatusCode::CONFLICT);
        assert!(body_text(response).await.contains("Email already registered"));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let app = app();
        let response = post_form(&app, "/login", "email=alice&password=secret1", None).await;
        let cookie = response_session_cookie(&response).unwrap();

        let response = post_form(&app, "/logout", "", Some(&cookie)).await;
        assert_status(&response, StatusCode::SEE_OTHER);
        assert!(response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .contains("Max-Age=0"));

        let html = body_text(get(&app, "/dashboard", Some(&cookie)).await).await;
        assert!(html.contains(r#"<span id="welcomeName">User</span>"#));
    }
}
