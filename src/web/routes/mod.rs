//! Page Routes
//!
//! Route handlers organized by page, plus the response helpers they share.

pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod home;
pub mod prediction;
pub mod tracker;

use axum::{
    http::{header, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;

use crate::render::{page, Markup, Toast};
use crate::session::AuthSession;
use crate::web::error::WebError;

/// The user's calendar date
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A full HTML page
pub(crate) fn html_page(
    status: StatusCode,
    title: &str,
    auth: Option<&AuthSession>,
    body: &Markup,
    toast: Option<&Toast>,
) -> Response {
    (status, Html(page(title, auth, body, toast).into_string())).into_response()
}

/// `303 See Other` to `to`
pub(crate) fn redirect(to: &str) -> Response {
    Redirect::to(to).into_response()
}

/// Append a `Set-Cookie` header
pub(crate) fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Invalid Set-Cookie value"),
    }
    response
}

pub async fn not_found(uri: Uri) -> WebError {
    WebError::NotFound(format!("No page at {}", uri.path()))
}
