//! Web Error Types
//!
//! Failures that escape a handler. Validation and backend errors never get
//! here; handlers render those inline or as a toast on the re-rendered page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render::{html, page};
use crate::tracker::TrackerError;

#[derive(Error, Debug)]
pub enum WebError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tracker export or import failed
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            WebError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            WebError::Tracker(TrackerError::NothingToExport) => {
                (StatusCode::NOT_FOUND, "NOTHING_TO_EXPORT")
            }
            WebError::Tracker(_) => (StatusCode::UNPROCESSABLE_ENTITY, "TRACKER_ERROR"),
            WebError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            WebError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request failed"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let body = html! {
            section class="error-page" {
                h1 { (title) }
                p { (self.to_string()) }
                p class="request-id" { "Request ID: " code { (request_id) } }
                a class="btn btn-primary" href="/" { "Back to home" }
            }
        };

        (status, Html(page(title, None, &body, None).into_string())).into_response()
    }
}

/// Result type for handlers
pub type WebResult<T> = Result<T, WebError>;
