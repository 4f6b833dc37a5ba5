//! Risk Assessment Routes
//!
//! - GET /predict - Empty assessment form
//! - POST /predict - Validate, call the prediction service, show the result
//! - GET /predict/recommendations - Recommendations for the session's last result

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use super::{html_page, with_cookie};
use crate::client::{ClientError, RequestKind};
use crate::form::FormFields;
use crate::prediction::{Assessment, PredictionRequest};
use crate::render::assessment::{connection_error_view, recommendations_view, result_view};
use crate::render::forms::prediction_form;
use crate::render::{html, Markup, Toast};
use crate::session::{session_cookie, AuthSession};
use crate::validation::ValidationErrors;
use crate::web::state::AppState;

pub const NO_ASSESSMENT_MESSAGE: &str = "Complete an assessment to get recommendations";

fn assessment_page(
    status: StatusCode,
    auth: Option<&AuthSession>,
    form: &FormFields,
    errors: &ValidationErrors,
    result: Option<&Markup>,
    toast: Option<&Toast>,
) -> Response {
    let body = html! {
        section class="assessment" {
            h1 { "PCOS Risk Assessment" }
            (prediction_form(form, errors))
        }
        @if let Some(result) = result {
            (result)
        }
    };
    html_page(status, "Risk Assessment", auth, &body, toast)
}

async fn current_auth(state: &AppState, headers: &HeaderMap) -> Option<AuthSession> {
    match state.sessions.from_headers(headers).await {
        Some(session) => session.auth().await,
        None => None,
    }
}

/// GET /predict
pub async fn prediction_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let auth = current_auth(&state, &headers).await;
    assessment_page(
        StatusCode::OK,
        auth.as_ref(),
        &FormFields::default(),
        &ValidationErrors::new(),
        None,
        None,
    )
}

/// POST /predict
///
/// Runs under the session's `Predict` slot; a result that arrives after a
/// newer submission is discarded.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let form = FormFields::parse(&body);

    let request = match PredictionRequest::from_form(&form) {
        Ok(r) => r,
        Err(errors) => {
            let auth = current_auth(&state, &headers).await;
            return assessment_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                auth.as_ref(),
                &form,
                &errors,
                None,
                None,
            );
        }
    };

    let (session, created) = state.sessions.get_or_create(&headers).await;
    let auth = session.auth().await;

    let result = session
        .guards()
        .run(RequestKind::Predict, state.backend.predict(&request))
        .await;

    let response = match result {
        Ok(result) => {
            tracing::info!(
                session = %session.id(),
                prediction = result.prediction,
                confidence = result.confidence,
                "Prediction received"
            );
            let assessment = Assessment::new(request, result);
            let view = result_view(&assessment);
            session.set_assessment(assessment).await;
            assessment_page(
                StatusCode::OK,
                auth.as_ref(),
                &form,
                &ValidationErrors::new(),
                Some(&view),
                None,
            )
        }
        Err(ClientError::Superseded) => assessment_page(
            StatusCode::CONFLICT,
            auth.as_ref(),
            &form,
            &ValidationErrors::new(),
            None,
            Some(&Toast::info(ClientError::Superseded.user_message())),
        ),
        Err(e) => {
            tracing::error!(session = %session.id(), error = %e, "Prediction failed");
            let detail = e.to_string();
            assessment_page(
                StatusCode::BAD_GATEWAY,
                auth.as_ref(),
                &form,
                &ValidationErrors::new(),
                Some(&connection_error_view(Some(&detail))),
                Some(&Toast::error(e.user_message())),
            )
        }
    };

    if created {
        with_cookie(response, &session_cookie(session.id()))
    } else {
        response
    }
}

/// GET /predict/recommendations
pub async fn recommendations(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let session = state.sessions.from_headers(&headers).await;
    let (auth, assessment) = match &session {
        Some(s) => (s.auth().await, s.last_assessment().await),
        None => (None, None),
    };

    match assessment {
        Some(assessment) => {
            let body = html! {
                (result_view(&assessment))
                (recommendations_view(&assessment.recommendations()))
            };
            html_page(StatusCode::OK, "Recommendations", auth.as_ref(), &body, None)
        }
        None => assessment_page(
            StatusCode::NOT_FOUND,
            auth.as_ref(),
            &FormFields::default(),
            &ValidationErrors::new(),
            None,
            Some(&Toast::info(NO_ASSESSMENT_MESSAGE)),
        ),
    }
}
