//! Doctor Finder Routes
//!
//! - GET /doctors?search=&specialty=&availability=&lat=&lng= - Filtered listing
//! - GET /doctors/:id/location?lat=&lng= - Clinic location with directions
//! - GET /database.json - The raw directory
//!
//! The maps API key comes from the backend's `/api/config`. When it cannot be
//! fetched the pages render without the map and show a toast.

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::html_page;
use crate::client::{ClientResult, MapsConfig, RequestKind};
use crate::doctors::{AvailabilityFilter, DoctorFilter, GeoPoint};
use crate::form::FormFields;
use crate::render::doctors::{location_view, DoctorsPage};
use crate::render::Toast;
use crate::session::AuthSession;
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;

pub const MAP_UNAVAILABLE_MESSAGE: &str = "Map could not be loaded";
pub const LOCATION_MESSAGE: &str = "Location detected successfully!";

/// Filter from the listing's query parameters
pub fn filter_from_query(query: &FormFields) -> DoctorFilter {
    let mut filter = DoctorFilter::new()
        .search(query.raw("search"))
        .specialty(query.raw("specialty"))
        .availability(AvailabilityFilter::from_label(query.raw("availability")));

    if let Some(point) = GeoPoint::from_parts(query.get("lat"), query.get("lng")) {
        filter = filter.near(point);
    }
    filter
}

/// Fetch the maps config under the session's `Config` slot when there is one
async fn maps_key(state: &AppState, headers: &HeaderMap) -> ClientResult<String> {
    let result: ClientResult<MapsConfig> = match state.sessions.from_headers(headers).await {
        Some(session) => {
            session
                .guards()
                .run(RequestKind::Config, state.backend.maps_config())
                .await
        }
        None => state.backend.maps_config().await,
    };
    result.map(|c| c.google_maps_api_key)
}

fn map_toast(key: &ClientResult<String>) -> Option<Toast> {
    match key {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Maps config unavailable");
            Some(Toast::error(MAP_UNAVAILABLE_MESSAGE))
        }
    }
}

async fn session_auth(state: &AppState, headers: &HeaderMap) -> Option<AuthSession> {
    match state.sessions.from_headers(headers).await {
        Some(session) => session.auth().await,
        None => None,
    }
}

/// GET /doctors
pub async fn doctors_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let query = FormFields::parse(query.as_deref().unwrap_or(""));
    let filter = filter_from_query(&query);
    let key = maps_key(&state, &headers).await;
    let auth = session_auth(&state, &headers).await;

    let directory = &state.directory;
    let matches = directory.search(&filter);
    tracing::debug!(results = matches.len(), active = filter.is_active(), "Doctor search");

    let toast = map_toast(&key).or_else(|| filter.near.map(|_| Toast::success(LOCATION_MESSAGE)));
    let page = DoctorsPage {
        filter: &filter,
        matches: &matches,
        specialties: &directory.specialties,
        availability_options: &directory.availability_options,
        maps_key: key.as_deref().ok(),
    };

    html_page(StatusCode::OK, "Find Doctors", auth.as_ref(), &page.render(), toast.as_ref())
}

/// GET /doctors/:id/location
pub async fn location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> WebResult<Response> {
    let doctor = state
        .directory
        .find(id)
        .ok_or_else(|| WebError::NotFound(format!("Doctor {}", id)))?;

    let query = FormFields::parse(query.as_deref().unwrap_or(""));
    let origin = GeoPoint::from_parts(query.get("lat"), query.get("lng"));
    let key = maps_key(&state, &headers).await;
    let auth = session_auth(&state, &headers).await;

    let body = location_view(doctor, origin, key.as_deref().ok());
    Ok(html_page(
        StatusCode::OK,
        &format!("Dr. {}", doctor.name),
        auth.as_ref(),
        &body,
        map_toast(&key).as_ref(),
    ))
}

/// GET /database.json
pub async fn database(State(state): State<Arc<AppState>>) -> Response {
    Json(state.directory.as_ref()).into_response()
}
