//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes liveness and readiness checks.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (backend reachable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::web::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub doctors: usize,
    pub sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
///
/// Kubernetes liveness check.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness check.
/// Returns 200 once the backend answers its health check.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.backend.health().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Backend not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Full health status with component details. The front end keeps serving
/// the tracker and doctor finder without the backend, so a backend outage
/// reports `degraded` rather than `unhealthy`.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend_ok = state.backend.health().await.is_ok();
    let doctors = state.directory.doctors.len();

    let status = match (backend_ok, doctors > 0) {
        (true, true) => "healthy",
        _ => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        backend: if backend_ok { "ok" } else { "error" }.to_string(),
        doctors,
        sessions: state.sessions.len().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockBackend;
    use crate::web::test_support::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_follows_backend() {
        let app = app();
        assert_status(&get(&app, "/health/ready", None).await, StatusCode::OK);

        let app = app_with(MockBackend::offline());
        assert_status(
            &get(&app, "/health/ready", None).await,
            StatusCode::SERVICE_UNAVAILABLE,
        );
    }

    #[tokio::test]
    async fn test_full_health() {
        let app = app_with(MockBackend::offline());
        let response = get(&app, "/health", None).await;
        assert_status(&response, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["backend"], "error");
        assert_eq!(json["doctors"], 3);
    }
}
