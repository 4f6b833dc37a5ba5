//! GynAI web front end
//!
//! Server-rendered HTML layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Home
//! - `GET|POST /login`, `GET|POST /register`, `POST /logout` - Authentication
//! - `GET /dashboard` - Calendar, weekly chart and metric cards
//! - `GET|POST /tracker` - Daily symptom tracker
//! - `GET /tracker/export` - CSV download of the session's entries
//! - `GET /doctors` - Doctor finder
//! - `GET /doctors/:id/location` - Clinic location and directions
//! - `GET|POST /predict` - PCOS risk assessment
//! - `GET /predict/recommendations` - Recommendations for the last assessment
//!
//! ## Data
//! - `GET /database.json` - The doctor directory
//! - `GET /static/*` - Stylesheets and images
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check (backend reachable)
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use gynai::client::BackendClient;
//! use gynai::config::Config;
//! use gynai::doctors::Directory;
//! use gynai::web::{serve, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(BackendClient::new(&config.backend)?);
//!     let directory = Directory::load_or_empty(&config.directory.database_path);
//!
//!     serve(AppState::new(config, backend, directory)).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::home::home))
        // Authentication
        .route("/login", get(routes::auth::login_page).post(routes::auth::login))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route("/logout", post(routes::auth::logout))
        // Dashboard
        .route("/dashboard", get(routes::dashboard::dashboard))
        // Symptom tracker
        .route(
            "/tracker",
            get(routes::tracker::tracker_page).post(routes::tracker::save_entry),
        )
        .route("/tracker/export", get(routes::tracker::export))
        // Doctor finder
        .route("/doctors", get(routes::doctors::doctors_page))
        .route("/doctors/:id/location", get(routes::doctors::location))
        .route("/database.json", get(routes::doctors::database))
        // Risk assessment
        .route(
            "/predict",
            get(routes::prediction::prediction_page).post(routes::prediction::predict),
        )
        .route(
            "/predict/recommendations",
            get(routes::prediction::recommendations),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.web.cors_origins);
    let static_files = ServeDir::new(&state.config.web.static_dir);
    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/health", health_routes)
        .nest_service("/static", static_files)
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
}

/// Start the web server
pub async fn serve(state: AppState) -> Result<(), WebError> {
    let addr = state.config.web.bind_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("GynAI listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("GynAI shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Router fixtures shared by the route tests

    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::client::mock::MockBackend;
    use crate::config::Config;
    use crate::doctors::fixtures;

    pub fn app_with(backend: MockBackend) -> Router {
        let state = AppState::new(
            Config::default(),
            Arc::new(backend),
            fixtures::directory(),
        );
        build_router(state)
    }

    pub fn app() -> Router {
        app_with(MockBackend::default())
    }

    pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(
        app: &Router,
        uri: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// `name=value` of the session cookie set by `response`
    pub fn response_session_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(crate::session::SESSION_COOKIE))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn redirect_location(response: &Response<Body>) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(response: &Response<Body>, status: StatusCode) {
        assert_eq!(response.status(), status, "unexpected status for response");
    }
}
