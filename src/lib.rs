//! # GynAI
//!
//! Server-rendered web front end for women's health tracking: a daily
//! symptom tracker, a doctor finder with map integration and a PCOS risk
//! assessment backed by an external inference service.
//!
//! ## Modules
//!
//! - [`tracker`]: Session-scoped symptom entries, history, CSV export/import
//! - [`validation`]: Form validators, BMI and waist-hip ratio
//! - [`doctors`]: Doctor directory, filters and distance sort
//! - [`prediction`]: Risk assessment request, result and recommendations
//! - [`client`]: Backend HTTP client with request supersession
//! - [`session`]: Sessions and the signed-in identity
//! - [`render`]: Escaped HTML views
//! - [`web`]: Axum routes and server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gynai::{BackendClient, Config, Directory};
//! use gynai::web::{serve, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     config.logging.init();
//!
//!     let backend = Arc::new(BackendClient::new(&config.backend)?);
//!     let directory = Directory::load_or_empty(&config.directory.database_path);
//!
//!     serve(AppState::new(config, backend, directory)).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod doctors;
pub mod form;
pub mod prediction;
pub mod render;
pub mod session;
pub mod tracker;
pub mod validation;
pub mod web;

// Re-export top-level types for convenience
pub use tracker::{
    export_csv, import_csv, CsvExport, ImportReport, TrackerError, TrackerResult, TrackerStore,
    TrackingEntry,
};

pub use client::{Backend, BackendClient, ClientError, ClientResult, RequestGuards, RequestKind};

pub use config::{Config, ConfigError, LoggingConfig};

pub use doctors::{Directory, DirectoryError, Doctor, DoctorFilter, GeoPoint};

pub use prediction::{Assessment, PredictionRequest, PredictionResult, RiskLevel};

pub use session::{AuthSession, Session, SessionStore};

pub use web::{build_router, serve, AppState, WebError};
