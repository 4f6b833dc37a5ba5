//! GynAI Web Server
//!
//! Run with: cargo run --bin gynai-web
//!
//! # Configuration
//!
//! Read from `config.toml` (see `gynai-cli config`), then overridden by:
//! - `GYNAI_HOST`, `GYNAI_PORT`: Bind address (default: 127.0.0.1:8080)
//! - `GYNAI_BACKEND_URL`: Auth/config backend (default: http://127.0.0.1:5001)
//! - `GYNAI_PREDICTION_URL`: Prediction service, when separate from the backend
//! - `GYNAI_DATABASE_PATH`: Doctor directory (default: ./static/database.json)
//! - `GYNAI_LOG_LEVEL`, `GYNAI_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use gynai::client::BackendClient;
use gynai::config::Config;
use gynai::doctors::Directory;
use gynai::web::{serve, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting GynAI v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(&config.backend)?;
    tracing::info!("Backend: {}", backend.base_url());
    tracing::info!("Prediction service: {}", backend.prediction_url());

    let directory = Directory::load_or_empty(&config.directory.database_path);
    tracing::info!(
        "Doctor directory: {} doctors from {:?}",
        directory.doctors.len(),
        config.directory.database_path
    );

    let state = AppState::new(config, Arc::new(backend), directory);
    serve(state).await?;

    Ok(())
}
