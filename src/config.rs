//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory served under `/static` (stylesheets, images)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            static_dir: default_static_dir(),
        }
    }
}

impl WebConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backend service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL for login, register, config and health
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Base URL of the prediction service, when it runs separately
    #[serde(default)]
    pub prediction_url: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            prediction_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl BackendConfig {
    /// Base URL used for `/predict`
    pub fn prediction_base(&self) -> &str {
        self.prediction_url.as_deref().unwrap_or(&self.url)
    }
}

/// Doctor directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./static/database.json")
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("gynai={},tower_http=debug", self.level).into()
        });

        let registry = tracing_subscriber::registry().with(filter);
        if self.format == "json" {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("gynai").join("config.toml")),
            Some(PathBuf::from("/etc/gynai/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `GYNAI_*` overrides from `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("GYNAI_HOST") {
            self.web.host = host;
        }
        if let Some(port) = lookup("GYNAI_PORT") {
            if let Ok(p) = port.parse() {
                self.web.port = p;
            }
        }

        if let Some(url) = lookup("GYNAI_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(url) = lookup("GYNAI_PREDICTION_URL") {
            self.backend.prediction_url = Some(url);
        }

        if let Some(path) = lookup("GYNAI_DATABASE_PATH") {
            self.directory.database_path = PathBuf::from(path);
        }

        if let Some(level) = lookup("GYNAI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GYNAI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# GynAI Configuration
#
# Environment variables override these settings:
# - GYNAI_HOST
# - GYNAI_PORT
# - GYNAI_BACKEND_URL
# - GYNAI_PREDICTION_URL
# - GYNAI_DATABASE_PATH
# - GYNAI_LOG_LEVEL
# - GYNAI_LOG_FORMAT

[web]
# Web server host
host = "127.0.0.1"

# Web server port
port = 8080

# Allowed CORS origins (empty allows any)
cors_origins = []

# Directory served under /static
static_dir = "./static"

[backend]
# Backend serving /login, /register, /api/config and /health
url = "http://127.0.0.1:5001"

# Prediction service base URL, if it is not the backend above
# prediction_url = "http://127.0.0.1:5000"

# Request timeout in milliseconds
timeout_ms = 10000

[directory]
# Doctor directory asset
database_path = "./static/database.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.web.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.backend.url, "http://127.0.0.1:5001");
        assert_eq!(config.backend.prediction_base(), "http://127.0.0.1:5001");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.backend.timeout_ms, 10_000);
        assert!(config.backend.prediction_url.is_none());
        assert_eq!(
            config.directory.database_path,
            PathBuf::from("./static/database.json")
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nprediction_url = \"http://127.0.0.1:5000\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.backend.prediction_base(), "http://127.0.0.1:5000");
        assert_eq!(config.backend.url, "http://127.0.0.1:5001");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[web]\nport = \"not a port\"").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("GYNAI_PORT", "9000"),
            ("GYNAI_PREDICTION_URL", "http://ml:5000"),
            ("GYNAI_DATABASE_PATH", "/srv/db.json"),
            ("GYNAI_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.backend.prediction_base(), "http://ml:5000");
        assert_eq!(config.directory.database_path, PathBuf::from("/srv/db.json"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_bad_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "GYNAI_PORT").then(|| "http".to_string()));
        assert_eq!(config.web.port, 8080);
    }
}
