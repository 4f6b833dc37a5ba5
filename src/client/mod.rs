//! Backend API Client
//!
//! HTTP client for the GynAI backend: authentication, the maps config
//! endpoint and the PCOS inference service. Login and registration are
//! posted as urlencoded forms; predictions as JSON.
//!
//! Handlers talk to the backend through the [`Backend`] trait so tests can
//! swap in an in-process fake.

pub mod error;
pub mod supersede;

pub use error::{ClientError, ClientResult};
pub use supersede::{RequestGuards, RequestKind, RequestToken};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::BackendConfig;
use crate::prediction::{PredictionRequest, PredictionResult};
use crate::validation::Registration;

/// Account details returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
}

/// Client-side configuration served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(rename = "googleMapsApiKey")]
    pub google_maps_api_key: String,
}

/// Operations the web front end needs from the backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Authenticate with an email address or username
    async fn login(&self, identifier: &str, password: &str) -> ClientResult<UserInfo>;

    async fn register(&self, registration: &Registration) -> ClientResult<()>;

    async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult>;

    async fn maps_config(&self) -> ClientResult<MapsConfig>;

    async fn health(&self) -> ClientResult<()>;
}

/// reqwest-backed [`Backend`]
pub struct BackendClient {
    client: Client,
    base_url: String,
    prediction_url: String,
}

impl BackendClient {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            prediction_url: config.prediction_base().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prediction_url(&self) -> &str {
        &self.prediction_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn form_request(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).form(fields)
    }

    /// POST a urlencoded form and decode the `{success, ...}` envelope
    ///
    /// The backend reports refusals in the body, sometimes with a 4xx status,
    /// so the body is decoded before the status is considered.
    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> ClientResult<AuthResponse> {
        let response = self
            .form_request(path, fields)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        let text = response.text().await.map_err(ClientError::from_send)?;

        match serde_json::from_str::<AuthResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            }),
            Err(e) => Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("Malformed response: {}", e),
            }),
        }
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn login(&self, identifier: &str, password: &str) -> ClientResult<UserInfo> {
        let response = self
            .post_form("/login", &[("email", identifier), ("password", password)])
            .await?;

        match (response.success, response.user) {
            (true, Some(user)) => {
                tracing::info!(username = %user.username, "Login succeeded");
                Ok(user)
            }
            (true, None) => Err(ClientError::Api {
                status: 200,
                message: "Login response missing user".to_string(),
            }),
            (false, _) => Err(ClientError::Rejected(
                response.error.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    async fn register(&self, registration: &Registration) -> ClientResult<()> {
        let response = self
            .post_form(
                "/register",
                &[
                    ("username", registration.username.as_str()),
                    ("email", registration.email.as_str()),
                    ("password", registration.password.as_str()),
                ],
            )
            .await?;

        if response.success {
            tracing::info!(username = %registration.username, "Account created");
            Ok(())
        } else {
            Err(ClientError::Rejected(
                response.error.unwrap_or_else(|| "Registration failed".to_string()),
            ))
        }
    }

    async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult> {
        let url = format!("{}/predict", self.prediction_url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let result: PredictionResult = response.json().await?;
            tracing::info!(
                prediction = result.prediction,
                confidence = result.confidence,
                "Prediction received"
            );
            Ok(result)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Prediction service error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn maps_config(&self) -> ClientResult<MapsConfig> {
        let response = self
            .client
            .get(self.url("/api/config"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn health(&self) -> ClientResult<()> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Unavailable)
        }
    }
}

/// `{success, user?, error?}` envelope used by `/login` and `/register`
#[derive(Debug, Deserialize)]
struct AuthResponse {
    success: bool,
    #[serde(default)]
    user: Option<UserInfo>,
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-process backend for handler tests

    use super::*;
    use std::sync::Mutex;

    pub struct MockBackend {
        pub user: Option<UserInfo>,
        pub prediction: Option<PredictionResult>,
        pub maps_key: Option<String>,
        pub healthy: bool,
        pub predict_requests: Mutex<Vec<PredictionRequest>>,
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self {
                user: Some(UserInfo {
                    username: "alice".to_string(),
                    email: "alice@example.com".to_string(),
                }),
                prediction: Some(PredictionResult {
                    prediction: 1,
                    confidence: 0.82,
                }),
                maps_key: Some("test-key".to_string()),
                healthy: true,
                predict_requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl MockBackend {
        /// A backend that refuses every connection
        pub fn offline() -> Self {
            Self {
                user: None,
                prediction: None,
                maps_key: None,
                healthy: false,
                predict_requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn login(&self, _identifier: &str, password: &str) -> ClientResult<UserInfo> {
            match &self.user {
                None => Err(ClientError::Unavailable),
                Some(_) if password != "secret1" => {
                    Err(ClientError::Rejected("Invalid credentials".to_string()))
                }
                Some(user) => Ok(user.clone()),
            }
        }

        async fn register(&self, registration: &Registration) -> ClientResult<()> {
            match &self.user {
                None => Err(ClientError::Unavailable),
                Some(user) if user.email == registration.email => {
                    Err(ClientError::Rejected("Email already registered".to_string()))
                }
                Some(_) => Ok(()),
            }
        }

        async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult> {
            if let Ok(mut seen) = self.predict_requests.lock() {
                seen.push(request.clone());
            }
            self.prediction.ok_or(ClientError::Unavailable)
        }

        async fn maps_config(&self) -> ClientResult<MapsConfig> {
            self.maps_key
                .clone()
                .map(|key| MapsConfig {
                    google_maps_api_key: key,
                })
                .ok_or(ClientError::Unavailable)
        }

        async fn health(&self) -> ClientResult<()> {
            if self.healthy {
                Ok(())
            } else {
                Err(ClientError::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let config = BackendConfig {
            url: "http://127.0.0.1:5001/".to_string(),
            prediction_url: Some("http://127.0.0.1:5000".to_string()),
            timeout_ms: 1000,
        };
        let client = BackendClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://127.0.0.1:5001");
        assert_eq!(client.url("/login"), "http://127.0.0.1:5001/login");
        assert_eq!(client.prediction_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_login_form_body() {
        let client = BackendClient::new(&BackendConfig::default()).unwrap();
        let request = client
            .form_request("/login", &[("email", "a+b@example.com"), ("password", "p&ss word")])
            .build()
            .unwrap();

        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&b"email=a%2Bb%40example.com&password=p%26ss+word"[..])
        );
    }

    #[test]
    fn test_auth_response_shapes() {
        let ok: AuthResponse = serde_json::from_str(
            r#"{"success":true,"user":{"username":"alice","email":"alice@example.com"}}"#,
        )
        .unwrap();
        assert!(ok.success);
        assert_eq!(ok.user.unwrap().username, "alice");

        let err: AuthResponse =
            serde_json::from_str(r#"{"success":false,"error":"Invalid credentials"}"#).unwrap();
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_maps_config_shape() {
        let config: MapsConfig = serde_json::from_str(r#"{"googleMapsApiKey":"abc"}"#).unwrap();
        assert_eq!(config.google_maps_api_key, "abc");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Port 9 (discard) is closed on test hosts; connection is refused
        let config = BackendConfig {
            url: "http://127.0.0.1:9".to_string(),
            prediction_url: None,
            timeout_ms: 2000,
        };
        let client = BackendClient::new(&config).unwrap();

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Unavailable | ClientError::Timeout));
    }
}
