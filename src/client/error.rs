//! Backend client errors

use thiserror::Error;

/// Errors that can occur when calling the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    /// The backend answered but refused the operation, e.g. bad credentials
    #[error("{0}")]
    Rejected(String),

    /// A newer request of the same kind started while this one was in flight
    #[error("Request superseded by a newer one")]
    Superseded,
}

impl ClientError {
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }

    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected(msg) => msg.clone(),
            ClientError::Unavailable | ClientError::Timeout | ClientError::Request(_) => {
                "Something went wrong. Please check if the server is running and try again."
                    .to_string()
            }
            ClientError::Api { status, .. } => format!("Server error (status {})", status),
            ClientError::Superseded => "Request was replaced by a newer one".to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
