//! Sessions
//!
//! A [`Session`] owns everything a browser session accumulates: the signed-in
//! identity, the symptom tracker entries, the last risk assessment and the
//! request supersession slots. Sessions live in the [`SessionStore`], keyed by
//! the `gynai_session` cookie.
//!
//! Lifecycle: created at login or registration, or as a guest on the first
//! tracker visit; destroyed at logout. Nothing outlives the process.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::RequestGuards;
use crate::form::FormFields;
use crate::prediction::Assessment;
use crate::render::query_string;
use crate::tracker::TrackerStore;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "gynai_session";

/// Display name used when nobody is signed in
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub username: String,
    pub email: String,
}

impl AuthSession {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Identity from the legacy `?name=&email=` navigation parameters
    pub fn from_query(query: &FormFields) -> Option<Self> {
        let name = query.get("name")?;
        Some(Self::new(name, query.get("email").unwrap_or_default()))
    }

    /// `?name=..&email=..` for links that carry identity
    pub fn to_query(&self) -> String {
        query_string(&[("name", self.username.as_str()), ("email", self.email.as_str())])
    }
}

/// Name shown in greetings
pub fn display_name(auth: Option<&AuthSession>) -> &str {
    auth.map(|a| a.username.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_DISPLAY_NAME)
}

/// Upper-cased first letter of the display name, for the avatar
pub fn initial(auth: Option<&AuthSession>) -> String {
    display_name(auth)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Per-browser state
#[derive(Debug)]
pub struct Session {
    id: String,
    auth: RwLock<Option<AuthSession>>,
    tracker: RwLock<TrackerStore>,
    last_assessment: RwLock<Option<Assessment>>,
    guards: RequestGuards,
    created_at: DateTime<Utc>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id,
            auth: RwLock::new(None),
            tracker: RwLock::new(TrackerStore::new()),
            last_assessment: RwLock::new(None),
            guards: RequestGuards::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn auth(&self) -> Option<AuthSession> {
        self.auth.read().await.clone()
    }

    pub async fn sign_in(&self, auth: AuthSession) {
        tracing::info!(session = %self.id, username = %auth.username, "Session signed in");
        *self.auth.write().await = Some(auth);
    }

    pub fn tracker(&self) -> &RwLock<TrackerStore> {
        &self.tracker
    }

    pub fn guards(&self) -> &RequestGuards {
        &self.guards
    }

    pub async fn last_assessment(&self) -> Option<Assessment> {
        self.last_assessment.read().await.clone()
    }

    pub async fn set_assessment(&self, assessment: Assessment) {
        *self.last_assessment.write().await = Some(assessment);
    }
}

/// Registry of live sessions
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new anonymous session
    pub async fn create(&self) -> Arc<Session> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let session = Arc::new(Session::new(id.clone()));
        self.sessions.write().await.insert(id, Arc::clone(&session));
        tracing::debug!(session = %session.id, "Session created");
        session
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Session named by the request's cookie, if it is still live
    pub async fn from_headers(&self, headers: &HeaderMap) -> Option<Arc<Session>> {
        let id = cookie_value(headers, SESSION_COOKIE)?;
        self.get(id).await
    }

    /// Session for the request, creating one when absent
    ///
    /// The flag is `true` when the session is new and its cookie must be set.
    pub async fn get_or_create(&self, headers: &HeaderMap) -> (Arc<Session>, bool) {
        match self.from_headers(headers).await {
            Some(session) => (session, false),
            None => (self.create().await, true),
        }
    }

    /// Tear a session down, dropping everything it held
    pub async fn remove(&self, id: &str) -> Option<Arc<Session>> {
        let removed = self.sessions.write().await.remove(id);
        if removed.is_some() {
            tracing::info!(session = %id, "Session ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Value of cookie `name` from the request headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}
