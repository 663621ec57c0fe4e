//! Session lifecycle against the GLPI API

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::traits::GlpiApi;

/// Short-lived authenticated session.
///
/// Immutable once acquired and threaded by reference through subsequent
/// calls; invalid after [`SessionManager::release`]. Never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    established_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            established_at: Utc::now(),
        }
    }

    /// Opaque session token sent in the `Session-Token` header
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

/// Acquires and releases GLPI sessions.
///
/// At most one session is live per inventory run; the manager holds no
/// state across runs.
pub struct SessionManager {
    api: Arc<dyn GlpiApi>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn GlpiApi>) -> Self {
        Self { api }
    }

    /// Open a session.
    ///
    /// # Errors
    /// Returns an error if the `initSession` call fails or the response
    /// carries an empty token.
    pub async fn acquire(&self) -> Result<Session> {
        let response = self.api.init_session().await?;
        if response.session_token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "initSession returned an empty session token".to_string(),
            ));
        }
        debug!("session established");
        Ok(Session::new(response.session_token))
    }

    /// Best-effort release. Failures are logged and swallowed so that a
    /// release after an earlier failure cannot mask the original error.
    pub async fn release(&self, session: &Session) {
        if let Err(e) = self.api.kill_session(session).await {
            warn!(error = %e, "failed to release session");
        }
    }
}
