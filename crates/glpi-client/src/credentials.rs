//! API credentials for GLPI access
//!
//! GLPI wants two tokens on every run: an application-level token and a
//! user-level token. They come from the process environment, never from the
//! config file, and are injected explicitly so tests can supply fakes.

use crate::error::{ClientError, Result};

/// Environment variable holding the application-level token
pub const APP_TOKEN_VAR: &str = "GLPI_APP_TOKEN";
/// Environment variable holding the user-level token
pub const USER_TOKEN_VAR: &str = "GLPI_USER_TOKEN";

/// Token pair required to open a GLPI session
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_token: String,
    pub user_token: String,
}

impl Credentials {
    /// Create credentials from explicit token values.
    ///
    /// # Errors
    /// Returns `MissingCredentials` if either token is empty.
    pub fn new(app_token: impl Into<String>, user_token: impl Into<String>) -> Result<Self> {
        let app_token = app_token.into();
        let user_token = user_token.into();
        if app_token.is_empty() {
            return Err(ClientError::MissingCredentials(APP_TOKEN_VAR));
        }
        if user_token.is_empty() {
            return Err(ClientError::MissingCredentials(USER_TOKEN_VAR));
        }
        Ok(Self {
            app_token,
            user_token,
        })
    }

    /// Read credentials from `GLPI_APP_TOKEN` / `GLPI_USER_TOKEN`.
    ///
    /// # Errors
    /// Returns `MissingCredentials` naming the first variable that is unset
    /// or empty.
    pub fn from_env() -> Result<Self> {
        let app_token = std::env::var(APP_TOKEN_VAR).unwrap_or_default();
        let user_token = std::env::var(USER_TOKEN_VAR).unwrap_or_default();
        Self::new(app_token, user_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = Credentials::new("app", "user").unwrap();
        assert_eq!(creds.app_token, "app");
        assert_eq!(creds.user_token, "user");
    }

    #[test]
    fn test_empty_app_token_rejected() {
        let err = Credentials::new("", "user").unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingCredentials(APP_TOKEN_VAR)
        ));
    }

    #[test]
    fn test_empty_user_token_rejected() {
        let err = Credentials::new("app", "").unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingCredentials(USER_TOKEN_VAR)
        ));
    }
}
