//! HTTP client for the GLPI REST API

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use glpi_api::{InitSessionResponse, SearchResponse};

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::traits::GlpiApi;

const APP_TOKEN_HEADER: &str = "App-Token";
const SESSION_TOKEN_HEADER: &str = "Session-Token";

/// HTTP client for a GLPI REST endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpClient {
    /// Create a new client.
    ///
    /// A trailing slash on the base URL is stripped so joined paths never
    /// produce double slashes.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>, credentials: Credentials) -> Result<Self> {
        Self::with_client(base_url, credentials, Client::new())
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(
        base_url: impl AsRef<str>,
        credentials: Credentials,
        client: Client,
    ) -> Result<Self> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path)).map_err(ClientError::Url)
    }

    /// Headers for the initial authentication call
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            APP_TOKEN_HEADER,
            HeaderValue::from_str(&self.credentials.app_token)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("user_token {}", self.credentials.user_token))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Headers for calls made within an established session
    fn session_headers(&self, session: &Session) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            APP_TOKEN_HEADER,
            HeaderValue::from_str(&self.credentials.app_token)?,
        );
        headers.insert(SESSION_TOKEN_HEADER, HeaderValue::from_str(session.token())?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, url: Url, headers: HeaderMap) -> Result<T> {
        let response = self.client.get(url).headers(headers).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GlpiApi for HttpClient {
    async fn init_session(&self) -> Result<InitSessionResponse> {
        let url = self.url("initSession")?;
        debug!(%url, "initializing session");
        self.get(url, self.auth_headers()?).await
    }

    async fn list_search_options(
        &self,
        asset_type: &str,
        session: &Session,
    ) -> Result<HashMap<String, Value>> {
        let url = self.url(&format!("listSearchOptions/{asset_type}"))?;
        debug!(%url, "fetching field catalog");
        self.get(url, self.session_headers(session)?).await
    }

    async fn search(
        &self,
        asset_type: &str,
        session: &Session,
        forcedisplay: &[&str],
        range: &str,
    ) -> Result<SearchResponse> {
        let mut url = self.url(&format!("search/{asset_type}"))?;

        {
            let mut query = url.query_pairs_mut();
            for (i, field_id) in forcedisplay.iter().enumerate() {
                query.append_pair(&format!("forcedisplay[{i}]"), field_id);
            }
            query.append_pair("range", range);
        }

        debug!(%url, "searching assets");
        self.get(url, self.session_headers(session)?).await
    }

    async fn kill_session(&self, session: &Session) -> Result<()> {
        let url = self.url("killSession")?;
        debug!(%url, "releasing session");

        let response = self
            .client
            .get(url)
            .headers(self.session_headers(session)?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("app-tok", "user-tok").unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("http://glpi.example/apirest.php", credentials());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new("not a url", credentials());
        assert!(client.is_err());
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = HttpClient::new("http://glpi.example/apirest.php/", credentials()).unwrap();
        let url = client.url("initSession").unwrap();
        assert_eq!(url.as_str(), "http://glpi.example/apirest.php/initSession");
    }

    #[test]
    fn test_search_url_building() {
        let client = HttpClient::new("http://glpi.example/apirest.php", credentials()).unwrap();
        let mut url = client.url("search/Computer").unwrap();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("forcedisplay[0]", "1");
            query.append_pair("forcedisplay[1]", "31");
            query.append_pair("forcedisplay[2]", "45");
            query.append_pair("range", "0-1000");
        }

        let built = url.as_str();
        assert!(built.contains("forcedisplay%5B0%5D=1"));
        assert!(built.contains("forcedisplay%5B1%5D=31"));
        assert!(built.contains("forcedisplay%5B2%5D=45"));
        assert!(built.contains("range=0-1000"));
    }

    #[test]
    fn test_auth_headers() {
        let client = HttpClient::new("http://glpi.example/apirest.php", credentials()).unwrap();
        let headers = client.auth_headers().unwrap();
        assert_eq!(headers.get(APP_TOKEN_HEADER).unwrap(), "app-tok");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "user_token user-tok");
    }

    #[test]
    fn test_session_headers() {
        let client = HttpClient::new("http://glpi.example/apirest.php", credentials()).unwrap();
        let session = Session::new("sess-tok");
        let headers = client.session_headers(&session).unwrap();
        assert_eq!(headers.get(SESSION_TOKEN_HEADER).unwrap(), "sess-tok");
        assert_eq!(headers.get(APP_TOKEN_HEADER).unwrap(), "app-tok");
    }
}
