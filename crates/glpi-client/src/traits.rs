//! GLPI API trait seam

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use glpi_api::{InitSessionResponse, SearchResponse};

use crate::error::Result;
use crate::session::Session;

/// Surface of the GLPI REST API used by an inventory run.
///
/// Implemented by [`HttpClient`](crate::HttpClient) against a live instance
/// and by fakes in tests.
#[async_trait]
pub trait GlpiApi: Send + Sync {
    /// `GET /initSession` using the client's credentials
    async fn init_session(&self) -> Result<InitSessionResponse>;

    /// `GET /listSearchOptions/<asset_type>`: the field catalog keyed by
    /// field id. Returned as raw JSON because GLPI mixes scalar metadata
    /// keys into the same mapping.
    async fn list_search_options(
        &self,
        asset_type: &str,
        session: &Session,
    ) -> Result<HashMap<String, Value>>;

    /// `GET /search/<asset_type>` projecting exactly the given field ids,
    /// bounded by `range` (`"0-<limit>"`)
    async fn search(
        &self,
        asset_type: &str,
        session: &Session,
        forcedisplay: &[&str],
        range: &str,
    ) -> Result<SearchResponse>;

    /// `GET /killSession`, invalidating the token
    async fn kill_session(&self, session: &Session) -> Result<()>;
}
