//! Orchestrated inventory run
//!
//! One run is a strict sequence: acquire a session, resolve field roles,
//! fetch records, project each record into the sink, release the session.
//! Release happens on every exit path; a per-record projection failure is a
//! skip, never a run-level abort.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use glpi_api::RawRecord;
use glpi_client::{GlpiApi, Session, SessionManager};

use crate::error::{InventoryError, Result};
use crate::project::{HostGroup, project_record};
use crate::schema::{FieldRoleMap, NAME_FIELD_ID, SchemaResolver};
use crate::sink::InventorySink;

/// Host variable carrying the connection address
pub const ADDRESS_VAR: &str = "ansible_host";

/// Default upper bound on records fetched in one run; records beyond it
/// are absent, not an error
pub const DEFAULT_LIMIT: u64 = 1000;

/// Default asset type queried
pub const DEFAULT_ASSET_TYPE: &str = "Computer";

/// Runs one inventory pass against a GLPI instance
pub struct InventoryRunner {
    api: Arc<dyn GlpiApi>,
    asset_type: String,
    limit: u64,
}

impl InventoryRunner {
    pub fn new(api: Arc<dyn GlpiApi>) -> Self {
        Self {
            api,
            asset_type: DEFAULT_ASSET_TYPE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn with_asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = asset_type.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Run one inventory pass into `sink`.
    ///
    /// The session is released exactly once on every exit path, and a
    /// release failure never masks the error that caused the abort.
    ///
    /// # Errors
    /// Fails when the session cannot be established, the field catalog
    /// cannot be fetched, or the search request fails. Records without a
    /// hostname are skipped, never fatal.
    #[instrument(skip(self, sink), fields(asset_type = %self.asset_type, limit = self.limit))]
    pub async fn run(&self, sink: &mut dyn InventorySink) -> Result<()> {
        let manager = SessionManager::new(Arc::clone(&self.api));
        let session = manager.acquire().await.map_err(InventoryError::Auth)?;

        let result = self.run_with_session(&session, sink).await;
        manager.release(&session).await;
        result
    }

    async fn run_with_session(
        &self,
        session: &Session,
        sink: &mut dyn InventorySink,
    ) -> Result<()> {
        let resolver = SchemaResolver::new(Arc::clone(&self.api), self.asset_type.clone());
        let roles = resolver.resolve(session).await?;

        let records = self.fetch_records(session, &roles).await?;

        // Groups exist even when no host lands in them.
        for group in HostGroup::ALL {
            sink.add_group(group);
        }

        let mut projected = 0usize;
        let mut skipped = 0usize;
        for record in &records {
            let Some(entry) = project_record(record, &roles) else {
                skipped += 1;
                debug!("skipping record without hostname");
                continue;
            };

            sink.add_host(&entry.hostname);
            if let Some(address) = &entry.address {
                sink.set_variable(&entry.hostname, ADDRESS_VAR, address);
            }
            sink.add_host_to_group(entry.group, &entry.hostname);
            projected += 1;
        }

        info!(hosts = projected, skipped, "inventory run completed");
        Ok(())
    }

    async fn fetch_records(
        &self,
        session: &Session,
        roles: &FieldRoleMap,
    ) -> Result<Vec<RawRecord>> {
        let forcedisplay = [
            NAME_FIELD_ID,
            roles.ip_field_id.as_str(),
            roles.os_field_id.as_str(),
        ];
        let range = format!("0-{}", self.limit);

        let response = self
            .api
            .search(&self.asset_type, session, &forcedisplay, &range)
            .await
            .map_err(InventoryError::Fetch)?;

        debug!(
            total = response.totalcount,
            returned = response.data.len(),
            "fetched records"
        );
        Ok(response.data)
    }
}
