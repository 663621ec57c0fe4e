//! Field-role resolution against the GLPI search-option catalog
//!
//! GLPI identifies queryable fields by unstable numeric ids described only
//! by free-text, localized labels. The resolver scans every label for
//! IP-address-ish and operating-system-ish terms and maps both roles to
//! concrete field ids, falling back to well-known defaults when nothing
//! matches. A wrong-but-present field beats aborting the whole run, so
//! resolution degrades instead of failing.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use glpi_api::SearchOption;
use glpi_client::{GlpiApi, Session};

use crate::error::{InventoryError, Result};

/// Field id GLPI uses for the asset name, stable across deployments
pub const NAME_FIELD_ID: &str = "1";
/// Fallback when no catalog label looks like an IP address field
pub const DEFAULT_IP_FIELD_ID: &str = "31";
/// Fallback when no catalog label looks like an OS name field
pub const DEFAULT_OS_FIELD_ID: &str = "45";

/// IP-address label terms, most specific first
const IP_TERMS: [&str; 4] = [
    "public contact address",
    "contact address",
    "ip address",
    "dirección ip",
];

/// Operating-system label terms, most specific first
const OS_TERMS: [&str; 5] = [
    "sistema operativo - nombre",
    "operating system - name",
    "sistema operativo",
    "operating system",
    "système d'exploitation",
];

/// Resolved field ids for the semantic roles an inventory run needs.
///
/// Always populated; roles with no matching catalog entry use the default
/// ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRoleMap {
    pub ip_field_id: String,
    pub os_field_id: String,
}

impl Default for FieldRoleMap {
    fn default() -> Self {
        Self {
            ip_field_id: DEFAULT_IP_FIELD_ID.to_string(),
            os_field_id: DEFAULT_OS_FIELD_ID.to_string(),
        }
    }
}

/// Map semantic roles to field ids from a fetched catalog.
///
/// The catalog mapping carries no guaranteed iteration order, so entries
/// are sorted by field id before scanning; the first label matching a term
/// list wins for its role. The one exception is an IP label that also
/// contains `"public"`: such an entry wins unconditionally, wherever it
/// sits in the catalog.
#[must_use]
pub fn resolve_roles(catalog: &HashMap<String, Value>) -> FieldRoleMap {
    let mut entries: Vec<(&str, String)> = catalog
        .iter()
        .filter_map(|(id, value)| {
            // GLPI mixes scalar metadata keys into the catalog; only
            // objects with a name are field entries.
            let option: SearchOption = serde_json::from_value(value.clone()).ok()?;
            Some((id.as_str(), option.name.to_lowercase()))
        })
        .collect();
    entries.sort_by(|(a, _), (b, _)| compare_field_ids(a, b));

    let mut ip_field: Option<&str> = None;
    let mut ip_is_public = false;
    let mut os_field: Option<&str> = None;

    for &(id, ref label) in &entries {
        if !ip_is_public && IP_TERMS.iter().any(|term| label.contains(term)) {
            if label.contains("public") {
                ip_field = Some(id);
                ip_is_public = true;
            } else if ip_field.is_none() {
                ip_field = Some(id);
            }
        }
        if os_field.is_none() && OS_TERMS.iter().any(|term| label.contains(term)) {
            os_field = Some(id);
        }
    }

    FieldRoleMap {
        ip_field_id: ip_field.unwrap_or(DEFAULT_IP_FIELD_ID).to_string(),
        os_field_id: os_field.unwrap_or(DEFAULT_OS_FIELD_ID).to_string(),
    }
}

/// Numeric ids in numeric order, anything else after them lexically
fn compare_field_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Resolves field roles for one asset type using the remote catalog
pub struct SchemaResolver {
    api: Arc<dyn GlpiApi>,
    asset_type: String,
}

impl SchemaResolver {
    pub fn new(api: Arc<dyn GlpiApi>, asset_type: impl Into<String>) -> Self {
        Self {
            api,
            asset_type: asset_type.into(),
        }
    }

    /// Fetch the field catalog and resolve both roles.
    ///
    /// # Errors
    /// Returns an error only when the catalog fetch itself fails; an
    /// unrecognized catalog degrades to the default field ids.
    #[instrument(skip(self, session), fields(asset_type = %self.asset_type))]
    pub async fn resolve(&self, session: &Session) -> Result<FieldRoleMap> {
        let catalog = self
            .api
            .list_search_options(&self.asset_type, session)
            .await
            .map_err(InventoryError::Schema)?;

        let roles = resolve_roles(&catalog);
        debug!(
            ip_field = %roles.ip_field_id,
            os_field = %roles.os_field_id,
            entries = catalog.len(),
            "resolved field roles"
        );
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(entries: &[(&str, &str)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(id, name)| ((*id).to_string(), json!({ "name": name })))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_matches() {
        let roles = resolve_roles(&catalog(&[("3", "Location"), ("19", "Last update")]));
        assert_eq!(roles.ip_field_id, DEFAULT_IP_FIELD_ID);
        assert_eq!(roles.os_field_id, DEFAULT_OS_FIELD_ID);
    }

    #[test]
    fn test_empty_catalog_uses_defaults() {
        assert_eq!(resolve_roles(&HashMap::new()), FieldRoleMap::default());
    }

    #[test]
    fn test_public_entry_wins_over_plain_ip_entry() {
        // The plain entry sorts first; "public" must still win.
        let roles = resolve_roles(&catalog(&[
            ("31", "IP Address"),
            ("126", "Public Contact Address (Computers)"),
        ]));
        assert_eq!(roles.ip_field_id, "126");
    }

    #[test]
    fn test_public_entry_wins_regardless_of_insertion_order() {
        let forward = resolve_roles(&catalog(&[
            ("126", "Public Contact Address"),
            ("31", "IP Address"),
        ]));
        let reversed = resolve_roles(&catalog(&[
            ("31", "IP Address"),
            ("126", "Public Contact Address"),
        ]));
        assert_eq!(forward.ip_field_id, "126");
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_first_ip_candidate_kept_without_public_override() {
        let roles = resolve_roles(&catalog(&[
            ("31", "IP Address"),
            ("127", "Contact Address"),
        ]));
        assert_eq!(roles.ip_field_id, "31");
    }

    #[test]
    fn test_localized_labels_match() {
        let roles = resolve_roles(&catalog(&[
            ("88", "Dirección IP"),
            ("45", "Sistema Operativo - Nombre"),
        ]));
        assert_eq!(roles.ip_field_id, "88");
        assert_eq!(roles.os_field_id, "45");
    }

    #[test]
    fn test_os_has_no_public_override() {
        let roles = resolve_roles(&catalog(&[
            ("45", "Operating System"),
            ("90", "Public Operating System"),
        ]));
        assert_eq!(roles.os_field_id, "45");
    }

    #[test]
    fn test_scalar_catalog_entries_skipped() {
        let mut cat = catalog(&[("45", "Operating System")]);
        cat.insert("itemtype".to_string(), json!("Computer"));
        cat.insert("count".to_string(), json!(250));
        let roles = resolve_roles(&cat);
        assert_eq!(roles.os_field_id, "45");
        assert_eq!(roles.ip_field_id, DEFAULT_IP_FIELD_ID);
    }

    #[test]
    fn test_numeric_ids_scan_in_numeric_order() {
        // "9" sorts after "100" lexically; numeric ordering keeps the scan
        // stable on real catalogs.
        let roles = resolve_roles(&catalog(&[
            ("100", "Contact Address"),
            ("9", "IP Address"),
        ]));
        assert_eq!(roles.ip_field_id, "9");
    }
}
