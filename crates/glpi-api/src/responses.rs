//! Response types for the GLPI REST API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET /initSession`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitSessionResponse {
    pub session_token: String,
}

/// One entry of the field catalog returned by `GET /listSearchOptions/<AssetType>`.
///
/// The catalog maps unstable numeric field ids to these entries. GLPI mixes
/// scalar metadata keys into the same mapping, so the catalog travels as raw
/// JSON and is filtered into `SearchOption` values by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOption {
    /// Human-readable, locale-dependent label
    pub name: String,
}

/// Body of `GET /search/<AssetType>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total matching assets on the server, which may exceed `data.len()`
    /// when the requested range truncates the result
    #[serde(default)]
    pub totalcount: u64,
    #[serde(default)]
    pub data: Vec<RawRecord>,
}

/// One asset row from a search response, keyed by field id.
///
/// Values are arbitrary JSON scalars; multi-valued fields arrive as one
/// string joined with `<br>` or newlines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// Value at a field id rendered as a string.
    ///
    /// JSON strings and numbers are accepted; null, arrays and objects read
    /// as absent.
    #[must_use]
    pub fn scalar(&self, field_id: &str) -> Option<String> {
        match self.0.get(field_id)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
