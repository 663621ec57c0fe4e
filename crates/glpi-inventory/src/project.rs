//! Projection of raw search records into normalized host entries

use std::fmt;

use serde::{Deserialize, Serialize};

use glpi_api::RawRecord;

use crate::schema::{FieldRoleMap, NAME_FIELD_ID};

/// Substrings identifying a Linux-family OS label
const LINUX_TERMS: [&str; 9] = [
    "linux", "ubuntu", "debian", "red hat", "centos", "rocky", "alma", "fedora", "suse",
];

/// OS-derived group a host lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostGroup {
    Windows,
    Linux,
    Unclassified,
}

impl HostGroup {
    /// Every group, in the order they are declared in the inventory
    pub const ALL: [HostGroup; 3] = [HostGroup::Windows, HostGroup::Linux, HostGroup::Unclassified];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HostGroup::Windows => "windows",
            HostGroup::Linux => "linux",
            HostGroup::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for HostGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized host produced from one raw record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    /// Unique key within a run; duplicates from the source overwrite,
    /// last wins
    pub hostname: String,
    /// Dotted-decimal-looking connection address, when one was extractable
    pub address: Option<String>,
    pub group: HostGroup,
}

/// Classify an OS label into a host group.
///
/// Total and idempotent: any label, including a missing one, lands in
/// exactly one group. Windows is checked before the Linux-family terms, so
/// a label somehow matching both resolves to windows.
#[must_use]
pub fn classify_os(label: Option<&str>) -> HostGroup {
    let Some(label) = label else {
        return HostGroup::Unclassified;
    };
    let label = label.to_lowercase();
    if label.contains("windows") {
        return HostGroup::Windows;
    }
    if LINUX_TERMS.iter().any(|term| label.contains(term)) {
        return HostGroup::Linux;
    }
    HostGroup::Unclassified
}

/// First address-looking segment of a raw IP field value.
///
/// GLPI joins multiple addresses into one string with `<br>` or newlines;
/// only the first segment is kept, trimmed. A candidate without a `.` is
/// discarded rather than guessed at.
fn first_address(raw: &str) -> Option<String> {
    let unfolded = raw.replace("<br>", "\n");
    let first = unfolded.lines().next().unwrap_or("").trim();
    if first.contains('.') {
        Some(first.to_string())
    } else {
        None
    }
}

/// Project one raw record into a host entry.
///
/// Returns `None` when the record carries no hostname; such records are
/// skipped, never treated as errors. Pure: no I/O, no hidden state.
#[must_use]
pub fn project_record(record: &RawRecord, roles: &FieldRoleMap) -> Option<HostEntry> {
    let hostname = record
        .scalar(NAME_FIELD_ID)
        .filter(|name| !name.is_empty())?;

    let address = record
        .scalar(&roles.ip_field_id)
        .and_then(|raw| first_address(&raw));

    let group = classify_os(record.scalar(&roles.os_field_id).as_deref());

    Some(HostEntry {
        hostname,
        address,
        group,
    })
}
