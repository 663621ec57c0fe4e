//! Inventory sink boundary
//!
//! The host runtime that loads this crate supplies its own sink; the
//! in-memory [`Inventory`] is the implementation used by the CLI and tests.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::project::HostGroup;

/// Receives the groups and hosts produced by an inventory run
pub trait InventorySink {
    /// Declare a group; called for every group even when it stays empty
    fn add_group(&mut self, group: HostGroup);

    /// Add a host, replacing any earlier host with the same name
    fn add_host(&mut self, hostname: &str);

    /// Set a variable on a previously added host
    fn set_variable(&mut self, hostname: &str, key: &str, value: &str);

    /// Put a previously added host into a group
    fn add_host_to_group(&mut self, group: HostGroup, hostname: &str);
}

/// In-memory inventory, serializable as the CLI's JSON output
#[derive(Debug, Default, Serialize)]
pub struct Inventory {
    /// Host name to its variables
    pub hosts: BTreeMap<String, BTreeMap<String, String>>,
    /// Group name to member host names
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Members of a group, empty when the group does not exist
    #[must_use]
    pub fn group_members(&self, group: HostGroup) -> &[String] {
        self.groups
            .get(group.as_str())
            .map_or(&[], Vec::as_slice)
    }
}

impl InventorySink for Inventory {
    fn add_group(&mut self, group: HostGroup) {
        self.groups.entry(group.to_string()).or_default();
    }

    fn add_host(&mut self, hostname: &str) {
        // Last record wins: drop earlier variables and group memberships
        // for the same hostname.
        self.hosts.insert(hostname.to_string(), BTreeMap::new());
        for members in self.groups.values_mut() {
            members.retain(|member| member != hostname);
        }
    }

    fn set_variable(&mut self, hostname: &str, key: &str, value: &str) {
        self.hosts
            .entry(hostname.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn add_host_to_group(&mut self, group: HostGroup, hostname: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .push(hostname.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_exist_even_when_empty() {
        let mut inventory = Inventory::default();
        for group in HostGroup::ALL {
            inventory.add_group(group);
        }
        assert_eq!(inventory.groups.len(), 3);
        assert!(inventory.group_members(HostGroup::Linux).is_empty());
    }

    #[test]
    fn test_duplicate_host_last_wins() {
        let mut inventory = Inventory::default();
        inventory.add_group(HostGroup::Windows);
        inventory.add_group(HostGroup::Linux);

        inventory.add_host("srv01");
        inventory.set_variable("srv01", "ansible_host", "10.0.0.5");
        inventory.add_host_to_group(HostGroup::Windows, "srv01");

        inventory.add_host("srv01");
        inventory.add_host_to_group(HostGroup::Linux, "srv01");

        assert_eq!(inventory.host_count(), 1);
        assert!(inventory.hosts["srv01"].is_empty());
        assert!(inventory.group_members(HostGroup::Windows).is_empty());
        assert_eq!(inventory.group_members(HostGroup::Linux), ["srv01"]);
    }

    #[test]
    fn test_variables_attached_to_host() {
        let mut inventory = Inventory::default();
        inventory.add_host("srv02");
        inventory.set_variable("srv02", "ansible_host", "192.168.1.10");
        assert_eq!(inventory.hosts["srv02"]["ansible_host"], "192.168.1.10");
    }
}
